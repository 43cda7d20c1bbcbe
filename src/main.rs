use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use wildjob_watcher::AppError;
use wildjob_watcher::config::EmailConfig;
use wildjob_watcher::fetcher::{BrowserFetcher, HttpFetcher, PageSource};
use wildjob_watcher::notifier::{EmailNotifier, Notifier};
use wildjob_watcher::pipeline::{self, SEARCH_URL};
use wildjob_watcher::store::{DEFAULT_STATE_FILE, SentJobs};

/// Watches the TAMU wildlife job board and emails new matching postings.
#[derive(Parser, Debug)]
#[command(name = "wildjob-watcher", version, about)]
struct Cli {
    /// Path of the JSON file recording already-notified postings.
    #[arg(long, default_value = DEFAULT_STATE_FILE)]
    state_file: String,

    /// Report matches without sending email or recording state.
    #[arg(long)]
    dry_run: bool,

    /// Fetch the page with a plain HTTP GET instead of a headless browser.
    #[arg(long)]
    static_fetch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wildjob_watcher=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let notifier = if cli.dry_run {
        None
    } else {
        match EmailConfig::from_env() {
            Ok(config) => Some(EmailNotifier::new(config)),
            Err(AppError::MissingConfig { keys }) => {
                error!("missing required email config: {:?}", keys);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    };

    let source: Box<dyn PageSource> = if cli.static_fetch {
        Box::new(HttpFetcher::new())
    } else {
        Box::new(BrowserFetcher::new())
    };

    let mut store = SentJobs::load(&cli.state_file);
    info!("{} previously sent posting(s) loaded", store.len());

    let report = pipeline::run(
        source.as_ref(),
        notifier.as_ref().map(|n| n as &dyn Notifier),
        &mut store,
        SEARCH_URL,
    )
    .await?;

    info!(
        "run complete: {} container(s), {} matched, {} new",
        report.containers, report.matched, report.new_sent
    );

    Ok(())
}
