use anyhow::Result;
use tracing::info;

use crate::dedup::{partition_new, posting_id};
use crate::extractor::{DESCRIPTION_CHARS, JobExtractor};
use crate::fetcher::PageSource;
use crate::filter::KeywordFilter;
use crate::models::Posting;
use crate::notifier::Notifier;
use crate::store::SentJobs;
use crate::utils::text::truncate_chars;

/// The one search page this watcher monitors.
pub const SEARCH_URL: &str = "https://jobs.rwfm.tamu.edu/search/?PageSize=50&PageNum=1#results";

/// Counters from one watcher run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub containers: usize,
    pub matched: usize,
    pub new_sent: usize,
}

/// One full fetch, extract, filter, dedupe, notify pass. The seen-set moves
/// through as an explicit value: loaded by the caller, updated and persisted
/// here only when new postings were attempted.
///
/// `notifier` of `None` is a dry run: matches are reported, nothing is sent
/// and no state changes.
pub async fn run(
    source: &dyn PageSource,
    notifier: Option<&dyn Notifier>,
    store: &mut SentJobs,
    search_url: &str,
) -> Result<RunReport> {
    info!("starting scrape...");
    let html = source.render(search_url).await?;

    let extractor = JobExtractor::new(search_url)?;
    let filter = KeywordFilter::new()?;
    let timestamp = Posting::scrape_timestamp();

    let candidates = extractor.extract(&html);
    let containers = candidates.len();

    let mut matched = Vec::new();
    for candidate in candidates {
        let keywords = filter.matches(&candidate.text);
        if keywords.is_empty() {
            continue;
        }
        matched.push(Posting {
            // The id hashes the full text, not the stored truncation.
            id: posting_id(&candidate.title, &candidate.text),
            title: candidate.title,
            url: candidate.url,
            description: truncate_chars(&candidate.text, DESCRIPTION_CHARS),
            scraped_date: timestamp.clone(),
            matching_keywords: keywords,
        });
    }
    info!("scraped {} matching job(s)", matched.len());

    let matched_count = matched.len();
    let (new_jobs, _already_seen) = partition_new(matched, store);

    if new_jobs.is_empty() {
        info!("no new jobs to send");
        return Ok(RunReport {
            containers,
            matched: matched_count,
            new_sent: 0,
        });
    }

    match notifier {
        Some(notifier) => {
            notifier.send_digest(&new_jobs).await;
            // The attempted postings count as sent whether or not the
            // delivery succeeded.
            for job in &new_jobs {
                store.insert(job.id.clone());
            }
            store.save()?;
        }
        None => {
            info!(
                "dry run: {} new job(s) left unsent and unrecorded",
                new_jobs.len()
            );
            for job in &new_jobs {
                info!("would send: {} [{}]", job.title, job.matching_keywords.join(", "));
            }
        }
    }

    Ok(RunReport {
        containers,
        matched: matched_count,
        new_sent: new_jobs.len(),
    })
}
