use std::ffi::OsStr;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use tracing::info;

/// Fixed delay for the board's client-side rendering to fill in results.
const RENDER_WAIT: Duration = Duration::from_secs(5);

/// A single capability: render a URL to an HTML string.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn render(&self, url: &str) -> Result<String>;
}

/// Headless Chrome fetcher for pages that need client-side rendering. One
/// browser per call; any launch or navigation failure is fatal to the run.
pub struct BrowserFetcher {
    chrome_path: Option<String>,
}

impl BrowserFetcher {
    pub fn new() -> Self {
        Self {
            chrome_path: std::env::var("CHROME_PATH").ok(),
        }
    }
}

impl Default for BrowserFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSource for BrowserFetcher {
    async fn render(&self, url: &str) -> Result<String> {
        info!("launching browser for {}", url);
        let mut launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(vec![
                OsStr::new("--no-sandbox"),
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-dev-shm-usage"),
            ])
            .build()
            .map_err(|e| anyhow!("Failed to create launch options: {}", e))?;

        if let Some(chrome_path) = &self.chrome_path {
            launch_options.path = Some(std::path::PathBuf::from(chrome_path));
        }

        let browser =
            Browser::new(launch_options).map_err(|e| anyhow!("Failed to launch browser: {}", e))?;
        let tab = browser
            .new_tab()
            .map_err(|e| anyhow!("Failed to create tab: {}", e))?;

        tab.navigate_to(url)
            .map_err(|e| anyhow!("Navigation failed: {}", e))?;
        tab.wait_until_navigated()
            .map_err(|e| anyhow!("Page load failed: {}", e))?;

        tokio::time::sleep(RENDER_WAIT).await;

        let html = tab
            .get_content()
            .map_err(|e| anyhow!("Failed to get page content: {}", e))?;

        // Close tab to free resources
        let _ = tab.close(true);

        Ok(html)
    }
}

/// Plain HTTP fetcher, for when the target page stops requiring JavaScript
/// rendering.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn render(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_fetcher_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><div class='job-row'>hi</div></body></html>"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new();
        let html = fetcher
            .render(&format!("{}/search/", server.uri()))
            .await
            .unwrap();

        assert!(html.contains("job-row"));
    }

    #[tokio::test]
    async fn test_http_fetcher_unreachable_host_errors() {
        let fetcher = HttpFetcher::new();
        let result = fetcher.render("http://127.0.0.1:1/search/").await;
        assert!(result.is_err());
    }
}
