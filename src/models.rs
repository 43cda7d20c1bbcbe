use chrono::Local;
use serde::{Deserialize, Serialize};

/// One scraped job listing that matched the keyword list. Built once per run
/// and never mutated afterwards; only its id outlives the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Posting {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub scraped_date: String,
    pub matching_keywords: Vec<String>,
}

impl Posting {
    /// Local-time timestamp recorded on every posting scraped in a run.
    pub fn scrape_timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
