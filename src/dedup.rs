use crate::models::Posting;
use crate::store::SentJobs;

/// Characters of description that participate in the identifier. Re-renders
/// that only differ past this prefix keep the same id across runs.
const ID_PREFIX_CHARS: usize = 200;

/// Deterministic identifier for a posting: MD5 hex digest of the lower-cased
/// title plus the first 200 characters of the description.
pub fn posting_id(title: &str, description: &str) -> String {
    let prefix: String = description.chars().take(ID_PREFIX_CHARS).collect();
    let material = format!("{}{}", title, prefix).to_lowercase();
    format!("{:x}", md5::compute(material.as_bytes()))
}

/// Split matched postings into not-yet-notified and already-seen.
pub fn partition_new(postings: Vec<Posting>, seen: &SentJobs) -> (Vec<Posting>, Vec<Posting>) {
    postings.into_iter().partition(|p| !seen.contains(&p.id))
}
