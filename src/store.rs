use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::utils::error::Result;

pub const DEFAULT_STATE_FILE: &str = "sent_jobs.json";

/// Identifiers of postings that have already been emailed, persisted as a
/// JSON array so the set survives across runs. Append-only; no expiry.
#[derive(Debug, Clone)]
pub struct SentJobs {
    path: PathBuf,
    ids: Vec<String>,
}

impl SentJobs {
    /// Load from `path`. A missing or unparseable file starts the set out
    /// empty rather than failing the run.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let ids = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids,
                Err(e) => {
                    debug!("ignoring unparseable state file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, ids }
    }

    /// Overwrite the state file with the current identifiers, pretty-printed.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.ids)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    pub fn insert(&mut self, id: String) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
