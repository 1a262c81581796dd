//! Append-only recommendation audit log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milletrec_engine::{CandidateScore, Recommendation, UserPreferences};

use crate::StoreError;

/// One logged request: raw input, parsed preferences, the full candidate
/// score table, and the returned top-k list.
///
/// The schema is an audit trail — changes must be additive only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
    pub raw_input: serde_json::Value,
    pub parsed_preferences: UserPreferences,
    pub candidate_scores: Vec<CandidateScore>,
    pub top_recommendations: Vec<Recommendation>,
}

/// JSON Lines log with serialized appends.
///
/// Each entry is rendered to a single line before the lock is taken, and
/// written with one `write_all`, so concurrent requests never interleave
/// partial lines.
#[derive(Debug)]
pub struct RequestLog {
    file: Mutex<File>,
}

impl RequestLog {
    /// Open (or create) the log for appending, creating parent directories
    /// as needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the directory or file cannot be created.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Append one entry as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on serialization failure, a poisoned lock, or
    /// a failed write.
    pub fn append(&self, entry: &RequestLogEntry) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = self.file.lock().map_err(|_| StoreError::LogLockPoisoned)?;
        file.write_all(line.as_bytes()).map_err(|e| StoreError::Io {
            path: "request log".to_string(),
            source: e,
        })?;
        file.flush().map_err(|e| StoreError::Io {
            path: "request log".to_string(),
            source: e,
        })
    }
}
