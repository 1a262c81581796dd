//! Flat-file plumbing for the millet recommendation service.
//!
//! Loads the review dataset and optional precomputed summary table from
//! JSON Lines files, assembles the read-only [`milletrec_engine::DataContext`]
//! shared by every request, and appends structured request-log entries to
//! the audit log.

pub mod context;
pub mod dataset;
pub mod request_log;

pub use context::{build_context, build_context_with_summaries};
pub use dataset::{load_reviews, load_summaries, write_summaries};
pub use request_log::{RequestLog, RequestLogEntry};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed JSON at {path}:{line}: {source}")]
    MalformedRow {
        path: String,
        line: usize,
        source: serde_json::Error,
    },

    #[error("invalid review at {path}:{line}: {source}")]
    InvalidRow {
        path: String,
        line: usize,
        source: milletrec_core::CoreError,
    },

    #[error("no summary row for entity '{0}'")]
    MissingSummary(String),

    #[error(transparent)]
    Engine(#[from] milletrec_engine::EngineError),

    #[error("failed to serialize log entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("request log lock poisoned")]
    LogLockPoisoned,
}
