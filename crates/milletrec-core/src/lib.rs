//! Core domain types and configuration for the millet recommendation service.
//!
//! Holds the review record shape shared by every other crate, the
//! concern→trigger-keyword catalog, the health-goal bonus rule table, and
//! application configuration loaded from environment variables.

pub mod app_config;
pub mod concerns;
pub mod config;
pub mod reviews;
pub mod rules;

pub use app_config::{AppConfig, Environment};
pub use concerns::{load_concerns, ConcernCatalog, ConcernEntry};
pub use config::{load_app_config, load_app_config_from_env};
pub use reviews::{display_name, ReviewRecord, SentimentLabel};
pub use rules::{load_goal_rules, GoalRule, GoalRuleTable};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read content file {path}: {source}")]
    ContentFileIo {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse content file: {0}")]
    ContentFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("review {review_id} has no entity id")]
    MissingEntityId { review_id: u64 },

    #[error("review {review_id} has rating {rating}, expected 1-5")]
    InvalidRating { review_id: u64, rating: u8 },

    #[error("review {review_id} has sentiment score {score}, expected 0.0-1.0")]
    InvalidSentimentScore { review_id: u64, score: f64 },
}
