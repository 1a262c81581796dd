use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Review dataset, one JSON record per line.
    pub reviews_path: PathBuf,
    /// Precomputed per-entity summary table; when set the server consumes it
    /// instead of aggregating the review dataset at startup.
    pub summary_path: Option<PathBuf>,
    /// YAML override for the concern catalog; builtin table when unset.
    pub concerns_path: Option<PathBuf>,
    /// YAML override for the goal rule table; builtin table when unset.
    pub rules_path: Option<PathBuf>,
    /// Append-only recommendation audit log.
    pub request_log_path: PathBuf,
    pub default_top_k: usize,
    pub top_keywords: usize,
}
