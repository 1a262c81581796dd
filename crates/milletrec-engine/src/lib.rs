//! Recommendation scoring engine for the millet catalog.
//!
//! Turns per-review signals into a ranked, explainable list of candidates:
//! keyword matching against health-concern triggers, per-entity aspect
//! aggregation, a relevance pass for candidate selection, a five-factor
//! weighted score for explanation, deterministic ranking, and template-based
//! explanations. Pure in-memory computation over an explicitly constructed
//! read-only [`DataContext`].

pub mod aggregate;
pub mod context;
pub mod error;
pub mod explain;
pub mod matcher;
pub mod rank;
pub mod score;
pub mod session;
pub mod types;

pub use aggregate::AspectAggregator;
pub use context::{DataContext, EntityData};
pub use error::EngineError;
pub use explain::build_explanation;
pub use matcher::KeywordMatcher;
pub use rank::rank_by;
pub use score::{ScoreWeights, ScoringEngine};
pub use session::{RecommendationSession, SessionOutcome};
pub use types::{
    CandidateScore, CookingPreference, EntitySummary, Recommendation, ReviewTheme, ScoreBreakdown,
    SentimentDistribution, TastePreference, TexturePreference, UserPreferences,
};
