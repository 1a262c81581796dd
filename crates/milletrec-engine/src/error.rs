use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("duplicate entity in data context: {0}")]
    DuplicateEntity(String),

    #[error("summary entity id '{summary}' does not match reviews entity id '{reviews}'")]
    MismatchedSummary { summary: String, reviews: String },

    #[error("review {review_id} assigned to entity '{expected}' but carries '{actual}'")]
    MisassignedReview {
        review_id: u64,
        expected: String,
        actual: String,
    },
}
