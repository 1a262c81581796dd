use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Overall sentiment assigned to a review by upstream extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// One preprocessed customer review for a single millet variety.
///
/// Produced by upstream sentiment/aspect extraction and treated as immutable
/// once loaded. Aspect fields are optional: `None` means the extractor did
/// not see the aspect mentioned, which is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub review_id: u64,
    /// Millet variety slug, e.g. `foxtail-millet`. Required and non-empty.
    pub entity_id: String,
    /// Star rating, 1-5.
    pub rating: u8,
    pub review_text: String,
    pub sentiment_label: SentimentLabel,
    /// Sentiment confidence in [0.0, 1.0].
    pub sentiment_score: f64,
    /// Taste quality in [0.0, 1.0] when taste was mentioned.
    #[serde(default)]
    pub taste_score: Option<f64>,
    #[serde(default)]
    pub texture_mentioned: Option<bool>,
    #[serde(default)]
    pub health_benefit_mentioned: Option<bool>,
    #[serde(default)]
    pub price_mentioned: Option<bool>,
    /// 3-5 descriptive keywords extracted from the review text.
    #[serde(default)]
    pub extracted_keywords: Option<Vec<String>>,
}

impl ReviewRecord {
    /// Check the fields for which no scoring fallback exists.
    ///
    /// Rows with missing ratings or text are expected to be filtered
    /// upstream; this rejects what cannot be defaulted at all.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the entity id is empty, the rating is outside
    /// 1-5, or the sentiment score is outside [0.0, 1.0].
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.entity_id.trim().is_empty() {
            return Err(CoreError::MissingEntityId {
                review_id: self.review_id,
            });
        }
        if !(1..=5).contains(&self.rating) {
            return Err(CoreError::InvalidRating {
                review_id: self.review_id,
                rating: self.rating,
            });
        }
        if !(0.0..=1.0).contains(&self.sentiment_score) {
            return Err(CoreError::InvalidSentimentScore {
                review_id: self.review_id,
                score: self.sentiment_score,
            });
        }
        Ok(())
    }
}

/// Turn an entity slug into a display name: `foxtail-millet` → `Foxtail Millet`.
#[must_use]
pub fn display_name(entity_id: &str) -> String {
    entity_id
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
