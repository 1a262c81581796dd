use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Share of reviews per sentiment label, in percent. Sums to 100 for any
/// non-empty review set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
}

/// Aggregated review statistics for one millet variety.
///
/// Derived in full from the entity's review set — never updated
/// incrementally. `None` marks a statistic that is undefined for the set
/// (no reviews, or no review carrying the field); scoring substitutes the
/// documented fallback, never a NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub entity_id: String,
    pub review_count: usize,
    pub avg_rating: Option<f64>,
    pub avg_sentiment_score: Option<f64>,
    pub sentiment_distribution: Option<SentimentDistribution>,
    /// Fraction of reviews flagging the aspect, in [0, 1].
    pub pct_texture_mentioned: Option<f64>,
    pub pct_health_benefit_mentioned: Option<f64>,
    pub pct_price_mentioned: Option<f64>,
    /// Mean over reviews that carry a taste score; `None` if none do.
    pub avg_taste_score: Option<f64>,
    /// Most frequent extracted keywords, ties broken by first-seen order.
    pub top_keywords: Vec<String>,
}

impl EntitySummary {
    /// A summary for an entity with no reviews: zero count, everything else
    /// undefined.
    #[must_use]
    pub fn empty(entity_id: &str) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            review_count: 0,
            avg_rating: None,
            avg_sentiment_score: None,
            sentiment_distribution: None,
            pct_texture_mentioned: None,
            pct_health_benefit_mentioned: None,
            pct_price_mentioned: None,
            avg_taste_score: None,
            top_keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TastePreference {
    Good,
    Neutral,
    Bad,
    #[default]
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TexturePreference {
    Mentioned,
    NotMentioned,
    #[default]
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingPreference {
    Fast,
    Slow,
    Average,
    #[default]
    Any,
}

/// Parsed user input for one recommendation request.
///
/// Serde defaults implement the defaults-overridden-by-present-fields
/// pattern: absent preference dimensions resolve to `Any`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Requested health concerns. Unknown labels are tolerated and simply
    /// contribute zero relevance.
    pub health_concerns: Vec<String>,
    /// Primary goal for the health-score bonus rule table. Defaults to the
    /// first concern when unset.
    #[serde(default)]
    pub health_goal: Option<String>,
    /// Free-text notes, passed through opaquely and logged; never parsed
    /// here.
    #[serde(default)]
    pub user_query: Option<String>,
    #[serde(default)]
    pub taste_preference: TastePreference,
    #[serde(default)]
    pub texture_preference: TexturePreference,
    #[serde(default)]
    pub cooking_preference: CookingPreference,
}

impl UserPreferences {
    /// Build preferences carrying only health concerns, everything else at
    /// defaults.
    #[must_use]
    pub fn for_concerns(health_concerns: Vec<String>) -> Self {
        Self {
            health_concerns,
            health_goal: None,
            user_query: None,
            taste_preference: TastePreference::default(),
            texture_preference: TexturePreference::default(),
            cooking_preference: CookingPreference::default(),
        }
    }

    /// The goal used against the bonus rule table.
    #[must_use]
    pub fn primary_goal(&self) -> Option<&str> {
        self.health_goal
            .as_deref()
            .or_else(|| self.health_concerns.first().map(String::as_str))
    }
}

/// The five component scores plus their weighted sum, rounded to 3 decimals.
///
/// All components are normalized to [0, 1] except `rating_score`, which is
/// kept on the original 1-5 scale for display; the weighted sum normalizes
/// it internally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sentiment_score: f64,
    pub rating_score: f64,
    pub health_score: f64,
    pub taste_score: f64,
    pub preference_score: f64,
    pub final_score: f64,
}

/// Reviews for one entity that matched a single concern trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewTheme {
    pub keyword: String,
    pub match_count: usize,
    pub avg_rating: f64,
    /// Up to 2 highest-rated matching review texts, ties by original order.
    pub sample_reviews: Vec<String>,
}

/// One ranked recommendation returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub entity_id: String,
    pub display_name: String,
    pub final_score: f64,
    /// Multi-concern keyword-match score from the shortlisting pass.
    pub relevance_score: f64,
    pub explanation: String,
    pub score_breakdown: ScoreBreakdown,
    /// Per-concern match percentage (matching reviews per 100 reviews).
    pub concern_match_pct: BTreeMap<String, f64>,
    pub themes: Vec<ReviewTheme>,
    pub sample_reviews: Vec<String>,
}

/// Scores for one candidate, kept for the audit log: every entity gets a
/// relevance score, shortlisted entities also get a breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateScore {
    pub entity_id: String,
    pub relevance_score: f64,
    pub breakdown: Option<ScoreBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_default_dimensions_to_any() {
        let json = r#"{"health_concerns": ["diabetes"]}"#;
        let prefs: UserPreferences = serde_json::from_str(json).expect("deserialize");
        assert_eq!(prefs.taste_preference, TastePreference::Any);
        assert_eq!(prefs.texture_preference, TexturePreference::Any);
        assert_eq!(prefs.cooking_preference, CookingPreference::Any);
        assert!(prefs.health_goal.is_none());
    }

    #[test]
    fn texture_preference_uses_snake_case() {
        let pref: TexturePreference =
            serde_json::from_str("\"not_mentioned\"").expect("deserialize");
        assert_eq!(pref, TexturePreference::NotMentioned);
    }

    #[test]
    fn primary_goal_prefers_explicit_goal() {
        let mut prefs = UserPreferences::for_concerns(vec!["heart".to_string()]);
        assert_eq!(prefs.primary_goal(), Some("heart"));
        prefs.health_goal = Some("weight_loss".to_string());
        assert_eq!(prefs.primary_goal(), Some("weight_loss"));
    }

    #[test]
    fn empty_summary_has_no_derived_values() {
        let summary = EntitySummary::empty("ragi");
        assert_eq!(summary.review_count, 0);
        assert!(summary.avg_rating.is_none());
        assert!(summary.sentiment_distribution.is_none());
        assert!(summary.top_keywords.is_empty());
    }
}
