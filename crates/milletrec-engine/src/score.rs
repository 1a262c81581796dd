//! Composite scoring: the five-factor breakdown used for explanation and
//! the multi-concern relevance score used for candidate selection.
//!
//! The two passes are independent. Relevance shortlists candidates from the
//! whole catalog; the weighted breakdown is computed per shortlisted entity
//! and drives ranking and explanations.

use milletrec_core::{GoalRuleTable, ReviewRecord};
use serde::{Deserialize, Serialize};

use crate::matcher::KeywordMatcher;
use crate::types::{EntitySummary, ScoreBreakdown, TexturePreference, UserPreferences};

/// Fallback when an entity has no defined mean sentiment.
pub const FALLBACK_SENTIMENT: f64 = 0.5;
/// Fallback star rating when an entity has no reviews.
pub const FALLBACK_RATING: f64 = 3.0;
/// Fallback taste score: neutral.
pub const FALLBACK_TASTE: f64 = 0.5;
/// Bonus added to the health score when the goal rule table lists the entity.
pub const HEALTH_GOAL_BONUS: f64 = 0.2;

/// Texture preferences match when the mention rate crosses this threshold.
const TEXTURE_MENTION_THRESHOLD: f64 = 0.1;

/// Component weights for the final score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub sentiment: f64,
    pub rating: f64,
    pub health: f64,
    pub taste: f64,
    pub preference: f64,
}

impl ScoreWeights {
    fn sum(&self) -> f64 {
        self.sentiment + self.rating + self.health + self.taste + self.preference
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            sentiment: 0.4,
            rating: 0.1,
            health: 0.2,
            taste: 0.15,
            preference: 0.15,
        }
    }
}

/// Weighted composite scorer over entity summaries.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoreWeights,
    rules: GoalRuleTable,
}

impl ScoringEngine {
    /// # Panics
    ///
    /// Debug builds panic if the weights do not sum to 1.0.
    #[must_use]
    pub fn new(weights: ScoreWeights, rules: GoalRuleTable) -> Self {
        debug_assert!(
            (weights.sum() - 1.0).abs() < 1e-9,
            "score weights must sum to 1.0, got {}",
            weights.sum()
        );
        Self { weights, rules }
    }

    #[must_use]
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Compute the five-factor breakdown for one entity.
    ///
    /// Undefined summary statistics resolve to the documented fallbacks
    /// (sentiment 0.5, rating 3.0, health base 0.0, taste 0.5), so an
    /// entity with zero reviews still scores — with a middling profile —
    /// rather than being excluded.
    #[must_use]
    pub fn score(&self, summary: &EntitySummary, prefs: &UserPreferences) -> ScoreBreakdown {
        let sentiment_score = summary.avg_sentiment_score.unwrap_or(FALLBACK_SENTIMENT);
        let rating_score = summary.avg_rating.unwrap_or(FALLBACK_RATING);
        let health_score = self.health_score(summary, prefs);
        let taste_score = summary.avg_taste_score.unwrap_or(FALLBACK_TASTE);
        let preference_score = preference_score(summary, prefs);

        // Rating is reported on its native 1-5 scale; normalize to [0, 1]
        // for the weighted sum, flooring ratings below 1 at 0.
        let normalized_rating = if rating_score >= 1.0 {
            (rating_score - 1.0) / 4.0
        } else {
            0.0
        };

        let final_score = self.weights.sentiment * sentiment_score
            + self.weights.rating * normalized_rating
            + self.weights.health * health_score
            + self.weights.taste * taste_score
            + self.weights.preference * preference_score;

        ScoreBreakdown {
            sentiment_score: round3(sentiment_score),
            rating_score: round3(rating_score),
            health_score: round3(health_score),
            taste_score: round3(taste_score),
            preference_score: round3(preference_score),
            final_score: round3(final_score),
        }
    }

    fn health_score(&self, summary: &EntitySummary, prefs: &UserPreferences) -> f64 {
        let mut score = summary.pct_health_benefit_mentioned.unwrap_or(0.0);

        if let Some(goal) = prefs.primary_goal() {
            if self.rules.applies(goal, &summary.entity_id) {
                score += HEALTH_GOAL_BONUS;
            }
        }

        score.clamp(0.0, 1.0)
    }

    /// Multi-concern relevance for candidate shortlisting.
    ///
    /// Per concern: trigger hits over the entity's reviews, normalized by
    /// review count and scaled to per-100-reviews; summed across concerns,
    /// plus `(avg_rating - 3) * 10` as a rating bonus. Entities with no
    /// reviews contribute zero for every concern and take the rating
    /// fallback (a zero bonus). Unknown concerns contribute zero.
    #[must_use]
    pub fn relevance_score(
        &self,
        matcher: &KeywordMatcher,
        reviews: &[ReviewRecord],
        concerns: &[String],
    ) -> f64 {
        let mut score = 0.0;

        if !reviews.is_empty() {
            #[allow(clippy::cast_precision_loss)]
            let count = reviews.len() as f64;
            for concern in concerns {
                #[allow(clippy::cast_precision_loss)]
                let hits = matcher.count_trigger_hits(reviews, concern) as f64;
                score += hits / count * 100.0;
            }
        }

        let avg_rating = if reviews.is_empty() {
            FALLBACK_RATING
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = reviews.len() as f64;
            reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / count
        };
        score += (avg_rating - 3.0) * 10.0;

        round2(score)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoreWeights::default(), GoalRuleTable::builtin())
    }
}

/// Texture-preference match score.
///
/// Mentioned with mention rate above 10%, or NotMentioned at or below 10%,
/// earns 0.5; Any earns 0.25; a stated preference the entity misses earns
/// nothing.
fn preference_score(summary: &EntitySummary, prefs: &UserPreferences) -> f64 {
    let texture_pct = summary.pct_texture_mentioned.unwrap_or(0.0);

    let score: f64 = match prefs.texture_preference {
        TexturePreference::Mentioned if texture_pct > TEXTURE_MENTION_THRESHOLD => 0.5,
        TexturePreference::NotMentioned if texture_pct <= TEXTURE_MENTION_THRESHOLD => 0.5,
        TexturePreference::Any => 0.25,
        TexturePreference::Mentioned | TexturePreference::NotMentioned => 0.0,
    };

    score.clamp(0.0, 1.0)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use milletrec_core::SentimentLabel;

    use super::*;
    use crate::types::SentimentDistribution;

    fn summary(entity_id: &str) -> EntitySummary {
        EntitySummary {
            entity_id: entity_id.to_string(),
            review_count: 10,
            avg_rating: Some(4.2),
            avg_sentiment_score: Some(0.8),
            sentiment_distribution: Some(SentimentDistribution {
                positive_pct: 80.0,
                neutral_pct: 10.0,
                negative_pct: 10.0,
            }),
            pct_texture_mentioned: Some(0.3),
            pct_health_benefit_mentioned: Some(0.6),
            pct_price_mentioned: Some(0.1),
            avg_taste_score: Some(0.7),
            top_keywords: vec!["healthy".to_string()],
        }
    }

    fn review(id: u64, rating: u8, text: &str) -> ReviewRecord {
        ReviewRecord {
            review_id: id,
            entity_id: "foxtail-millet".to_string(),
            rating,
            review_text: text.to_string(),
            sentiment_label: SentimentLabel::Positive,
            sentiment_score: 0.8,
            taste_score: None,
            texture_mentioned: None,
            health_benefit_mentioned: None,
            price_mentioned: None,
            extracted_keywords: None,
        }
    }

    #[test]
    fn final_score_reproduces_weighted_sum() {
        let engine = ScoringEngine::default();
        let prefs = UserPreferences::for_concerns(vec!["diabetes".to_string()]);
        let b = engine.score(&summary("ragi"), &prefs);

        let normalized_rating = (b.rating_score - 1.0) / 4.0;
        let expected = 0.4 * b.sentiment_score
            + 0.1 * normalized_rating
            + 0.2 * b.health_score
            + 0.15 * b.taste_score
            + 0.15 * b.preference_score;
        assert!(
            (b.final_score - expected).abs() < 0.001,
            "final {} vs recomputed {expected}",
            b.final_score
        );
    }

    #[test]
    fn empty_summary_scores_from_fallbacks() {
        let engine = ScoringEngine::default();
        let prefs = UserPreferences::for_concerns(vec!["heart".to_string()]);
        let b = engine.score(&EntitySummary::empty("ragi"), &prefs);

        assert!((b.sentiment_score - FALLBACK_SENTIMENT).abs() < 1e-9);
        assert!((b.rating_score - FALLBACK_RATING).abs() < 1e-9);
        assert!((b.health_score - 0.0).abs() < 1e-9);
        assert!((b.taste_score - FALLBACK_TASTE).abs() < 1e-9);
        // 0.4*0.5 + 0.1*0.5 + 0.2*0 + 0.15*0.5 + 0.15*0.25 = 0.3625
        assert!((b.final_score - 0.363).abs() < 1e-9);
    }

    #[test]
    fn health_score_saturates_at_one() {
        let engine = ScoringEngine::default();
        let mut s = summary("foxtail-millet");
        s.pct_health_benefit_mentioned = Some(1.0);
        let mut prefs = UserPreferences::for_concerns(vec!["diabetes".to_string()]);
        prefs.health_goal = Some("diabetes".to_string());
        // foxtail-millet is on the diabetes allow-list; 1.0 + 0.2 clamps to 1.0.
        let b = engine.score(&s, &prefs);
        assert!((b.health_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn goal_bonus_applies_only_to_listed_entities() {
        let engine = ScoringEngine::default();
        let mut prefs = UserPreferences::for_concerns(vec!["diabetes".to_string()]);
        prefs.health_goal = Some("weight_loss".to_string());

        let mut listed = summary("barnyard-millet");
        listed.pct_health_benefit_mentioned = Some(0.4);
        let mut unlisted = summary("ragi");
        unlisted.pct_health_benefit_mentioned = Some(0.4);

        let b_listed = engine.score(&listed, &prefs);
        let b_unlisted = engine.score(&unlisted, &prefs);
        assert!((b_listed.health_score - 0.6).abs() < 1e-9);
        assert!((b_unlisted.health_score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn goal_defaults_to_first_concern() {
        let engine = ScoringEngine::default();
        let prefs = UserPreferences::for_concerns(vec!["diabetes".to_string()]);
        let mut s = summary("kodo-millet");
        s.pct_health_benefit_mentioned = Some(0.3);
        let b = engine.score(&s, &prefs);
        assert!((b.health_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn texture_preference_scoring() {
        let engine = ScoringEngine::default();
        let s = summary("ragi"); // pct_texture_mentioned = 0.3

        let mut prefs = UserPreferences::for_concerns(vec!["heart".to_string()]);
        prefs.texture_preference = TexturePreference::Mentioned;
        assert!((engine.score(&s, &prefs).preference_score - 0.5).abs() < 1e-9);

        prefs.texture_preference = TexturePreference::NotMentioned;
        assert!((engine.score(&s, &prefs).preference_score - 0.0).abs() < 1e-9);

        prefs.texture_preference = TexturePreference::Any;
        assert!((engine.score(&s, &prefs).preference_score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn rating_below_one_normalizes_to_zero() {
        let engine = ScoringEngine::default();
        let mut s = summary("ragi");
        s.avg_rating = Some(0.5);
        let prefs = UserPreferences::for_concerns(vec!["heart".to_string()]);
        let b = engine.score(&s, &prefs);
        // Weighted sum must treat the rating term as zero.
        let expected = 0.4 * b.sentiment_score
            + 0.2 * b.health_score
            + 0.15 * b.taste_score
            + 0.15 * b.preference_score;
        assert!((b.final_score - round3(expected)).abs() < 1e-9);
    }

    #[test]
    fn relevance_combines_match_rate_and_rating_bonus() {
        let engine = ScoringEngine::default();
        let matcher = KeywordMatcher::default();
        let reviews = vec![
            review(1, 5, "sugar control is great"),
            review(2, 5, "no health terms"),
        ];
        let concerns = vec!["diabetes".to_string()];
        // 1 hit / 2 reviews * 100 = 50, rating bonus (5 - 3) * 10 = 20.
        let score = engine.relevance_score(&matcher, &reviews, &concerns);
        assert!((score - 70.0).abs() < 1e-9);
    }

    #[test]
    fn relevance_for_empty_reviews_is_zero() {
        let engine = ScoringEngine::default();
        let matcher = KeywordMatcher::default();
        let score = engine.relevance_score(&matcher, &[], &["diabetes".to_string()]);
        assert!((score - 0.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_concern_contributes_zero_relevance() {
        let engine = ScoringEngine::default();
        let matcher = KeywordMatcher::default();
        let reviews = vec![review(1, 3, "sugar everywhere")];
        let known = engine.relevance_score(&matcher, &reviews, &["diabetes".to_string()]);
        let mixed = engine.relevance_score(
            &matcher,
            &reviews,
            &["diabetes".to_string(), "weight_loss".to_string()],
        );
        assert!((known - mixed).abs() < 1e-9, "unknown concern must add 0");
    }

    #[test]
    fn breakdown_components_round_to_three_decimals() {
        let engine = ScoringEngine::default();
        let mut s = summary("ragi");
        s.avg_sentiment_score = Some(0.123_456);
        let prefs = UserPreferences::for_concerns(vec!["heart".to_string()]);
        let b = engine.score(&s, &prefs);
        assert!((b.sentiment_score - 0.123).abs() < 1e-9);
    }
}
