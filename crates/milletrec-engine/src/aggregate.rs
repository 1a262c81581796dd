//! Per-entity aspect aggregation over review records.

use std::collections::HashMap;

use milletrec_core::{ReviewRecord, SentimentLabel};

use crate::types::{EntitySummary, ReviewTheme, SentimentDistribution};

/// Default number of top keywords kept per entity.
pub const DEFAULT_TOP_KEYWORDS: usize = 10;

/// Number of sample review texts attached to a theme.
const THEME_SAMPLE_LIMIT: usize = 2;

/// Sample review texts are truncated to this many characters.
const SAMPLE_TEXT_LIMIT: usize = 150;

/// Computes [`EntitySummary`] values from raw review sets.
///
/// All statistics are recomputed in full from the given reviews on every
/// call — summarizing the same immutable set twice yields identical output.
#[derive(Debug, Clone)]
pub struct AspectAggregator {
    top_keywords: usize,
}

impl AspectAggregator {
    #[must_use]
    pub fn new(top_keywords: usize) -> Self {
        Self { top_keywords }
    }

    /// Aggregate one entity's reviews into a summary.
    ///
    /// An empty review set yields `review_count = 0` with every derived
    /// field `None`; scoring substitutes documented fallbacks rather than
    /// propagating NaN.
    #[must_use]
    pub fn summarize(&self, entity_id: &str, reviews: &[ReviewRecord]) -> EntitySummary {
        if reviews.is_empty() {
            return EntitySummary::empty(entity_id);
        }

        #[allow(clippy::cast_precision_loss)]
        let count = reviews.len() as f64;

        let avg_rating = reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / count;
        let avg_sentiment_score = reviews.iter().map(|r| r.sentiment_score).sum::<f64>() / count;

        let label_pct = |label: SentimentLabel| -> f64 {
            #[allow(clippy::cast_precision_loss)]
            let matching = reviews.iter().filter(|r| r.sentiment_label == label).count() as f64;
            matching / count * 100.0
        };

        let flag_pct = |get: fn(&ReviewRecord) -> Option<bool>| -> f64 {
            #[allow(clippy::cast_precision_loss)]
            let flagged = reviews.iter().filter(|r| get(r) == Some(true)).count() as f64;
            flagged / count
        };

        let taste_scores: Vec<f64> = reviews.iter().filter_map(|r| r.taste_score).collect();
        let avg_taste_score = if taste_scores.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            let denom = taste_scores.len() as f64;
            Some(taste_scores.iter().sum::<f64>() / denom)
        };

        EntitySummary {
            entity_id: entity_id.to_string(),
            review_count: reviews.len(),
            avg_rating: Some(avg_rating),
            avg_sentiment_score: Some(avg_sentiment_score),
            sentiment_distribution: Some(SentimentDistribution {
                positive_pct: label_pct(SentimentLabel::Positive),
                neutral_pct: label_pct(SentimentLabel::Neutral),
                negative_pct: label_pct(SentimentLabel::Negative),
            }),
            pct_texture_mentioned: Some(flag_pct(|r| r.texture_mentioned)),
            pct_health_benefit_mentioned: Some(flag_pct(|r| r.health_benefit_mentioned)),
            pct_price_mentioned: Some(flag_pct(|r| r.price_mentioned)),
            avg_taste_score,
            top_keywords: top_keywords(reviews, self.top_keywords),
        }
    }
}

impl Default for AspectAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_KEYWORDS)
    }
}

/// Flatten extracted keywords across reviews, count frequencies, and keep
/// the top N. Tokens are lowercased and trimmed; ties are broken by
/// first-seen order in the flattened sequence.
fn top_keywords(reviews: &[ReviewRecord], top_n: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for review in reviews {
        let Some(keywords) = &review.extracted_keywords else {
            continue;
        };
        for keyword in keywords {
            let token = keyword.trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            if !counts.contains_key(&token) {
                order.push(token.clone());
            }
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    // Stable sort: equal counts keep first-seen order.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(top_n);
    order
}

/// Extract per-trigger themes for one entity and concern.
///
/// For each trigger with at least one matching review, emits the trigger,
/// the match count, the mean rating of the matches, and up to 2
/// highest-rated sample texts (rating ties keep original order).
#[must_use]
pub fn extract_common_themes(reviews: &[ReviewRecord], triggers: &[String]) -> Vec<ReviewTheme> {
    let mut themes = Vec::new();

    for trigger in triggers {
        if trigger.is_empty() {
            continue;
        }

        let matches: Vec<&ReviewRecord> = reviews
            .iter()
            .filter(|r| !r.review_text.is_empty() && r.review_text.to_lowercase().contains(trigger.as_str()))
            .collect();

        if matches.is_empty() {
            continue;
        }

        #[allow(clippy::cast_precision_loss)]
        let avg_rating =
            matches.iter().map(|r| f64::from(r.rating)).sum::<f64>() / matches.len() as f64;

        let mut by_rating = matches.clone();
        by_rating.sort_by(|a, b| b.rating.cmp(&a.rating));

        let sample_reviews = by_rating
            .iter()
            .take(THEME_SAMPLE_LIMIT)
            .map(|r| truncate_text(&r.review_text))
            .collect();

        themes.push(ReviewTheme {
            keyword: trigger.clone(),
            match_count: matches.len(),
            avg_rating,
            sample_reviews,
        });
    }

    themes
}

/// First `limit` reviews carrying the given sentiment label, truncated for
/// display. Deterministic: dataset order, no sampling.
#[must_use]
pub fn sample_reviews(reviews: &[ReviewRecord], label: SentimentLabel, limit: usize) -> Vec<String> {
    reviews
        .iter()
        .filter(|r| r.sentiment_label == label)
        .take(limit)
        .map(|r| truncate_text(&r.review_text))
        .collect()
}

fn truncate_text(text: &str) -> String {
    if text.chars().count() <= SAMPLE_TEXT_LIMIT {
        text.to_string()
    } else {
        let cut: String = text.chars().take(SAMPLE_TEXT_LIMIT).collect();
        format!("{cut}...")
    }
}
