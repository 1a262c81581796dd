//! Per-request orchestration of the scoring pipeline.

use std::collections::BTreeMap;

use milletrec_core::{display_name, SentimentLabel};

use crate::aggregate::{extract_common_themes, sample_reviews};
use crate::context::{DataContext, EntityData};
use crate::explain::build_explanation;
use crate::matcher::KeywordMatcher;
use crate::rank::rank_by;
use crate::score::ScoringEngine;
use crate::types::{CandidateScore, Recommendation, ReviewTheme, UserPreferences};

/// Number of positive sample reviews attached per recommendation.
const SAMPLE_REVIEW_LIMIT: usize = 3;

/// Everything a request produced: the ranked response plus the full
/// candidate table the caller appends to the audit log.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub recommendations: Vec<Recommendation>,
    /// Relevance for every catalog entity; breakdowns only where the
    /// shortlist pass computed one.
    pub candidate_scores: Vec<CandidateScore>,
}

/// One scoring request over a shared read-only [`DataContext`].
///
/// Pure in-memory computation: the session never performs I/O and owns no
/// mutable state, so any number of sessions may run concurrently against
/// the same context.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationSession<'a> {
    ctx: &'a DataContext,
    matcher: &'a KeywordMatcher,
    scorer: &'a ScoringEngine,
}

impl<'a> RecommendationSession<'a> {
    #[must_use]
    pub fn new(ctx: &'a DataContext, matcher: &'a KeywordMatcher, scorer: &'a ScoringEngine) -> Self {
        Self {
            ctx,
            matcher,
            scorer,
        }
    }

    /// Run the two-pass pipeline and build the response.
    ///
    /// Pass one scores every entity for multi-concern relevance and
    /// shortlists the top `top_k`. Pass two computes the five-factor
    /// breakdown, explanation, concern match percentages, themes, and
    /// sample reviews for each shortlisted entity. The response is ordered
    /// by final score, ties preserving shortlist order.
    #[must_use]
    pub fn recommend(&self, prefs: &UserPreferences, top_k: usize) -> SessionOutcome {
        tracing::debug!(
            concerns = ?prefs.health_concerns,
            top_k,
            entities = self.ctx.len(),
            "scoring recommendation request"
        );

        let relevance: Vec<(usize, f64)> = self
            .ctx
            .entities()
            .iter()
            .enumerate()
            .map(|(idx, entity)| {
                let score =
                    self.scorer
                        .relevance_score(self.matcher, &entity.reviews, &prefs.health_concerns);
                (idx, score)
            })
            .collect();

        let mut candidate_scores: Vec<CandidateScore> = relevance
            .iter()
            .map(|&(idx, score)| CandidateScore {
                entity_id: self.ctx.entities()[idx].entity_id.clone(),
                relevance_score: score,
                breakdown: None,
            })
            .collect();

        let shortlist = rank_by(relevance, |&(_, score)| score, top_k);

        let mut recommendations: Vec<Recommendation> = shortlist
            .into_iter()
            .map(|(idx, relevance_score)| {
                let entity = &self.ctx.entities()[idx];
                let rec = self.build_recommendation(entity, relevance_score, prefs);
                candidate_scores[idx].breakdown = Some(rec.score_breakdown);
                rec
            })
            .collect();

        recommendations = rank_by(recommendations, |r| r.final_score, top_k);

        for rec in &recommendations {
            tracing::debug!(
                entity = %rec.entity_id,
                final_score = rec.final_score,
                relevance = rec.relevance_score,
                "recommendation candidate"
            );
        }

        SessionOutcome {
            recommendations,
            candidate_scores,
        }
    }

    fn build_recommendation(
        &self,
        entity: &EntityData,
        relevance_score: f64,
        prefs: &UserPreferences,
    ) -> Recommendation {
        let breakdown = self.scorer.score(&entity.summary, prefs);
        let name = display_name(&entity.entity_id);
        let explanation = build_explanation(&name, &breakdown);

        let mut concern_match_pct = BTreeMap::new();
        let mut themes: Vec<ReviewTheme> = Vec::new();
        for concern in &prefs.health_concerns {
            concern_match_pct.insert(
                concern.clone(),
                concern_match_percentage(self.matcher, entity, concern),
            );
            themes.extend(extract_common_themes(
                &entity.reviews,
                self.matcher.catalog().triggers(concern),
            ));
        }

        Recommendation {
            entity_id: entity.entity_id.clone(),
            display_name: name,
            final_score: breakdown.final_score,
            relevance_score,
            explanation,
            score_breakdown: breakdown,
            concern_match_pct,
            themes,
            sample_reviews: sample_reviews(
                &entity.reviews,
                SentimentLabel::Positive,
                SAMPLE_REVIEW_LIMIT,
            ),
        }
    }
}

/// Trigger hits for the concern per 100 reviews, rounded to 1 decimal.
/// Entities without reviews match at 0.
fn concern_match_percentage(matcher: &KeywordMatcher, entity: &EntityData, concern: &str) -> f64 {
    if entity.reviews.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = entity.reviews.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let hits = matcher.count_trigger_hits(&entity.reviews, concern) as f64;
    (hits / count * 1000.0).round() / 10.0
}
