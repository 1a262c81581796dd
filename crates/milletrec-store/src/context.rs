//! Assembly of the per-process [`DataContext`] from loaded tables.

use std::collections::HashMap;

use milletrec_core::ReviewRecord;
use milletrec_engine::{AspectAggregator, DataContext, EntityData, EntitySummary};

use crate::StoreError;

/// Group reviews by entity, preserving first-seen dataset order.
fn group_by_entity(reviews: Vec<ReviewRecord>) -> Vec<(String, Vec<ReviewRecord>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<ReviewRecord>)> = Vec::new();

    for review in reviews {
        match index.get(&review.entity_id) {
            Some(&i) => groups[i].1.push(review),
            None => {
                index.insert(review.entity_id.clone(), groups.len());
                groups.push((review.entity_id.clone(), vec![review]));
            }
        }
    }

    groups
}

/// Build a context by aggregating summaries from the raw reviews.
///
/// # Errors
///
/// Returns `StoreError` if the grouped data fails context validation.
pub fn build_context(
    reviews: Vec<ReviewRecord>,
    aggregator: &AspectAggregator,
) -> Result<DataContext, StoreError> {
    let entities = group_by_entity(reviews)
        .into_iter()
        .map(|(entity_id, reviews)| {
            let summary = aggregator.summarize(&entity_id, &reviews);
            EntityData {
                entity_id,
                reviews,
                summary,
            }
        })
        .collect();

    Ok(DataContext::new(entities)?)
}

/// Build a context from raw reviews plus a precomputed summary table.
///
/// Each entity present in the review set must have a summary row; extra
/// summary rows describe entities with zero reviews and are kept, appended
/// after the reviewed entities in table order.
///
/// # Errors
///
/// Returns [`StoreError::MissingSummary`] if a reviewed entity has no
/// summary row, or a validation error from context assembly.
pub fn build_context_with_summaries(
    reviews: Vec<ReviewRecord>,
    summaries: Vec<EntitySummary>,
) -> Result<DataContext, StoreError> {
    let mut by_entity: HashMap<String, EntitySummary> = summaries
        .into_iter()
        .map(|s| (s.entity_id.clone(), s))
        .collect();

    let mut entities: Vec<EntityData> = group_by_entity(reviews)
        .into_iter()
        .map(|(entity_id, reviews)| {
            let summary = by_entity
                .remove(&entity_id)
                .ok_or_else(|| StoreError::MissingSummary(entity_id.clone()))?;
            Ok(EntityData {
                entity_id,
                reviews,
                summary,
            })
        })
        .collect::<Result<_, StoreError>>()?;

    // Entities known only to the summary table carry no reviews but stay
    // eligible for ranking.
    let mut leftovers: Vec<EntityData> = by_entity
        .into_values()
        .map(|summary| EntityData {
            entity_id: summary.entity_id.clone(),
            reviews: Vec::new(),
            summary,
        })
        .collect();
    leftovers.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));
    entities.append(&mut leftovers);

    Ok(DataContext::new(entities)?)
}

#[cfg(test)]
mod tests {
    use milletrec_core::SentimentLabel;

    use super::*;

    fn review(id: u64, entity: &str, rating: u8) -> ReviewRecord {
        ReviewRecord {
            review_id: id,
            entity_id: entity.to_string(),
            rating,
            review_text: "fine".to_string(),
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
    fn build_context_groups_in_first_seen_order() {
        let reviews = vec![
            review(1, "ragi", 4),
            review(2, "foxtail-millet", 5),
            review(3, "ragi", 3),
        ];
        let ctx = build_context(reviews, &AspectAggregator::default()).expect("context");
        let ids: Vec<&str> = ctx.entity_ids().collect();
        assert_eq!(ids, vec!["ragi", "foxtail-millet"]);
        assert_eq!(ctx.entity("ragi").unwrap().reviews.len(), 2);
        let summary = &ctx.entity("ragi").unwrap().summary;
        assert_eq!(summary.review_count, 2);
        assert!((summary.avg_rating.unwrap() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn build_context_with_summaries_uses_precomputed_rows() {
        let reviews = vec![review(1, "ragi", 4)];
        let mut precomputed = EntitySummary::empty("ragi");
        precomputed.review_count = 40;
        precomputed.avg_rating = Some(4.9);

        let ctx =
            build_context_with_summaries(reviews, vec![precomputed.clone()]).expect("context");
        assert_eq!(ctx.entity("ragi").unwrap().summary, precomputed);
    }

    #[test]
    fn build_context_with_summaries_keeps_reviewless_entities() {
        let reviews = vec![review(1, "ragi", 4)];
        let summaries = vec![
            EntitySummary::empty("ragi"),
            EntitySummary::empty("kodo-millet"),
        ];
        let ctx = build_context_with_summaries(reviews, summaries).expect("context");
        assert_eq!(ctx.len(), 2);
        assert!(ctx.entity("kodo-millet").unwrap().reviews.is_empty());
    }

    #[test]
    fn build_context_with_summaries_fails_fast_on_missing_row() {
        let reviews = vec![review(1, "ragi", 4)];
        let err = build_context_with_summaries(reviews, vec![]).unwrap_err();
        assert!(matches!(err, StoreError::MissingSummary(ref id) if id == "ragi"));
    }
}
