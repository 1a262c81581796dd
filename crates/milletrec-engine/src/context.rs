//! Read-only per-process data context.
//!
//! The review and summary tables are loaded once at startup and shared
//! by reference with every session; no request mutates them. This replaces
//! hidden module-global state with an explicitly constructed value that
//! tests can build from synthetic tables.

use milletrec_core::ReviewRecord;

use crate::error::EngineError;
use crate::types::EntitySummary;

/// Reviews plus their aggregated summary for one millet variety.
#[derive(Debug, Clone)]
pub struct EntityData {
    pub entity_id: String,
    pub reviews: Vec<ReviewRecord>,
    pub summary: EntitySummary,
}

/// The full catalog: one [`EntityData`] per variety, in first-seen dataset
/// order. That order is what ranking ties preserve.
#[derive(Debug, Clone)]
pub struct DataContext {
    entities: Vec<EntityData>,
}

impl DataContext {
    /// Assemble a context, rejecting inconsistent input.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` on duplicate entity ids, a summary whose
    /// entity id differs from its reviews', or a review filed under the
    /// wrong entity.
    pub fn new(entities: Vec<EntityData>) -> Result<Self, EngineError> {
        let mut seen = std::collections::HashSet::new();

        for entity in &entities {
            if !seen.insert(entity.entity_id.clone()) {
                return Err(EngineError::DuplicateEntity(entity.entity_id.clone()));
            }

            if entity.summary.entity_id != entity.entity_id {
                return Err(EngineError::MismatchedSummary {
                    summary: entity.summary.entity_id.clone(),
                    reviews: entity.entity_id.clone(),
                });
            }

            for review in &entity.reviews {
                if review.entity_id != entity.entity_id {
                    return Err(EngineError::MisassignedReview {
                        review_id: review.review_id,
                        expected: entity.entity_id.clone(),
                        actual: review.entity_id.clone(),
                    });
                }
            }
        }

        Ok(Self { entities })
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityData] {
        &self.entities
    }

    #[must_use]
    pub fn entity(&self, entity_id: &str) -> Option<&EntityData> {
        self.entities.iter().find(|e| e.entity_id == entity_id)
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.entity_id.as_str())
    }

    /// Total review rows across all entities.
    #[must_use]
    pub fn review_count(&self) -> usize {
        self.entities.iter().map(|e| e.reviews.len()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use milletrec_core::SentimentLabel;

    use super::*;

    fn review(id: u64, entity: &str) -> ReviewRecord {
        ReviewRecord {
            review_id: id,
            entity_id: entity.to_string(),
            rating: 4,
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

    fn entity(id: &str, reviews: Vec<ReviewRecord>) -> EntityData {
        EntityData {
            entity_id: id.to_string(),
            summary: EntitySummary::empty(id),
            reviews,
        }
    }

    #[test]
    fn new_accepts_consistent_entities() {
        let ctx = DataContext::new(vec![
            entity("ragi", vec![review(1, "ragi")]),
            entity("kodo-millet", vec![]),
        ])
        .expect("context");
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.review_count(), 1);
        assert!(ctx.entity("ragi").is_some());
        assert!(ctx.entity("unknown").is_none());
    }

    #[test]
    fn new_rejects_duplicate_entity() {
        let err = DataContext::new(vec![entity("ragi", vec![]), entity("ragi", vec![])])
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateEntity(ref id) if id == "ragi"));
    }

    #[test]
    fn new_rejects_misassigned_review() {
        let err =
            DataContext::new(vec![entity("ragi", vec![review(9, "kodo-millet")])]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MisassignedReview { review_id: 9, .. }
        ));
    }

    #[test]
    fn new_rejects_mismatched_summary() {
        let bad = EntityData {
            entity_id: "ragi".to_string(),
            summary: EntitySummary::empty("kodo-millet"),
            reviews: vec![],
        };
        let err = DataContext::new(vec![bad]).unwrap_err();
        assert!(matches!(err, EngineError::MismatchedSummary { .. }));
    }

    #[test]
    fn entities_preserve_insertion_order() {
        let ctx = DataContext::new(vec![
            entity("b-millet", vec![]),
            entity("a-millet", vec![]),
        ])
        .expect("context");
        let ids: Vec<&str> = ctx.entity_ids().collect();
        assert_eq!(ids, vec!["b-millet", "a-millet"]);
    }
}
