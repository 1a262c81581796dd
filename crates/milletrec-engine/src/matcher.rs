//! Trigger-keyword matching of review text against health concerns.

use milletrec_core::{ConcernCatalog, ReviewRecord};

/// Case-insensitive substring matcher over the concern catalog.
///
/// Stateless beyond the catalog itself; unknown concerns have an empty
/// trigger set and therefore never match.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    catalog: ConcernCatalog,
}

impl KeywordMatcher {
    #[must_use]
    pub fn new(catalog: ConcernCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &ConcernCatalog {
        &self.catalog
    }

    /// Whether any trigger for the concern appears in the text.
    ///
    /// Empty text never matches; unknown concerns never match.
    #[must_use]
    pub fn matches(&self, text: &str, concern: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let haystack = text.to_lowercase();
        self.catalog
            .triggers(concern)
            .iter()
            .any(|trigger| !trigger.is_empty() && haystack.contains(trigger.as_str()))
    }

    /// Count reviews whose text matches the concern.
    ///
    /// A review containing several triggers for the concern counts once.
    #[must_use]
    pub fn count_matches(&self, reviews: &[ReviewRecord], concern: &str) -> usize {
        reviews
            .iter()
            .filter(|r| self.matches(&r.review_text, concern))
            .count()
    }

    /// Sum per-trigger review matches for the concern.
    ///
    /// Unlike [`count_matches`](Self::count_matches), a review containing
    /// two distinct triggers counts twice — this is the quantity the
    /// relevance score normalizes.
    #[must_use]
    pub fn count_trigger_hits(&self, reviews: &[ReviewRecord], concern: &str) -> usize {
        let triggers = self.catalog.triggers(concern);
        if triggers.is_empty() {
            return 0;
        }

        reviews
            .iter()
            .filter(|r| !r.review_text.is_empty())
            .map(|r| {
                let haystack = r.review_text.to_lowercase();
                triggers
                    .iter()
                    .filter(|t| !t.is_empty() && haystack.contains(t.as_str()))
                    .count()
            })
            .sum()
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(ConcernCatalog::builtin())
    }
}
