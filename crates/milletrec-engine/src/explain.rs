//! Template-based explanations from score breakdowns.

use crate::types::ScoreBreakdown;

const SENTIMENT_HIGH: f64 = 0.75;
const SENTIMENT_POSITIVE: f64 = 0.6;
const RATING_HIGH: f64 = 4.0;
const HEALTH_MATCH: f64 = 0.5;
const TASTE_PRAISE: f64 = 0.7;
const PREFERENCE_FIT: f64 = 0.6;

/// Build a one-sentence justification from the breakdown.
///
/// Each threshold clause is evaluated independently; every clause that
/// fires is joined with ", and ". Zero firing clauses fall back to a
/// generic balanced-profile sentence. Deterministic template filling, not
/// generation.
#[must_use]
pub fn build_explanation(name: &str, scores: &ScoreBreakdown) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if scores.sentiment_score > SENTIMENT_HIGH {
        reasons.push(format!(
            "it's highly rated by users (avg sentiment: {:.2})",
            scores.sentiment_score
        ));
    } else if scores.sentiment_score > SENTIMENT_POSITIVE {
        reasons.push(format!(
            "it receives generally positive reviews (avg sentiment: {:.2})",
            scores.sentiment_score
        ));
    }

    if scores.rating_score > RATING_HIGH {
        reasons.push(format!(
            "has a high average star rating ({:.1}/5)",
            scores.rating_score
        ));
    }

    if scores.health_score > HEALTH_MATCH {
        reasons.push(format!(
            "matches well with your health focus (score: {:.2})",
            scores.health_score
        ));
    }

    if scores.taste_score > TASTE_PRAISE {
        reasons.push(format!(
            "reviews often praise its taste (avg score: {:.2})",
            scores.taste_score
        ));
    }

    if scores.preference_score > PREFERENCE_FIT {
        reasons.push("fits your other preferences regarding texture/cooking".to_string());
    }

    if reasons.is_empty() {
        format!("{name} offers a balanced profile according to reviews.")
    } else {
        format!("{name} is a good choice because {}.", reasons.join(", and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown() -> ScoreBreakdown {
        ScoreBreakdown {
            sentiment_score: 0.5,
            rating_score: 3.0,
            health_score: 0.0,
            taste_score: 0.5,
            preference_score: 0.25,
            final_score: 0.363,
        }
    }

    #[test]
    fn all_thresholds_below_gives_balanced_fallback() {
        let text = build_explanation("Ragi", &breakdown());
        assert_eq!(text, "Ragi offers a balanced profile according to reviews.");
    }

    #[test]
    fn high_sentiment_clause_cites_score() {
        let mut b = breakdown();
        b.sentiment_score = 0.9;
        let text = build_explanation("Ragi", &b);
        assert!(text.contains("highly rated by users (avg sentiment: 0.90)"));
        assert!(text.starts_with("Ragi is a good choice because"));
    }

    #[test]
    fn moderate_sentiment_uses_generally_positive_phrasing() {
        let mut b = breakdown();
        b.sentiment_score = 0.65;
        let text = build_explanation("Ragi", &b);
        assert!(text.contains("generally positive reviews"));
        assert!(!text.contains("highly rated"));
    }

    #[test]
    fn multiple_clauses_joined_with_and() {
        let mut b = breakdown();
        b.sentiment_score = 0.8;
        b.rating_score = 4.5;
        b.health_score = 0.7;
        let text = build_explanation("Foxtail Millet", &b);
        assert_eq!(text.matches(", and ").count(), 2);
        assert!(text.contains("high average star rating (4.5/5)"));
        assert!(text.contains("matches well with your health focus"));
        assert!(text.ends_with('.'));
    }

    #[test]
    fn threshold_boundaries_are_exclusive() {
        let mut b = breakdown();
        b.sentiment_score = 0.6;
        b.rating_score = 4.0;
        b.health_score = 0.5;
        b.taste_score = 0.7;
        b.preference_score = 0.6;
        let text = build_explanation("Ragi", &b);
        assert_eq!(text, "Ragi offers a balanced profile according to reviews.");
    }

    #[test]
    fn taste_and_preference_clauses_fire() {
        let mut b = breakdown();
        b.taste_score = 0.85;
        b.preference_score = 0.75;
        let text = build_explanation("Kodo Millet", &b);
        assert!(text.contains("praise its taste"));
        assert!(text.contains("texture/cooking"));
    }
}
