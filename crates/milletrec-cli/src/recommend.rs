//! One-shot recommendation runs from the command line.

use std::path::Path;

use chrono::Utc;

use milletrec_engine::{
    AspectAggregator, KeywordMatcher, RecommendationSession, ScoreWeights, ScoringEngine,
    TexturePreference, UserPreferences,
};
use milletrec_store::RequestLogEntry;

/// Score the catalog for the given concerns and print the top picks.
///
/// Unless `--no-log` is passed, the run is appended to the recommendation
/// log exactly like a server request would be.
///
/// # Errors
///
/// Returns an error if the dataset or content files cannot be loaded, the
/// texture preference is unrecognized, or the log append fails.
pub(crate) fn run(
    concerns: &[String],
    goal: Option<String>,
    texture: &str,
    top_k: usize,
    reviews_override: Option<&Path>,
    no_log: bool,
) -> anyhow::Result<()> {
    let config = milletrec_core::load_app_config()?;
    let reviews_path = reviews_override.unwrap_or(&config.reviews_path);

    let catalog = match &config.concerns_path {
        Some(path) => milletrec_core::load_concerns(path)?,
        None => milletrec_core::ConcernCatalog::builtin(),
    };
    let rules = match &config.rules_path {
        Some(path) => milletrec_core::load_goal_rules(path)?,
        None => milletrec_core::GoalRuleTable::builtin(),
    };

    let texture_preference = parse_texture(texture)?;

    let reviews = milletrec_store::load_reviews(reviews_path)?;
    let ctx = milletrec_store::build_context(reviews, &AspectAggregator::new(config.top_keywords))?;

    let matcher = KeywordMatcher::new(catalog);
    let scorer = ScoringEngine::new(ScoreWeights::default(), rules);
    let session = RecommendationSession::new(&ctx, &matcher, &scorer);

    let mut preferences = UserPreferences::for_concerns(concerns.to_vec());
    preferences.health_goal = goal;
    preferences.texture_preference = texture_preference;

    let outcome = session.recommend(&preferences, top_k);

    if outcome.recommendations.is_empty() {
        println!("no candidates available; is the review dataset empty?");
        return Ok(());
    }

    println!(
        "{:<20}{:<10}{:<12}EXPLANATION",
        "MILLET", "SCORE", "RELEVANCE"
    );
    for rec in &outcome.recommendations {
        println!(
            "{:<20}{:<10.3}{:<12.2}{}",
            rec.display_name, rec.final_score, rec.relevance_score, rec.explanation
        );
    }

    if !no_log {
        let log = milletrec_store::RequestLog::open(&config.request_log_path)?;
        log.append(&RequestLogEntry {
            timestamp: Utc::now(),
            request_id: uuid::Uuid::new_v4().to_string(),
            raw_input: serde_json::json!({
                "source": "cli",
                "concerns": concerns,
                "top_k": top_k,
            }),
            parsed_preferences: preferences,
            candidate_scores: outcome.candidate_scores,
            top_recommendations: outcome.recommendations,
        })?;
    }

    Ok(())
}

fn parse_texture(value: &str) -> anyhow::Result<TexturePreference> {
    match value {
        "mentioned" => Ok(TexturePreference::Mentioned),
        "not_mentioned" => Ok(TexturePreference::NotMentioned),
        "any" => Ok(TexturePreference::Any),
        other => anyhow::bail!(
            "unrecognized texture preference '{other}'; expected mentioned, not_mentioned, or any"
        ),
    }
}
