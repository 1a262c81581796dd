//! Per-entity review statistics report.

use std::path::Path;

use chrono::Utc;

use milletrec_engine::{AspectAggregator, EntityData};

/// Print a markdown report of review statistics, for the whole catalog or
/// a single entity.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the requested
/// entity is not in it.
pub(crate) fn run(entity_filter: Option<&str>, reviews_override: Option<&Path>) -> anyhow::Result<()> {
    let config = milletrec_core::load_app_config()?;
    let reviews_path = reviews_override.unwrap_or(&config.reviews_path);

    let reviews = milletrec_store::load_reviews(reviews_path)?;
    let ctx = milletrec_store::build_context(reviews, &AspectAggregator::new(config.top_keywords))?;

    if ctx.is_empty() {
        println!("no reviews loaded; nothing to report");
        return Ok(());
    }

    let entities: Vec<&EntityData> = match entity_filter {
        Some(slug) => {
            let entity = ctx
                .entity(slug)
                .ok_or_else(|| anyhow::anyhow!("entity '{slug}' not found in dataset"))?;
            vec![entity]
        }
        None => ctx.entities().iter().collect(),
    };

    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");
    let filter_label = entity_filter.unwrap_or("All millets");

    println!("# Millet Review Report");
    println!();
    println!("**Generated**: {now}");
    println!("**Filter**: {filter_label}");
    println!();
    println!("---");
    println!();
    println!("| Millet | Reviews | Avg Rating | Positive % | Top Keywords |");
    println!("|--------|---------|------------|------------|--------------|");

    for entity in entities {
        let summary = &entity.summary;
        let avg_rating = summary
            .avg_rating
            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        let positive_pct = summary
            .sentiment_distribution
            .map_or_else(|| "-".to_string(), |d| format!("{:.1}", d.positive_pct));
        let keywords = if summary.top_keywords.is_empty() {
            "-".to_string()
        } else {
            summary.top_keywords.join(", ")
        };
        println!(
            "| {} | {} | {} | {} | {} |",
            milletrec_core::display_name(&entity.entity_id),
            summary.review_count,
            avg_rating,
            positive_pct,
            keywords
        );
    }

    Ok(())
}
