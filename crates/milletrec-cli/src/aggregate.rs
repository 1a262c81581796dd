//! Offline aggregation: review dataset → per-entity summary table.

use std::path::Path;

use milletrec_engine::AspectAggregator;

/// Build the summary table and write it as JSON Lines.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the output cannot
/// be written.
pub(crate) fn run(reviews_override: Option<&Path>, out: &Path) -> anyhow::Result<()> {
    let config = milletrec_core::load_app_config()?;
    let reviews_path = reviews_override.unwrap_or(&config.reviews_path);

    let reviews = milletrec_store::load_reviews(reviews_path)?;
    let aggregator = AspectAggregator::new(config.top_keywords);
    let ctx = milletrec_store::build_context(reviews, &aggregator)?;

    let summaries: Vec<_> = ctx
        .entities()
        .iter()
        .map(|entity| entity.summary.clone())
        .collect();
    milletrec_store::write_summaries(out, &summaries)?;

    println!(
        "aggregated {} reviews into {} entity summaries at {}",
        ctx.review_count(),
        summaries.len(),
        out.display()
    );
    Ok(())
}
