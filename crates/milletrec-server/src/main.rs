mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use milletrec_core::{ConcernCatalog, GoalRuleTable};
use milletrec_engine::{AspectAggregator, KeywordMatcher, ScoreWeights, ScoringEngine};

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = milletrec_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = match &config.concerns_path {
        Some(path) => milletrec_core::load_concerns(path)?,
        None => ConcernCatalog::builtin(),
    };
    let rules = match &config.rules_path {
        Some(path) => milletrec_core::load_goal_rules(path)?,
        None => GoalRuleTable::builtin(),
    };

    let reviews = milletrec_store::load_reviews(&config.reviews_path)?;
    let ctx = match &config.summary_path {
        Some(path) => {
            let summaries = milletrec_store::load_summaries(path)?;
            milletrec_store::build_context_with_summaries(reviews, summaries)?
        }
        None => {
            let aggregator = AspectAggregator::new(config.top_keywords);
            milletrec_store::build_context(reviews, &aggregator)?
        }
    };
    tracing::info!(
        entities = ctx.len(),
        reviews = ctx.review_count(),
        "data context ready"
    );

    let request_log = milletrec_store::RequestLog::open(&config.request_log_path)?;

    let state = AppState {
        ctx: Arc::new(ctx),
        matcher: Arc::new(KeywordMatcher::new(catalog)),
        scorer: Arc::new(ScoringEngine::new(ScoreWeights::default(), rules)),
        request_log: Arc::new(request_log),
        default_top_k: config.default_top_k,
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
