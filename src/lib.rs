// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod compare;
pub mod config;
pub mod debug;
pub mod explain;
pub mod export;
pub mod history;
pub mod lexicon;
pub mod metrics;
pub mod result;
pub mod sentiment;
pub mod service;
pub mod upload;
pub mod validate;

// Lexicon engine: normalize -> features -> scores, keywords, debug routes
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::analyze::SentimentEngine;
pub use crate::api::{create_router, AppState};
pub use crate::config::EngineConfig;
pub use crate::result::{BatchAnalysisResult, SentimentResult, Source};
pub use crate::sentiment::{ScoreDistribution, Sentiment};
pub use crate::service::SentimentService;

use axum::Router;
use tracing::info;

/// Env gate for `/debug/*` and `/metrics`.
pub const ENV_DEBUG_ROUTES: &str = "DEBUG_ROUTES";

/// Build the full application router from env/config.
/// Debug and metrics routes are mounted only with `DEBUG_ROUTES=1`.
pub fn app() -> anyhow::Result<Router> {
    let cfg = EngineConfig::from_env()?;
    let service = SentimentService::from_config(&cfg)?;
    let metrics = crate::metrics::Metrics::init();

    let debug_routes = std::env::var(ENV_DEBUG_ROUTES).ok().as_deref() == Some("1");
    let engine = service.engine().clone();
    let mut router = create_router(AppState::new(service));
    if debug_routes {
        info!("debug routes enabled");
        router = router
            .merge(analyze::debug::router(engine))
            .merge(metrics.router());
    }
    Ok(router)
}
