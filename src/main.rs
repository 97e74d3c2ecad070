//! Sentiment dashboard service: binary entrypoint.
//! Boots the Axum HTTP server on Shuttle with the library's router.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sentiment_dashboard::debug::ENV_DEV_LOG;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - SENTIMENT_DEV_LOG=1
fn enable_dev_tracing() {
    if !sentiment_dashboard::debug::dev_logging_enabled() {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentiment=debug,info"));

    // The host may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
    tracing::info!(flag = ENV_DEV_LOG, "dev tracing enabled");
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables SENTIMENT_CONFIG_PATH / SENTIMENT_LEXICON_PATH / DEBUG_ROUTES from .env.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let router = sentiment_dashboard::app()?;
    Ok(router.into())
}
