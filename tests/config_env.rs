//! Env-driven app wiring: config path, lexicon override and the debug-route gate.
//! These tests mutate process env, so they run serially.

use std::path::PathBuf;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serial_test::serial;
use tower::ServiceExt;

use sentiment_dashboard::config::{ENV_CONFIG_PATH, ENV_LEXICON_PATH};
use sentiment_dashboard::{EngineConfig, Sentiment, ENV_DEBUG_ROUTES};

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}_{}", std::process::id(), name));
    std::fs::write(&path, content).expect("write temp file");
    path
}

fn reset_env() {
    std::env::remove_var(ENV_CONFIG_PATH);
    std::env::remove_var(ENV_LEXICON_PATH);
    std::env::remove_var(ENV_DEBUG_ROUTES);
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header("content-type", "application/json");
    }
    let req = req
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    // axum::body::to_bytes requires an explicit limit
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap(); // 1 MiB
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[test]
#[serial]
fn config_path_from_env_is_used() {
    reset_env();
    let path = write_temp("limits.toml", "[limits]\nmax_batch = 5\nmin_chars = 2\n");
    std::env::set_var(ENV_CONFIG_PATH, &path);

    let cfg = EngineConfig::from_env().expect("config from env");
    assert_eq!(cfg.limits.max_batch, 5);
    assert_eq!(cfg.limits.min_chars, 2);
    assert_eq!(cfg.limits.max_chars, 10_000, "unset keys keep defaults");
    reset_env();
}

#[test]
#[serial]
fn missing_config_file_falls_back_to_defaults() {
    reset_env();
    std::env::set_var(ENV_CONFIG_PATH, "/definitely/not/here/sentiment.toml");
    let cfg = EngineConfig::from_env().expect("defaults");
    assert_eq!(cfg, EngineConfig::default());
    reset_env();
}

#[test]
#[serial]
fn invalid_config_fails_app_startup() {
    reset_env();
    let path = write_temp("bad.toml", "[limits]\nmin_chars = 0\n");
    std::env::set_var(ENV_CONFIG_PATH, &path);
    assert!(sentiment_dashboard::app().is_err());
    reset_env();
}

#[test]
#[serial]
fn lexicon_path_env_extends_builtin_tables() {
    reset_env();
    let lex = write_temp(
        "lexicon.toml",
        "extend = true\nstrong_positive = [\"stellar\"]\n\n[positive]\nwords = [\"stellar\"]\n",
    );
    std::env::set_var(ENV_LEXICON_PATH, &lex);

    let cfg = EngineConfig::from_env().expect("config");
    assert_eq!(cfg.lexicon.path.as_deref(), Some(lex.as_path()));
    let engine = cfg.build_engine().expect("engine");
    let top = engine.analyze_sentiment("a stellar little kitchen").top();
    assert_eq!(top.sentiment, Sentiment::Positive);
    // built-ins are still there
    assert_eq!(
        engine.analyze_sentiment("I hate it").top().sentiment,
        Sentiment::Negative
    );
    reset_env();
}

#[tokio::test]
#[serial]
async fn limits_from_config_reach_the_http_layer() {
    reset_env();
    let path = write_temp("http_limits.toml", "[limits]\nmax_batch = 2\n");
    std::env::set_var(ENV_CONFIG_PATH, &path);
    let app = sentiment_dashboard::app().expect("app");

    let (status, body) = call(
        &app,
        "POST",
        "/batch",
        Some(r#"{"texts":["one text","two text","three text"]}"#),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{body}");
    assert!(body.contains("Maximum 2 texts"));
    reset_env();
}

#[tokio::test]
#[serial]
async fn debug_routes_are_gated() {
    reset_env();
    let app = sentiment_dashboard::app().expect("app");
    let (status, _) = call(&app, "GET", "/debug/calibration", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    reset_env();
}

#[tokio::test]
#[serial]
async fn debug_and_metrics_endpoints_when_enabled() {
    reset_env();
    std::env::set_var(ENV_DEBUG_ROUTES, "1");
    let app = sentiment_dashboard::app().expect("app");

    let (status, body) = call(&app, "GET", "/debug/calibration", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("score_floor"));

    let (status, body) = call(&app, "GET", "/debug/normalize?text=not%20good%21%21", None).await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["flags"]["negation"], true);
    assert!(v["tagged"].as_str().unwrap().starts_with("NOT_good"));

    let (status, _) = call(&app, "POST", "/analyze", Some(r#"{"text":"I love this"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, text) = call(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    for needle in [
        "sentiment_analyses_total",
        "sentiment_analyze_duration_ms",
        "sentiment_history_size",
    ] {
        assert!(text.contains(needle), "missing {needle} in /metrics:\n{text}");
    }
    reset_env();
}
