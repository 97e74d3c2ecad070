//! Debug endpoints: inspect normalization, features and the active calibration.
//! Mount with e.g. `app.merge(analyze::debug::router(engine))` in dev only.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use shuttle_axum::axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use super::{Calibration, FeatureVector, Marker, SentimentEngine, Token};
use crate::sentiment::ScoreDistribution;

#[derive(Debug, Serialize)]
pub struct FlagsOut {
    pub negation: bool,
    pub intensifier: bool,
    pub diminisher: bool,
    pub markers: BTreeSet<Marker>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeOut {
    pub tagged: String,
    pub tokens: Vec<Token>,
    pub flags: FlagsOut,
    pub features: FeatureVector,
    pub distribution: ScoreDistribution,
}

pub fn router(engine: SentimentEngine) -> Router {
    Router::new()
        .route("/debug/normalize", get(get_normalize))
        .route("/debug/calibration", get(get_calibration))
        .with_state(engine)
}

/// GET /debug/normalize?text=...
async fn get_normalize(
    State(engine): State<SentimentEngine>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<NormalizeOut> {
    let text = q.get("text").map(String::as_str).unwrap_or_default();
    let a = engine.analyze(text);

    Json(NormalizeOut {
        tagged: a.normalized.tagged(),
        flags: FlagsOut {
            negation: a.normalized.has_negation(),
            intensifier: a.normalized.has_intensifier(),
            diminisher: a.normalized.has_diminisher(),
            markers: a.normalized.markers(),
        },
        tokens: a.normalized.tokens().to_vec(),
        features: a.features,
        distribution: a.distribution,
    })
}

async fn get_calibration(State(engine): State<SentimentEngine>) -> Json<Calibration> {
    Json(*engine.calibration())
}
