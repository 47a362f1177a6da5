//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/statsz`  : live connection stats (total + per-room counts)

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use convoy_core::model::now_ms;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStats {
    pub total_connections: usize,
    pub room_connections: BTreeMap<String, usize>,
    pub timestamp: u64,
}

pub async fn statsz(State(state): State<AppState>) -> impl IntoResponse {
    let core = state.core();
    let stats = GatewayStats {
        total_connections: core.registry.total_connections(),
        room_connections: core.grouping.room_counts().into_iter().collect(),
        timestamp: now_ms(),
    };
    Json(stats)
}
