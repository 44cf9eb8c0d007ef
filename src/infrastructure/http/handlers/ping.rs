//! Ping Handler
//!
//! 健康检查，同时返回当前使用的翻译与合成服务

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub translator: &'static str,
    pub synthesizer: &'static str,
}

/// GET /api/ping
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        translator: state.translator.name(),
        synthesizer: state.synthesizer.name(),
    })
}
