//! HTTP Routes
//!
//! API Endpoints:
//! - /translate              POST  翻译并合成语音
//! - /history                GET   最近的翻译记录（?limit=N）
//! - /history/:id            GET   单条翻译记录
//! - /audio/:name            GET   获取合成音频
//! - /static/audio/:name     GET   同上（旧路径）
//! - /api/ping               GET   健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/translate", post(handlers::translate))
        .route("/history", get(handlers::list_history))
        .route("/history/:id", get(handlers::get_history_entry))
        .route("/audio/:name", get(handlers::get_audio))
        .route("/static/audio/:name", get(handlers::get_audio))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/ping", get(handlers::ping))
}
