//! Translate Handler

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::application::{ApplicationError, TranslateText};
use crate::domain::translation::TranslationRequest;
use crate::infrastructure::http::dto::{TranslateTextRequest, TranslateTextResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /translate
///
/// 不要求 Content-Type，请求体按 JSON 解析
pub async fn translate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranslateTextResponse>, ApiError> {
    let req: TranslateTextRequest = if body.iter().all(u8::is_ascii_whitespace) {
        TranslateTextRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };

    let request = TranslationRequest::new(
        req.text.as_deref(),
        req.src_lang.as_deref(),
        req.tgt_lang.as_deref(),
    )
    .map_err(ApplicationError::from)?;

    let result = state
        .translate_handler
        .handle(TranslateText { request })
        .await;

    Ok(Json(TranslateTextResponse {
        translated_text: result.translated_text(),
        audio_url: result.audio.as_ref().map(|name| state.audio_url(name.as_str())),
    }))
}
