//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::HistoryEntry;

// ============================================================================
// Translate DTOs
// ============================================================================

/// POST /translate 请求体
///
/// 所有字段都是可选的，缺失的 text 由领域层校验后返回 400
#[derive(Debug, Default, Deserialize)]
pub struct TranslateTextRequest {
    pub text: Option<String>,
    pub src_lang: Option<String>,
    pub tgt_lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateTextResponse {
    /// 译文；翻译失败时为 `[Translation error: ...]`
    pub translated_text: String,
    /// 合成失败时为 null
    pub audio_url: Option<String>,
}

// ============================================================================
// History DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryDto {
    pub id: i64,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub audio_file: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: String,
}

impl HistoryEntryDto {
    pub fn from_entry(entry: HistoryEntry, audio_url: Option<String>) -> Self {
        Self {
            id: entry.id,
            source_text: entry.source_text,
            translated_text: entry.translated_text,
            source_lang: entry.source_lang,
            target_lang: entry.target_lang,
            audio_file: entry.audio_file,
            audio_url,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// 按 id 倒序
    pub history: Vec<HistoryEntryDto>,
}
