//! History Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{TranslationRecord, TranslationRepositoryPort};
use crate::application::queries::{GetHistoryEntry, ListHistory};

// ============================================================================
// Response DTOs
// ============================================================================

/// 历史记录条目
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: i64,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub audio_file: Option<String>,
    pub created_at: String,
}

impl From<TranslationRecord> for HistoryEntry {
    fn from(record: TranslationRecord) -> Self {
        Self {
            id: record.id,
            source_text: record.source_text,
            translated_text: record.translated_text,
            source_lang: record.source_lang,
            target_lang: record.target_lang,
            audio_file: record.audio_file,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 历史条数限制
#[derive(Debug, Clone, Copy)]
pub struct HistoryLimits {
    /// 调用方未指定时的条数
    pub default_limit: u32,
    /// 单次查询上限
    pub max_limit: u32,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 500,
        }
    }
}

impl HistoryLimits {
    pub fn resolve(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

/// ListHistory Handler
pub struct ListHistoryHandler {
    translation_repo: Arc<dyn TranslationRepositoryPort>,
    limits: HistoryLimits,
}

impl ListHistoryHandler {
    pub fn new(translation_repo: Arc<dyn TranslationRepositoryPort>, limits: HistoryLimits) -> Self {
        Self {
            translation_repo,
            limits,
        }
    }

    /// 读取失败直接向上传播，历史查询没有降级结果
    pub async fn handle(&self, query: ListHistory) -> Result<Vec<HistoryEntry>, ApplicationError> {
        let limit = self.limits.resolve(query.limit);
        let records = self.translation_repo.list_recent(limit).await?;
        Ok(records.into_iter().map(HistoryEntry::from).collect())
    }
}

/// GetHistoryEntry Handler
pub struct GetHistoryEntryHandler {
    translation_repo: Arc<dyn TranslationRepositoryPort>,
}

impl GetHistoryEntryHandler {
    pub fn new(translation_repo: Arc<dyn TranslationRepositoryPort>) -> Self {
        Self { translation_repo }
    }

    pub async fn handle(&self, query: GetHistoryEntry) -> Result<HistoryEntry, ApplicationError> {
        self.translation_repo
            .find_by_id(query.id)
            .await?
            .map(HistoryEntry::from)
            .ok_or_else(|| ApplicationError::not_found("Translation", query.id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_resolve() {
        let limits = HistoryLimits {
            default_limit: 100,
            max_limit: 500,
        };
        assert_eq!(limits.resolve(None), 100);
        assert_eq!(limits.resolve(Some(3)), 3);
        assert_eq!(limits.resolve(Some(0)), 0);
        assert_eq!(limits.resolve(Some(10_000)), 500);
    }
}
