//! Repository Ports - 出站端口
//!
//! 定义翻译历史持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// 存储自身的默认历史条数
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 待写入的翻译记录（id 与 created_at 由存储分配）
#[derive(Debug, Clone)]
pub struct NewTranslationRecord {
    pub source_text: String,
    /// 译文或失败标记文本，存储层不区分
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub audio_file: Option<String>,
}

/// 翻译历史记录
///
/// 写入后不可变，没有更新和删除路径
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRecord {
    pub id: i64,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub audio_file: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Translation History Repository Port
#[async_trait]
pub trait TranslationRepositoryPort: Send + Sync {
    /// 追加一条记录，提交后返回分配的 id
    async fn append(&self, record: &NewTranslationRecord) -> Result<i64, RepositoryError>;

    /// 按 id 倒序返回最多 `limit` 条记录
    async fn list_recent(&self, limit: u32) -> Result<Vec<TranslationRecord>, RepositoryError>;

    /// 根据 ID 查找记录
    async fn find_by_id(&self, id: i64) -> Result<Option<TranslationRecord>, RepositoryError>;

    /// 使用存储默认条数的历史查询
    async fn list_recent_default(&self) -> Result<Vec<TranslationRecord>, RepositoryError> {
        self.list_recent(DEFAULT_HISTORY_LIMIT).await
    }
}
