//! SQLite Translation History Repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{
    NewTranslationRecord, RepositoryError, TranslationRecord, TranslationRepositoryPort,
};

/// 旧版数据使用的无时区 ISO 时间格式
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// SQLite Translation Repository
pub struct SqliteTranslationRepository {
    pool: DbPool,
}

impl SqliteTranslationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// 旧库的列允许 NULL，读取时按空字符串处理
#[derive(FromRow)]
struct TranslationRow {
    id: i64,
    source_text: Option<String>,
    translated_text: Option<String>,
    source_lang: Option<String>,
    target_lang: Option<String>,
    audio_file: Option<String>,
    created_at: Option<String>,
}

impl TryFrom<TranslationRow> for TranslationRecord {
    type Error = RepositoryError;

    fn try_from(row: TranslationRow) -> Result<Self, Self::Error> {
        let created_at = row.created_at.ok_or_else(|| {
            RepositoryError::SerializationError(format!("Record {} has no created_at", row.id))
        })?;

        Ok(TranslationRecord {
            id: row.id,
            source_text: row.source_text.unwrap_or_default(),
            translated_text: row.translated_text.unwrap_or_default(),
            source_lang: row.source_lang.unwrap_or_default(),
            target_lang: row.target_lang.unwrap_or_default(),
            audio_file: row.audio_file.filter(|f| !f.is_empty()),
            created_at: parse_created_at(&created_at)?,
        })
    }
}

/// 解析 RFC 3339 时间，兼容旧版写入的无时区 UTC 时间
fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::SerializationError(format!("{}: {}", raw, e)))
}

#[async_trait]
impl TranslationRepositoryPort for SqliteTranslationRepository {
    async fn append(&self, record: &NewTranslationRecord) -> Result<i64, RepositoryError> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let result = sqlx::query(
            r#"
            INSERT INTO translations
                (source_text, translated_text, source_lang, target_lang, audio_file, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.source_text)
        .bind(&record.translated_text)
        .bind(&record.source_lang)
        .bind(&record.target_lang)
        .bind(&record.audio_file)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let id = result.last_insert_rowid();

        tracing::debug!(id, "Translation record appended");

        Ok(id)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<TranslationRecord>, RepositoryError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let rows: Vec<TranslationRow> = sqlx::query_as(
            r#"
            SELECT id, source_text, translated_text, source_lang, target_lang, audio_file, created_at
            FROM translations
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(TranslationRecord::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TranslationRecord>, RepositoryError> {
        let row: Option<TranslationRow> = sqlx::query_as(
            r#"
            SELECT id, source_text, translated_text, source_lang, target_lang, audio_file, created_at
            FROM translations
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(TranslationRecord::try_from).transpose()
    }
}
