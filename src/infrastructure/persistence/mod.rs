//! Persistence Layer - 数据持久化
//!
//! SQLite 翻译历史存储

pub mod sqlite;

pub use self::sqlite::SqliteTranslationRepository;
