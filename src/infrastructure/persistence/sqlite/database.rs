//! SQLite Database - 数据库连接和迁移

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径，None 表示内存数据库
    pub path: Option<PathBuf>,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("data/translations.db")
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            max_connections: 5,
        }
    }

    /// 内存数据库：每个连接都是独立的库，所以只允许一个连接
    pub fn in_memory() -> Self {
        Self {
            path: None,
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);

    let options = match &config.path {
        // 路径直接交给 SQLite，不经过 URL 解析
        Some(path) => SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            // WAL 模式：读者不会看到写到一半的行，也不阻塞写者
            .journal_mode(SqliteJournalMode::Wal),
        None => {
            // 连接被回收时内存库随之消失
            pool_options = pool_options
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
            SqliteConnectOptions::from_str(IN_MEMORY_URL)?
        }
    };

    // busy_timeout 通过连接选项设置，池中每个连接都生效
    let options = options
        .busy_timeout(Duration::from_millis(5000))
        .synchronous(SqliteSynchronous::Full);

    let pool = pool_options.connect_with(options).await?;

    let location = match &config.path {
        Some(path) => path.display().to_string(),
        None => IN_MEMORY_URL.to_string(),
    };
    tracing::info!(
        path = %location,
        max_connections = config.max_connections,
        "SQLite pool created"
    );

    Ok(pool)
}

/// 运行数据库迁移
///
/// 表结构与旧版 Flask 应用的 translations.db 兼容
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_text TEXT NOT NULL,
            translated_text TEXT NOT NULL,
            source_lang TEXT NOT NULL,
            target_lang TEXT NOT NULL,
            audio_file TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}
