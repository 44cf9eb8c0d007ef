//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TranslatorProvider, TtsProvider};
use crate::domain::audio::{AudioNamer, MAX_AUDIO_PREFIX_LEN};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "GLASS";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `GLASS_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `GLASS_SERVER__PORT=8080`
/// - `GLASS_TRANSLATOR__PROVIDER=libre`
/// - `GLASS_TRANSLATOR__URL=http://libretranslate:5000`
/// - `GLASS_DATABASE__PATH=/data/translations.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.max_body_bytes", 1024 * 1024)?
        .set_default("translator.provider", "google")?
        .set_default("translator.url", "https://translate.googleapis.com")?
        .set_default("translator.timeout_secs", 30)?
        .set_default("tts.provider", "google")?
        .set_default("tts.url", "https://translate.google.com")?
        .set_default("tts.timeout_secs", 60)?
        .set_default("tts.max_chunk_chars", 100)?
        .set_default("database.path", "data/translations.db")?
        .set_default("database.max_connections", 5)?
        .set_default("storage.audio_dir", "data/audio")?
        .set_default("storage.audio_prefix", "translated")?
        .set_default("history.default_limit", 100)?
        .set_default("history.max_limit", 500)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: GLASS_TTS__PROVIDER=fake
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(invalid("Server port cannot be 0"));
    }

    if config.server.max_body_bytes == 0 {
        return Err(invalid("Server max_body_bytes cannot be 0"));
    }

    if config.translator.provider != TranslatorProvider::Fake
        && config.translator.url.trim().is_empty()
    {
        return Err(invalid("Translator URL cannot be empty"));
    }

    if config.translator.timeout_secs == 0 {
        return Err(invalid("Translator timeout cannot be 0"));
    }

    if config.tts.provider != TtsProvider::Fake && config.tts.url.trim().is_empty() {
        return Err(invalid("TTS URL cannot be empty"));
    }

    if config.tts.timeout_secs == 0 {
        return Err(invalid("TTS timeout cannot be 0"));
    }

    if config.tts.max_chunk_chars == 0 {
        return Err(invalid("TTS max_chunk_chars cannot be 0"));
    }

    if config.database.path.trim().is_empty() {
        return Err(invalid("Database path cannot be empty"));
    }

    if config.database.max_connections == 0 {
        return Err(invalid("Database max_connections cannot be 0"));
    }

    if AudioNamer::new(config.storage.audio_prefix.as_str()).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "Audio prefix {:?} must be a safe file name component of at most {} bytes",
            config.storage.audio_prefix, MAX_AUDIO_PREFIX_LEN
        )));
    }

    if config.history.default_limit > config.history.max_limit {
        return Err(invalid("History default_limit cannot exceed max_limit"));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Audio URL Prefix: {}", config.server.audio_url_prefix());
    tracing::info!("Max Body: {} bytes", config.server.max_body_bytes);
    tracing::info!(
        "Translator: {:?} at {} (timeout {}s)",
        config.translator.provider,
        config.translator.url,
        config.translator.timeout_secs
    );
    tracing::info!(
        "TTS: {:?} at {} (timeout {}s, chunk {} chars)",
        config.tts.provider,
        config.tts.url,
        config.tts.timeout_secs,
        config.tts.max_chunk_chars
    );
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!(
        "History Limit: default {}, max {}",
        config.history.default_limit,
        config.history.max_limit
    );
    if config.server.static_files.enabled {
        tracing::info!(
            "Static Files: {:?} at {}",
            config.server.static_files.dir,
            config.server.static_files.path
        );
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
