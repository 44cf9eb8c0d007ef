//! GlassTranslate - 翻译 + 语音合成 Web 服务
//!
//! 组装顺序: 配置 → 日志 → SQLite → 外部服务客户端 → 应用状态 → HTTP 服务器

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glasstranslate::application::{HistoryLimits, SpeechSynthesizerPort, TranslatorPort};
use glasstranslate::config::{
    load_config, print_config, AppConfig, LogConfig, TranslatorProvider, TtsProvider,
};
use glasstranslate::domain::audio::AudioNamer;
use glasstranslate::infrastructure::adapters::{
    FakeTranslator, FakeTtsClient, FileAudioStorage, GoogleTranslateClient,
    GoogleTranslateClientConfig, GoogleTtsClient, GoogleTtsClientConfig, LibreTranslateClient,
    LibreTranslateClientConfig,
};
use glasstranslate::infrastructure::http::{AppState, HttpServer};
use glasstranslate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteTranslationRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().context("Failed to load config")?;

    init_tracing(&config.log);

    tracing::info!("GlassTranslate v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        max_connections: config.database.max_connections,
        ..DatabaseConfig::new(&config.database.path)
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;
    let translation_repo = Arc::new(SqliteTranslationRepository::new(pool));

    let audio_storage = Arc::new(
        FileAudioStorage::new(&config.storage.audio_dir)
            .await
            .context("Failed to prepare audio directory")?,
    );

    let translator = build_translator(&config)?;
    let synthesizer = build_synthesizer(&config)?;
    tracing::info!(
        translator = translator.name(),
        synthesizer = synthesizer.name(),
        "External services configured"
    );

    let namer = AudioNamer::new(config.storage.audio_prefix.as_str())?;
    let history_limits = HistoryLimits {
        default_limit: config.history.default_limit,
        max_limit: config.history.max_limit,
    };

    let state = AppState::new(
        translator,
        synthesizer,
        audio_storage,
        translation_repo,
        namer,
        history_limits,
        config.server.audio_url_prefix(),
    );

    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，RUST_LOG 优先于配置文件中的级别
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},glasstranslate={},tower_http=debug", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_translator(config: &AppConfig) -> anyhow::Result<Arc<dyn TranslatorPort>> {
    let translator = &config.translator;
    let port: Arc<dyn TranslatorPort> = match translator.provider {
        TranslatorProvider::Google => Arc::new(GoogleTranslateClient::new(
            GoogleTranslateClientConfig {
                base_url: translator.url.clone(),
                timeout_secs: translator.timeout_secs,
            },
        )?),
        TranslatorProvider::Libre => Arc::new(LibreTranslateClient::new(
            LibreTranslateClientConfig {
                base_url: translator.url.clone(),
                api_key: translator.api_key.clone(),
                timeout_secs: translator.timeout_secs,
            },
        )?),
        TranslatorProvider::Fake => Arc::new(FakeTranslator::echo()),
    };
    Ok(port)
}

fn build_synthesizer(config: &AppConfig) -> anyhow::Result<Arc<dyn SpeechSynthesizerPort>> {
    let tts = &config.tts;
    let port: Arc<dyn SpeechSynthesizerPort> = match tts.provider {
        TtsProvider::Google => Arc::new(GoogleTtsClient::new(GoogleTtsClientConfig {
            base_url: tts.url.clone(),
            timeout_secs: tts.timeout_secs,
            max_chunk_chars: tts.max_chunk_chars,
        })?),
        TtsProvider::Fake => match &tts.fake_audio_path {
            Some(path) => Arc::new(
                FakeTtsClient::from_file(path)
                    .with_context(|| format!("Failed to read fake audio {}", path.display()))?,
            ),
            None => Arc::new(FakeTtsClient::new()),
        },
    };
    Ok(port)
}
