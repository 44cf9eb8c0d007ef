//! 端到端 HTTP 测试：完整路由 + 内存 SQLite + 临时音频目录 + fake 外部服务

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::util::ServiceExt;

use super::{AppState, HttpServer};
use crate::application::{HistoryLimits, SpeechSynthesizerPort, TranslatorPort};
use crate::config::ServerConfig;
use crate::domain::audio::AudioNamer;
use crate::infrastructure::adapters::{FakeTranslator, FakeTtsClient, FileAudioStorage};
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, DbPool, SqliteTranslationRepository,
};

struct TestApp {
    router: Router,
    audio_dir: TempDir,
}

async fn migrated_pool() -> DbPool {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

async fn spawn_app_with(
    translator: Arc<dyn TranslatorPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    server_config: ServerConfig,
) -> TestApp {
    spawn_app_on(migrated_pool().await, translator, synthesizer, server_config).await
}

async fn spawn_app_on(
    pool: DbPool,
    translator: Arc<dyn TranslatorPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    server_config: ServerConfig,
) -> TestApp {
    let audio_dir = tempdir().unwrap();

    let state = AppState::new(
        translator,
        synthesizer,
        Arc::new(FileAudioStorage::new(audio_dir.path()).await.unwrap()),
        Arc::new(SqliteTranslationRepository::new(pool)),
        AudioNamer::default(),
        HistoryLimits {
            default_limit: 100,
            max_limit: 3,
        },
        server_config.audio_url_prefix(),
    );

    TestApp {
        router: HttpServer::new(server_config, state).router(),
        audio_dir,
    }
}

async fn spawn_app() -> TestApp {
    spawn_app_with(
        Arc::new(FakeTranslator::echo()),
        Arc::new(FakeTtsClient::new()),
        ServerConfig::default(),
    )
    .await
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_translate(&self, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/translate")
            .body(body.into())
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn history(&self) -> Vec<Value> {
        let (status, json) = self.get_json("/history").await;
        assert_eq!(status, StatusCode::OK);
        json["history"].as_array().unwrap().clone()
    }
}

#[tokio::test]
async fn test_translate_hello_to_french() {
    let app = spawn_app().await;

    let (status, json) = app
        .post_translate(json!({"text": "hello", "src_lang": "auto", "tgt_lang": "fr"}).to_string())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["translated_text"], "[fr] hello");

    let audio_url = json["audio_url"].as_str().unwrap();
    assert!(audio_url.starts_with("/audio/translated_"));
    assert!(audio_url.ends_with(".mp3"));

    // 音频可取回
    let (status, bytes) = app.get(audio_url).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!bytes.is_empty());

    // 旧路径同样可用
    let legacy = audio_url.replacen("/audio/", "/static/audio/", 1);
    assert_eq!(app.get(&legacy).await.0, StatusCode::OK);

    let history = app.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["source_text"], "hello");
    assert_eq!(history[0]["translated_text"], "[fr] hello");
    assert_eq!(history[0]["source_lang"], "auto");
    assert_eq!(history[0]["target_lang"], "fr");
    assert_eq!(history[0]["audio_url"], audio_url);
    assert!(history[0]["created_at"].as_str().is_some());
}

#[tokio::test]
async fn test_language_defaults_apply() {
    let app = spawn_app().await;

    let (status, json) = app.post_translate(r#"{"text": "  hola  "}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["translated_text"], "[en] hola");

    let history = app.history().await;
    assert_eq!(history[0]["source_text"], "hola");
    assert_eq!(history[0]["source_lang"], "auto");
    assert_eq!(history[0]["target_lang"], "en");
}

#[tokio::test]
async fn test_empty_text_is_rejected_without_history() {
    let app = spawn_app().await;

    for body in [r#"{"text": "   "}"#, r#"{"src_lang": "en"}"#, ""] {
        let (status, json) = app.post_translate(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errno"], 400);
        assert_eq!(json["error"], "No text provided");
    }

    assert!(app.history().await.is_empty());
}

#[tokio::test]
async fn test_unparsable_body_is_rejected() {
    let app = spawn_app().await;

    let (status, json) = app.post_translate("text=hello").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));

    assert!(app.history().await.is_empty());
}

#[tokio::test]
async fn test_content_type_is_not_required() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"text": "hello"}"#))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_translator_failure_becomes_marker() {
    let app = spawn_app_with(
        Arc::new(FakeTranslator::failing("quota exceeded")),
        Arc::new(FakeTtsClient::new()),
        ServerConfig::default(),
    )
    .await;

    let (status, json) = app.post_translate(r#"{"text": "hello"}"#).await;
    assert_eq!(status, StatusCode::OK);

    let text = json["translated_text"].as_str().unwrap();
    assert!(text.starts_with("[Translation error:"));
    assert!(text.contains("quota exceeded"));
    // 标记文本同样会被合成
    assert!(json["audio_url"].is_string());

    let history = app.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["translated_text"], text);
}

#[tokio::test]
async fn test_synthesizer_failure_omits_audio() {
    let app = spawn_app_with(
        Arc::new(FakeTranslator::echo()),
        Arc::new(FakeTtsClient::failing()),
        ServerConfig::default(),
    )
    .await;

    let (status, json) = app.post_translate(r#"{"text": "hello", "tgt_lang": "de"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["translated_text"], "[de] hello");
    assert!(json["audio_url"].is_null());

    let history = app.history().await;
    assert!(history[0]["audio_file"].is_null());
    assert!(history[0]["audio_url"].is_null());

    // 没有残留音频文件
    assert_eq!(std::fs::read_dir(app.audio_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_audio_not_found() {
    let app = spawn_app().await;

    let (status, json) = app.get_json("/audio/translated_missing.mp3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["errno"], 404);

    // 编码后的路径穿越
    let (status, _) = app.get("/audio/..%2F..%2Fetc%2Fpasswd").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/static/audio/.hidden.mp3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_audio_content_type() {
    let app = spawn_app().await;
    std::fs::write(app.audio_dir.path().join("clip.wav"), b"RIFFdata").unwrap();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/audio/clip.wav").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "8");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"RIFFdata");
}

#[tokio::test]
async fn test_history_limit() {
    let app = spawn_app().await;

    for text in ["one", "two", "three", "four"] {
        let (status, _) = app.post_translate(json!({"text": text}).to_string()).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, json) = app.get_json("/history?limit=2").await;
    let history = json["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["source_text"], "four");
    assert_eq!(history[1]["source_text"], "three");
    assert!(history[0]["id"].as_i64().unwrap() > history[1]["id"].as_i64().unwrap());

    // 超过上限时截断
    let (_, json) = app.get_json("/history?limit=1000").await;
    assert_eq!(json["history"].as_array().unwrap().len(), 3);

    let (_, json) = app.get_json("/history?limit=0").await;
    assert!(json["history"].as_array().unwrap().is_empty());

    let (status, json) = app.get_json("/history?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errno"], 400);
}

#[tokio::test]
async fn test_body_limit() {
    let mut config = ServerConfig::default();
    config.max_body_bytes = 64;
    let app = spawn_app_with(
        Arc::new(FakeTranslator::echo()),
        Arc::new(FakeTtsClient::new()),
        config,
    )
    .await;

    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .body(Body::from(json!({"text": "x".repeat(200)}).to_string()))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_ping() {
    let app = spawn_app().await;
    let (status, json) = app.get_json("/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["translator"], "fake");
    assert_eq!(json["synthesizer"], "fake");
}

#[tokio::test]
async fn test_static_files_fallback() {
    let web_dir = tempdir().unwrap();
    std::fs::write(web_dir.path().join("index.html"), "<h1>glass</h1>").unwrap();

    let mut config = ServerConfig::default();
    config.base_url = Some("https://glass.example.com".to_string());
    config.static_files.enabled = true;
    config.static_files.dir = web_dir.path().to_path_buf();

    let app = spawn_app_with(
        Arc::new(FakeTranslator::echo()),
        Arc::new(FakeTtsClient::new()),
        config,
    )
    .await;

    let (status, body) = app.get("/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>glass</h1>");

    // API 路由优先于静态文件
    let (status, json) = app.post_translate(r#"{"text": "hi"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["audio_url"]
        .as_str()
        .unwrap()
        .starts_with("https://glass.example.com/audio/"));
}

#[tokio::test]
async fn test_history_entry_by_id() {
    let app = spawn_app().await;
    app.post_translate(r#"{"text": "hello", "tgt_lang": "fr"}"#).await;

    let id = app.history().await[0]["id"].as_i64().unwrap();

    let (status, json) = app.get_json(&format!("/history/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id);
    assert_eq!(json["source_text"], "hello");
    assert_eq!(json["translated_text"], "[fr] hello");
    assert!(json["audio_url"].as_str().unwrap().starts_with("/audio/"));

    let (status, json) = app.get_json(&format!("/history/{}", id + 1)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["errno"], 404);

    let (status, json) = app.get_json("/history/latest").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errno"], 400);
}

#[tokio::test]
async fn test_history_read_failure_is_internal_error() {
    // 没有建表：写入和读取都会失败
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    let app = spawn_app_on(
        pool,
        Arc::new(FakeTranslator::echo()),
        Arc::new(FakeTtsClient::new()),
        ServerConfig::default(),
    )
    .await;

    // 写入失败只记录日志，翻译照常返回
    let (status, json) = app.post_translate(r#"{"text": "hello"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["translated_text"], "[en] hello");
    assert!(json["audio_url"].is_string());

    let (status, json) = app.get_json("/history").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["errno"], 500);
    assert!(json["error"].as_str().unwrap().starts_with("Repository error"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_slow_translation_does_not_block_other_requests() {
    let latency = Duration::from_secs(2);
    let app = spawn_app_with(
        Arc::new(FakeTranslator::echo().with_latency(latency)),
        Arc::new(FakeTtsClient::new()),
        ServerConfig::default(),
    )
    .await;

    let slow_router = app.router.clone();
    let started = Instant::now();
    let slow = tokio::spawn(async move {
        let request = Request::builder()
            .method("POST")
            .uri("/translate")
            .body(Body::from(r#"{"text": "slow"}"#))
            .unwrap();
        slow_router.oneshot(request).await.unwrap().status()
    });

    // 让慢请求先进入翻译阶段
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, json) = app.get_json("/history").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["history"].as_array().unwrap().is_empty());
    assert!(started.elapsed() < latency / 2);

    let (status, _) = app.get("/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() < latency / 2);

    assert_eq!(slow.await.unwrap(), StatusCode::OK);
    assert!(started.elapsed() >= latency);
    assert_eq!(app.history().await.len(), 1);
}
