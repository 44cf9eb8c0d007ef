//! GlassTranslate - 翻译 + 语音合成 Web 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Translation Context: 翻译请求、语言代码、翻译结果
//! - Audio Context: 音频文件命名与格式
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Translator, SpeechSynthesizer, AudioStorage, Repositories）
//! - Commands: 翻译流水线（翻译 → 合成 → 持久化）
//! - Queries: 历史记录、音频文件
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: SQLite 翻译历史
//! - Adapters: 翻译客户端、TTS 客户端、音频文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
