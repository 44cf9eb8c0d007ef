//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TranslatorPort、SpeechSynthesizerPort、AudioStoragePort、Repository）
//! - commands: 翻译流水线（翻译 → 语音合成 → 持久化）
//! - queries: 历史记录与音频文件查询
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{TranslateHandler, TranslateResult},
    TranslateText,
};

pub use error::ApplicationError;

pub use ports::{
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    // Repositories
    NewTranslationRecord,
    RepositoryError,
    TranslationRecord,
    TranslationRepositoryPort,
    DEFAULT_HISTORY_LIMIT,
    // Speech synthesizer
    SpeechRequest,
    SpeechSynthesizerPort,
    SynthesisError,
    SynthesizedAudio,
    // Translator
    TranslateRequest,
    TranslationError,
    TranslatorPort,
};

pub use queries::{
    handlers::{
        GetAudioFileHandler, GetHistoryEntryHandler, HistoryEntry, HistoryLimits,
        ListHistoryHandler,
    },
    GetAudioFile, GetAudioFileResponse, GetHistoryEntry, ListHistory,
};
