//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod repositories;
mod speech_synthesizer;
mod translator;

pub use audio_storage::{AudioStorageError, AudioStoragePort};
pub use repositories::{
    NewTranslationRecord, RepositoryError, TranslationRecord, TranslationRepositoryPort,
    DEFAULT_HISTORY_LIMIT,
};
pub use speech_synthesizer::{SpeechRequest, SpeechSynthesizerPort, SynthesisError, SynthesizedAudio};
pub use translator::{TranslateRequest, TranslationError, TranslatorPort};
