//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    TranslateHandler,
    // Query handlers
    GetAudioFileHandler, GetHistoryEntryHandler, HistoryLimits, ListHistoryHandler,
    // Ports
    AudioStoragePort, SpeechSynthesizerPort, TranslationRepositoryPort, TranslatorPort,
};
use crate::domain::audio::AudioNamer;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub translator: Arc<dyn TranslatorPort>,
    pub synthesizer: Arc<dyn SpeechSynthesizerPort>,

    // ========== Command Handlers ==========
    pub translate_handler: TranslateHandler,

    // ========== Query Handlers ==========
    pub list_history_handler: ListHistoryHandler,
    pub get_history_entry_handler: GetHistoryEntryHandler,
    pub get_audio_file_handler: GetAudioFileHandler,

    /// 以 `/audio/` 结尾的音频 URL 前缀
    audio_url_prefix: String,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        translator: Arc<dyn TranslatorPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        audio_storage: Arc<dyn AudioStoragePort>,
        translation_repo: Arc<dyn TranslationRepositoryPort>,
        namer: AudioNamer,
        history_limits: HistoryLimits,
        audio_url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            translator: translator.clone(),
            synthesizer: synthesizer.clone(),

            translate_handler: TranslateHandler::new(
                translator,
                synthesizer,
                audio_storage.clone(),
                translation_repo.clone(),
                namer,
            ),

            list_history_handler: ListHistoryHandler::new(translation_repo.clone(), history_limits),
            get_history_entry_handler: GetHistoryEntryHandler::new(translation_repo),
            get_audio_file_handler: GetAudioFileHandler::new(audio_storage),

            audio_url_prefix: audio_url_prefix.into(),
        }
    }

    /// 音频文件的对外 URL
    pub fn audio_url(&self, name: &str) -> String {
        format!("{}{}", self.audio_url_prefix, name)
    }
}
