//! Translate Command Handler - 翻译请求编排
//!
//! 单次请求的状态流转: Validated → Translating → Synthesizing → Persisted → Responded
//!
//! 翻译失败和合成失败都不会中断流水线：
//! - 翻译失败：以失败标记文本代替译文继续
//! - 合成失败：不生成音频引用
//! - 持久化失败：记录日志后丢弃，不影响响应

use std::sync::Arc;

use crate::application::commands::TranslateText;
use crate::application::ports::{
    AudioStoragePort, NewTranslationRecord, SpeechRequest, SpeechSynthesizerPort,
    TranslateRequest, TranslationRepositoryPort, TranslatorPort,
};
use crate::domain::audio::{AudioName, AudioNamer};
use crate::domain::translation::{Language, TranslationOutcome, TranslationRequest};

/// 翻译编排结果
#[derive(Debug, Clone)]
pub struct TranslateResult {
    pub outcome: TranslationOutcome,
    /// 合成成功时的音频文件名
    pub audio: Option<AudioName>,
    /// 历史记录 id（持久化失败时为 None）
    pub record_id: Option<i64>,
}

impl TranslateResult {
    /// 对外展示的译文（失败时为标记文本）
    pub fn translated_text(&self) -> String {
        self.outcome.display_text()
    }
}

/// TranslateText Handler
pub struct TranslateHandler {
    translator: Arc<dyn TranslatorPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    audio_storage: Arc<dyn AudioStoragePort>,
    translation_repo: Arc<dyn TranslationRepositoryPort>,
    namer: AudioNamer,
}

impl TranslateHandler {
    pub fn new(
        translator: Arc<dyn TranslatorPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        audio_storage: Arc<dyn AudioStoragePort>,
        translation_repo: Arc<dyn TranslationRepositoryPort>,
        namer: AudioNamer,
    ) -> Self {
        Self {
            translator,
            synthesizer,
            audio_storage,
            translation_repo,
            namer,
        }
    }

    /// 执行翻译流水线，永远返回一个（可能降级的）结果
    pub async fn handle(&self, command: TranslateText) -> TranslateResult {
        let request = command.request;

        let outcome = self.translate(&request).await;
        let translated_text = outcome.display_text();

        let audio = self.synthesize(&translated_text, request.target()).await;

        let record_id = self
            .persist(&request, &translated_text, audio.as_ref())
            .await;

        tracing::info!(
            source_lang = %request.source(),
            target_lang = %request.target(),
            translation_failed = outcome.is_failed(),
            audio = ?audio.as_ref().map(AudioName::as_str),
            record_id = ?record_id,
            "Translation request completed"
        );

        TranslateResult {
            outcome,
            audio,
            record_id,
        }
    }

    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        let translate_request = TranslateRequest {
            text: request.text().to_string(),
            source: request.source().clone(),
            target: request.target().clone(),
        };

        match self.translator.translate(&translate_request).await {
            Ok(text) if !text.trim().is_empty() => TranslationOutcome::Translated(text),
            Ok(_) => {
                tracing::warn!(
                    translator = self.translator.name(),
                    "Translator returned empty text"
                );
                TranslationOutcome::Failed("translation service returned empty text".to_string())
            }
            Err(e) => {
                tracing::warn!(
                    translator = self.translator.name(),
                    error = %e,
                    "Translation failed, continuing with error marker"
                );
                TranslationOutcome::Failed(e.to_string())
            }
        }
    }

    async fn synthesize(&self, text: &str, target: &Language) -> Option<AudioName> {
        let speech_request = SpeechRequest {
            text: text.to_string(),
            lang: target.speech_code().to_string(),
        };

        let audio = match self.synthesizer.synthesize(&speech_request).await {
            Ok(audio) if !audio.data.is_empty() => audio,
            Ok(_) => {
                tracing::warn!(
                    synthesizer = self.synthesizer.name(),
                    "Synthesizer returned empty audio"
                );
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    synthesizer = self.synthesizer.name(),
                    lang = %speech_request.lang,
                    error = %e,
                    "Speech synthesis failed, responding without audio"
                );
                return None;
            }
        };

        let name = self.namer.new_name(audio.format);
        match self.audio_storage.save_audio(&name, &audio.data).await {
            Ok(path) => {
                tracing::debug!(
                    path = %path.display(),
                    size = audio.data.len(),
                    "Saved synthesized audio"
                );
                Some(name)
            }
            Err(e) => {
                tracing::warn!(audio = %name, error = %e, "Failed to save synthesized audio");
                None
            }
        }
    }

    async fn persist(
        &self,
        request: &TranslationRequest,
        translated_text: &str,
        audio: Option<&AudioName>,
    ) -> Option<i64> {
        let record = NewTranslationRecord {
            source_text: request.text().to_string(),
            translated_text: translated_text.to_string(),
            source_lang: request.source().as_str().to_string(),
            target_lang: request.target().as_str().to_string(),
            audio_file: audio.map(|name| name.as_str().to_string()),
        };

        match self.translation_repo.append(&record).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to persist translation history, ignoring");
                None
            }
        }
    }
}
