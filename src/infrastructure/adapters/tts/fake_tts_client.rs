//! Fake TTS Client - 离线开发与测试用的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用 TTS 服务

use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::{
    SpeechRequest, SpeechSynthesizerPort, SynthesisError, SynthesizedAudio,
};
use crate::domain::audio::AudioFormat;

/// 未指定音频文件时返回的数据（MPEG 帧头 + 填充）
const PLACEHOLDER_MP3: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00];

/// Fake TTS Client
pub struct FakeTtsClient {
    /// 固定返回的音频数据，None 表示始终失败
    audio_data: Option<Vec<u8>>,
    format: AudioFormat,
}

impl FakeTtsClient {
    /// 返回内置的占位 MP3 数据
    pub fn new() -> Self {
        Self::with_audio(PLACEHOLDER_MP3.to_vec(), AudioFormat::Mp3)
    }

    /// 返回给定的音频数据
    pub fn with_audio(audio_data: Vec<u8>, format: AudioFormat) -> Self {
        Self {
            audio_data: Some(audio_data),
            format,
        }
    }

    /// 从文件读取固定音频，格式按扩展名推断（默认 mp3）
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let audio_data = std::fs::read(path)?;
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(AudioFormat::from_extension)
            .unwrap_or_default();

        tracing::info!(
            path = %path.display(),
            size = audio_data.len(),
            format = format.extension(),
            "FakeTtsClient initialized"
        );

        Ok(Self::with_audio(audio_data, format))
    }

    /// 始终合成失败
    pub fn failing() -> Self {
        Self {
            audio_data: None,
            format: AudioFormat::Mp3,
        }
    }
}

impl Default for FakeTtsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeTtsClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SynthesizedAudio, SynthesisError> {
        if request.text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::debug!(
            text_len = request.text.len(),
            lang = %request.lang,
            "FakeTtsClient: returning fixed audio"
        );

        match &self.audio_data {
            Some(data) => Ok(SynthesizedAudio {
                data: data.clone(),
                format: self.format,
            }),
            None => Err(SynthesisError::ServiceError(
                "fake synthesizer configured to fail".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
