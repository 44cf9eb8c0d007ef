//! Speech Synthesizer Port - 语音合成引擎抽象
//!
//! 定义 TTS 合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioFormat;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No text to speak")]
    EmptyText,
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 语言代码（不会是 auto）
    pub lang: String,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// 编码后的音频数据
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 执行语音合成
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SynthesizedAudio, SynthesisError>;

    /// 服务名称（用于日志）
    fn name(&self) -> &'static str;
}
