//! Translator Port - 翻译引擎抽象
//!
//! 定义文本翻译的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::translation::Language;

/// 翻译错误
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 翻译请求
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    pub text: String,
    pub source: Language,
    pub target: Language,
}

/// Translator Port
///
/// 外部翻译服务的抽象接口，单次调用，不重试
#[async_trait]
pub trait TranslatorPort: Send + Sync {
    /// 翻译文本
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslationError>;

    /// 服务名称（用于日志）
    fn name(&self) -> &'static str;
}
