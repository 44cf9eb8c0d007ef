//! Fake Translator - 离线开发与测试用的翻译器
//!
//! 不调用外部服务：回显原文并加上目标语言标签，或始终失败

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{TranslateRequest, TranslationError, TranslatorPort};

#[derive(Debug, Clone)]
enum Behavior {
    Echo,
    Fail(String),
}

/// Fake Translator
pub struct FakeTranslator {
    behavior: Behavior,
    latency: Duration,
}

impl FakeTranslator {
    /// 回显翻译：`[<target>] <text>`
    pub fn echo() -> Self {
        Self {
            behavior: Behavior::Echo,
            latency: Duration::ZERO,
        }
    }

    /// 始终以 ServiceError 失败
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(message.into()),
            latency: Duration::ZERO,
        }
    }

    /// 模拟外部服务延迟
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl TranslatorPort for FakeTranslator {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslationError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match &self.behavior {
            Behavior::Echo => Ok(format!("[{}] {}", request.target, request.text)),
            Behavior::Fail(message) => Err(TranslationError::ServiceError(message.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
