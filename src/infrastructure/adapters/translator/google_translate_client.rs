//! Google Translate Client - 调用 Google 网页翻译接口
//!
//! 实现 TranslatorPort trait
//!
//! 外部 API:
//! GET https://translate.googleapis.com/translate_a/single?client=gtx&sl=auto&tl=fr&dt=t&q=hello
//! Response: `[[["Bonjour","hello",null,null,10]],null,"en",...]`
//! 第一个元素是句子数组，每个句子的第一个元素是译文

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::request_error;
use crate::application::ports::{TranslateRequest, TranslationError, TranslatorPort};

/// Google Translate 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTranslateClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleTranslateClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Google Translate 客户端
pub struct GoogleTranslateClient {
    client: Client,
    config: GoogleTranslateClientConfig,
}

impl GoogleTranslateClient {
    pub fn new(config: GoogleTranslateClientConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn translate_url(&self) -> String {
        format!(
            "{}/translate_a/single",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

/// 拼接句子数组中的译文
fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::InvalidResponse("missing sentence array".to_string()))?;

    let text: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(TranslationError::InvalidResponse(
            "response contains no translated text".to_string(),
        ));
    }

    Ok(text)
}

#[async_trait]
impl TranslatorPort for GoogleTranslateClient {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslationError> {
        tracing::debug!(
            url = %self.translate_url(),
            text_len = request.text.len(),
            source = %request.source,
            target = %request.target,
            "Sending translate request"
        );

        let response = self
            .client
            .get(self.translate_url())
            .query(&[
                ("client", "gtx"),
                ("sl", request.source.as_str()),
                ("tl", request.target.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslationError::ServiceError(format!(
                "HTTP {}: {}",
                status,
                error_text.trim()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        parse_translation(&body)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
