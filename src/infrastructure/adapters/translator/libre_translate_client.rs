//! LibreTranslate Client - 调用自建或公共 LibreTranslate 服务
//!
//! 外部 API:
//! POST {base_url}/translate
//! Request: {"q": "...", "source": "auto", "target": "fr", "format": "text", "api_key": "..."}
//! Response: {"translatedText": "..."}，出错时为 {"error": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::request_error;
use crate::application::ports::{TranslateRequest, TranslationError, TranslatorPort};

#[derive(Debug, Serialize)]
struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// LibreTranslate 客户端配置
#[derive(Debug, Clone)]
pub struct LibreTranslateClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for LibreTranslateClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://libretranslate.com".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// LibreTranslate 客户端
pub struct LibreTranslateClient {
    client: Client,
    config: LibreTranslateClientConfig,
}

impl LibreTranslateClient {
    pub fn new(config: LibreTranslateClientConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn translate_url(&self) -> String {
        format!("{}/translate", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TranslatorPort for LibreTranslateClient {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslationError> {
        let body = LibreTranslateRequest {
            q: &request.text,
            source: request.source.as_str(),
            target: request.target.as_str(),
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };

        tracing::debug!(
            url = %self.translate_url(),
            text_len = request.text.len(),
            source = %request.source,
            target = %request.target,
            "Sending translate request"
        );

        let response = self
            .client
            .post(self.translate_url())
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        let parsed = serde_json::from_str::<LibreTranslateResponse>(&text);

        if !status.is_success() {
            let detail = parsed
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| text.trim().to_string());
            return Err(TranslationError::ServiceError(format!(
                "HTTP {}: {}",
                status, detail
            )));
        }

        let parsed = parsed.map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;
        match (parsed.translated_text, parsed.error) {
            (Some(translated), _) => Ok(translated),
            (None, Some(error)) => Err(TranslationError::ServiceError(error)),
            (None, None) => Err(TranslationError::InvalidResponse(
                "missing translatedText".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}
