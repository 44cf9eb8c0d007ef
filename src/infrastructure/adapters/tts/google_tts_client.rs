//! Google TTS Client - 调用 Google 网页朗读接口
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! GET https://translate.google.com/translate_tts?ie=UTF-8&client=tw-ob&tl=fr&q=...&total=1&idx=0&textlen=5
//! Response: audio/mpeg binary
//!
//! 单次请求的文本长度有限，长文本按词切分后逐段请求，MP3 帧直接拼接

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{
    SpeechRequest, SpeechSynthesizerPort, SynthesisError, SynthesizedAudio,
};
use crate::domain::audio::AudioFormat;

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒），作用于每一段
    pub timeout_secs: u64,
    /// 每段最多字符数
    pub max_chunk_chars: usize,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            timeout_secs: 60,
            max_chunk_chars: 100,
        }
    }
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        lang: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SynthesisError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    SynthesisError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status,
                error_text.trim()
            )));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        if data.is_empty() {
            return Err(SynthesisError::InvalidResponse(format!(
                "empty audio for chunk {}",
                idx
            )));
        }

        Ok(data.to_vec())
    }
}

/// 按空白切分文本，每段不超过 `max_chars` 个字符；超长的词按字符硬切
pub(crate) fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[async_trait]
impl SpeechSynthesizerPort for GoogleTtsClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SynthesizedAudio, SynthesisError> {
        let chunks = split_text(&request.text, self.config.max_chunk_chars);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::debug!(
            url = %self.tts_url(),
            lang = %request.lang,
            text_len = request.text.len(),
            chunks = chunks.len(),
            "Sending TTS request"
        );

        let total = chunks.len();
        let mut data = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let audio = self.fetch_chunk(chunk, &request.lang, idx, total).await?;
            data.extend_from_slice(&audio);
        }

        tracing::debug!(audio_size = data.len(), chunks = total, "TTS synthesis completed");

        Ok(SynthesizedAudio {
            data,
            format: AudioFormat::Mp3,
        })
    }

    fn name(&self) -> &'static str {
        "google-tts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Router};
    use std::collections::HashMap;

    #[test]
    fn test_split_short_text() {
        assert_eq!(split_text("hello world", 100), vec!["hello world"]);
        assert!(split_text("   \n\t ", 100).is_empty());
    }

    #[test]
    fn test_split_on_word_boundaries() {
        let chunks = split_text("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 9));
    }

    #[test]
    fn test_split_long_word_by_char() {
        let chunks = split_text("ab abcdefgh cd", 3);
        assert_eq!(chunks, vec!["ab", "abc", "def", "gh", "cd"]);
    }

    #[test]
    fn test_split_counts_chars_not_bytes() {
        let chunks = split_text("日本語のテキスト", 4);
        assert_eq!(chunks, vec!["日本語の", "テキスト"]);
    }

    async fn spawn_provider(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String, max_chunk_chars: usize) -> GoogleTtsClient {
        GoogleTtsClient::new(GoogleTtsClientConfig {
            base_url,
            timeout_secs: 5,
            max_chunk_chars,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_chunks_are_concatenated_in_order() {
        let router = Router::new().route(
            "/translate_tts",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["client"], "tw-ob");
                assert_eq!(params["tl"], "fr");
                assert_eq!(params["total"], "2");
                format!("<{}:{}>", params["idx"], params["q"])
            }),
        );
        let base_url = spawn_provider(router).await;

        let audio = client(base_url, 7)
            .synthesize(&SpeechRequest {
                text: "bonjour monde".to_string(),
                lang: "fr".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(audio.format, AudioFormat::Mp3);
        assert_eq!(audio.data, b"<0:bonjour><1:monde>");
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let err = client("http://127.0.0.1:9".to_string(), 100)
            .synthesize(&SpeechRequest {
                text: "  ".to_string(),
                lang: "en".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyText));
    }

    #[tokio::test]
    async fn test_http_error_and_empty_body() {
        let router = Router::new()
            .route(
                "/translate_tts",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    if params["q"] == "fail" {
                        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
                    } else {
                        (StatusCode::OK, "")
                    }
                }),
            );
        let base_url = spawn_provider(router).await;
        let client = client(base_url, 100);

        let err = client
            .synthesize(&SpeechRequest {
                text: "fail".to_string(),
                lang: "en".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::ServiceError(ref m) if m.contains("503")));

        let err = client
            .synthesize(&SpeechRequest {
                text: "silence".to_string(),
                lang: "en".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidResponse(_)));
    }
}
