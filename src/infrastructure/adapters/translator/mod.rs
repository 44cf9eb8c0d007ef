//! Translator Adapter - 翻译服务客户端实现

mod fake_translator;
mod google_translate_client;
mod libre_translate_client;

pub use fake_translator::FakeTranslator;
pub use google_translate_client::{GoogleTranslateClient, GoogleTranslateClientConfig};
pub use libre_translate_client::{LibreTranslateClient, LibreTranslateClientConfig};

use crate::application::ports::TranslationError;

fn request_error(e: reqwest::Error) -> TranslationError {
    if e.is_timeout() {
        TranslationError::Timeout
    } else if e.is_connect() {
        TranslationError::NetworkError(format!("Cannot connect to translation service: {}", e))
    } else {
        TranslationError::NetworkError(e.to_string())
    }
}
