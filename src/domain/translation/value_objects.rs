//! Translation Context - Value Objects

use serde::{Deserialize, Serialize};

use super::errors::TranslationRequestError;

/// 自动检测语言的哨兵值
pub const AUTO_DETECT: &str = "auto";

/// 目标语言缺省值
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// 目标语言为 auto 时语音合成使用的语言
pub const SPEECH_FALLBACK_LANGUAGE: &str = "en";

/// 翻译失败时标记文本的格式前缀
const FAILURE_MARKER_PREFIX: &str = "[Translation error: ";

/// 语言代码
///
/// `Auto` 表示交给翻译服务自动检测，其余原样透传给外部服务
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Auto,
    Code(String),
}

impl Language {
    /// 解析调用方传入的语言代码，缺失或空白时使用 `default`
    pub fn parse_or(raw: Option<&str>, default: Language) -> Self {
        match raw.map(str::trim) {
            None | Some("") => default,
            Some(code) if code.eq_ignore_ascii_case(AUTO_DETECT) => Language::Auto,
            Some(code) => Language::Code(code.to_string()),
        }
    }

    /// 目标语言缺省值 `en`
    pub fn default_target() -> Self {
        Language::Code(DEFAULT_TARGET_LANGUAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Language::Auto => AUTO_DETECT,
            Language::Code(code) => code,
        }
    }

    /// 语音合成实际使用的语言（auto 无法合成，回落到 en）
    pub fn speech_code(&self) -> &str {
        match self {
            Language::Auto => SPEECH_FALLBACK_LANGUAGE,
            Language::Code(code) => code,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 已校验的翻译请求
///
/// 不变量:
/// - text 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source: Language,
    target: Language,
}

impl TranslationRequest {
    /// 校验并构造翻译请求
    ///
    /// 源语言缺省为 `auto`，目标语言缺省为 `en`
    pub fn new(
        text: Option<&str>,
        source: Option<&str>,
        target: Option<&str>,
    ) -> Result<Self, TranslationRequestError> {
        let text = text.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(TranslationRequestError::EmptyText);
        }

        Ok(Self {
            text: text.to_string(),
            source: Language::parse_or(source, Language::Auto),
            target: Language::parse_or(target, Language::default_target()),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &Language {
        &self.source
    }

    pub fn target(&self) -> &Language {
        &self.target
    }
}

/// 翻译步骤的结果
///
/// 失败不会中断流水线，只在展示时压平成标记文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    Failed(String),
}

impl TranslationOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, TranslationOutcome::Failed(_))
    }

    /// 对外展示的文本：成功时为译文，失败时为 `[Translation error: ...]`
    pub fn display_text(&self) -> String {
        match self {
            TranslationOutcome::Translated(text) => text.clone(),
            TranslationOutcome::Failed(description) => {
                format!("{}{}]", FAILURE_MARKER_PREFIX, description)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = TranslationRequest::new(Some("  hello "), None, None).unwrap();
        assert_eq!(request.text(), "hello");
        assert_eq!(request.source(), &Language::Auto);
        assert_eq!(request.target().as_str(), "en");
    }

    #[test]
    fn test_blank_languages_fall_back_to_defaults() {
        let request = TranslationRequest::new(Some("hola"), Some("  "), Some("")).unwrap();
        assert_eq!(request.source(), &Language::Auto);
        assert_eq!(request.target().as_str(), "en");
    }

    #[test]
    fn test_rejects_missing_or_blank_text() {
        assert_eq!(
            TranslationRequest::new(None, None, None),
            Err(TranslationRequestError::EmptyText)
        );
        assert_eq!(
            TranslationRequest::new(Some(" \n\t "), Some("fr"), Some("en")),
            Err(TranslationRequestError::EmptyText)
        );
    }

    #[test]
    fn test_auto_is_case_insensitive() {
        assert_eq!(Language::parse_or(Some("AUTO"), Language::default_target()), Language::Auto);
        assert_eq!(
            Language::parse_or(Some("fr"), Language::Auto),
            Language::Code("fr".to_string())
        );
    }

    #[test]
    fn test_speech_code_for_auto_target() {
        assert_eq!(Language::Auto.speech_code(), "en");
        assert_eq!(Language::Code("de".to_string()).speech_code(), "de");
    }

    #[test]
    fn test_failed_outcome_marker() {
        let outcome = TranslationOutcome::Failed("connection refused".to_string());
        assert!(outcome.is_failed());
        assert_eq!(outcome.display_text(), "[Translation error: connection refused]");

        let outcome = TranslationOutcome::Translated("bonjour".to_string());
        assert_eq!(outcome.display_text(), "bonjour");
    }
}
