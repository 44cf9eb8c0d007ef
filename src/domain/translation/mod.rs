//! Translation Context - 翻译限界上下文
//!
//! 职责:
//! - 输入校验与语言缺省值
//! - 翻译结果（成功译文 / 失败标记）的建模

mod errors;
mod value_objects;

pub use errors::TranslationRequestError;
pub use value_objects::{
    Language, TranslationOutcome, TranslationRequest, AUTO_DETECT, DEFAULT_TARGET_LANGUAGE,
    SPEECH_FALLBACK_LANGUAGE,
};
