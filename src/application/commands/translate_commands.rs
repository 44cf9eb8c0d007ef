//! Translate Commands

use crate::domain::translation::TranslationRequest;

/// 翻译命令
///
/// 只接受已校验的请求，空文本在网关层就被拒绝
#[derive(Debug, Clone)]
pub struct TranslateText {
    pub request: TranslationRequest,
}
