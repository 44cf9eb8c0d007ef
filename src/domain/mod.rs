//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Translation Context: 翻译请求与结果
//! - Audio Context: 合成音频命名

pub mod audio;
pub mod translation;
