//! Audio Context - 合成音频上下文
//!
//! 职责:
//! - 音频文件命名（AudioNamer）
//! - 文件名安全校验、格式与 Content-Type 映射

mod errors;
mod namer;
mod value_objects;

pub use errors::AudioError;
pub use namer::{AudioNamer, DEFAULT_AUDIO_PREFIX, MAX_AUDIO_PREFIX_LEN};
pub use value_objects::{AudioFormat, AudioName};
