//! Audio Namer - 合成音频文件命名
//!
//! 名称格式: `<prefix>_<uuid-simple>.<ext>`，唯一性依赖 v4 UUID 的随机空间，
//! 不检查存储目录

use uuid::Uuid;

use super::errors::AudioError;
use super::value_objects::{is_safe_component, AudioFormat, AudioName, MAX_NAME_LEN};

/// 默认文件名前缀
pub const DEFAULT_AUDIO_PREFIX: &str = "translated";

/// `_` + 32 位十六进制 token + `.` + 扩展名（均为 3 个字符）
const GENERATED_SUFFIX_LEN: usize = 1 + 32 + 1 + 3;

/// 前缀最大长度，保证生成的名称不超过 AudioName 的长度上限
pub const MAX_AUDIO_PREFIX_LEN: usize = MAX_NAME_LEN - GENERATED_SUFFIX_LEN;

#[derive(Debug, Clone)]
pub struct AudioNamer {
    prefix: String,
}

impl AudioNamer {
    pub fn new(prefix: impl Into<String>) -> Result<Self, AudioError> {
        let prefix = prefix.into();
        if !is_safe_component(&prefix) || prefix.len() > MAX_AUDIO_PREFIX_LEN {
            return Err(AudioError::InvalidPrefix(prefix));
        }
        Ok(Self { prefix })
    }

    /// 生成新的音频文件名
    pub fn new_name(&self, format: AudioFormat) -> AudioName {
        // prefix 在构造时已校验，uuid simple 形式只含十六进制字符
        AudioName(format!(
            "{}_{}.{}",
            self.prefix,
            Uuid::new_v4().simple(),
            format.extension()
        ))
    }
}

impl Default for AudioNamer {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_AUDIO_PREFIX.to_string(),
        }
    }
}
