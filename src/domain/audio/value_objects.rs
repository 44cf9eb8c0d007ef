//! Audio Context - Value Objects

use serde::{Deserialize, Serialize};

use super::errors::AudioError;

/// 文件名最大长度（字节）
pub(super) const MAX_NAME_LEN: usize = 255;

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Ogg,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
        }
    }
}

/// 音频文件名
///
/// 不变量:
/// - 单一路径分量，仅包含 `[A-Za-z0-9._-]`
/// - 不以 `.` 开头，长度不超过 255 字节
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioName(pub(super) String);

impl AudioName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, AudioError> {
        let name = raw.into();
        if !is_safe_component(&name) {
            return Err(AudioError::InvalidName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 根据扩展名推断格式
    pub fn format(&self) -> Option<AudioFormat> {
        self.0
            .rsplit_once('.')
            .and_then(|(_, ext)| AudioFormat::from_extension(ext))
    }

    pub fn content_type(&self) -> &'static str {
        self.format()
            .map(|f| f.content_type())
            .unwrap_or("application/octet-stream")
    }
}

impl std::fmt::Display for AudioName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 是否为安全的单一文件名分量
pub(crate) fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
