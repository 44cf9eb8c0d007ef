//! Audio Storage Port - 出站端口
//!
//! 定义合成音频文件存储的抽象接口

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::audio::AudioName;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Storage Port - 出站端口
///
/// 音频目录只追加；文件名由 AudioNamer 保证不冲突，不加锁
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 获取音频文件路径
    fn audio_path(&self, name: &AudioName) -> PathBuf;

    /// 保存音频数据
    async fn save_audio(&self, name: &AudioName, data: &[u8]) -> Result<PathBuf, AudioStorageError>;

    /// 检查音频是否存在
    async fn audio_exists(&self, name: &AudioName) -> bool;
}
