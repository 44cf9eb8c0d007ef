//! Audio Queries - 音频查询

use std::path::PathBuf;

/// 按文件名获取合成音频
#[derive(Debug, Clone)]
pub struct GetAudioFile {
    pub name: String,
}

/// 获取音频响应
#[derive(Debug, Clone)]
pub struct GetAudioFileResponse {
    pub name: String,
    pub path: PathBuf,
    pub content_type: &'static str,
}
