//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioStoragePort;
use crate::application::queries::audio_queries::{GetAudioFile, GetAudioFileResponse};
use crate::domain::audio::AudioName;

/// GetAudioFile Handler - 定位已写入的音频文件
pub struct GetAudioFileHandler {
    audio_storage: Arc<dyn AudioStoragePort>,
}

impl GetAudioFileHandler {
    pub fn new(audio_storage: Arc<dyn AudioStoragePort>) -> Self {
        Self { audio_storage }
    }

    pub async fn handle(&self, query: GetAudioFile) -> Result<GetAudioFileResponse, ApplicationError> {
        // 非法文件名与不存在的文件一样按未找到处理
        let name = AudioName::parse(query.name.as_str())
            .map_err(|_| ApplicationError::not_found("Audio", query.name.as_str()))?;

        if !self.audio_storage.audio_exists(&name).await {
            return Err(ApplicationError::not_found("Audio", name.as_str()));
        }

        Ok(GetAudioFileResponse {
            path: self.audio_storage.audio_path(&name),
            content_type: name.content_type(),
            name: name.as_str().to_string(),
        })
    }
}
