//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait，所有音频平铺在同一个目录下

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioStorageError, AudioStoragePort};
use crate::domain::audio::AudioName;

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, AudioStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 写入过程中的临时文件，以 `.` 开头，永远不是合法的 AudioName
    fn partial_path(&self, name: &AudioName) -> PathBuf {
        self.base_dir.join(format!(".{}.part", name.as_str()))
    }
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    fn audio_path(&self, name: &AudioName) -> PathBuf {
        self.base_dir.join(name.as_str())
    }

    async fn save_audio(&self, name: &AudioName, data: &[u8]) -> Result<PathBuf, AudioStorageError> {
        let partial_path = self.partial_path(name);
        let audio_path = self.audio_path(name);

        // 先写临时文件再 rename，读者不会拿到写了一半的音频
        if let Err(e) = fs::write(&partial_path, data).await {
            let _ = fs::remove_file(&partial_path).await;
            return Err(AudioStorageError::IoError(e.to_string()));
        }

        if let Err(e) = fs::rename(&partial_path, &audio_path).await {
            let _ = fs::remove_file(&partial_path).await;
            return Err(AudioStorageError::IoError(e.to_string()));
        }

        tracing::debug!(audio = %name, size = data.len(), "Saved audio");

        Ok(audio_path)
    }

    async fn audio_exists(&self, name: &AudioName) -> bool {
        fs::metadata(self.audio_path(name))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{AudioFormat, AudioNamer};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_audio() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        let name = AudioNamer::default().new_name(AudioFormat::Mp3);

        assert!(!storage.audio_exists(&name).await);

        let path = storage.save_audio(&name, b"fake mp3 data").await.unwrap();
        assert_eq!(path, temp_dir.path().join(name.as_str()));
        assert_eq!(std::fs::read(&path).unwrap(), b"fake mp3 data");
        assert!(storage.audio_exists(&name).await);

        // 没有残留的临时文件
        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(name.as_str())]);
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("static").join("audio");
        let storage = FileAudioStorage::new(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(
            storage.audio_path(&AudioName::parse("a.mp3").unwrap()),
            nested.join("a.mp3")
        );
    }

    #[tokio::test]
    async fn test_directory_is_not_audio() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        std::fs::create_dir(temp_dir.path().join("clip.mp3")).unwrap();

        let name = AudioName::parse("clip.mp3").unwrap();
        assert!(!storage.audio_exists(&name).await);
    }
}
