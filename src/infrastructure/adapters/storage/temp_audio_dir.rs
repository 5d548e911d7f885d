//! Temp Audio Dir - 临时音频文件目录
//!
//! 每次合成分配一个随机命名的文件；合成失败时负责删除残留文件

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;
use uuid::Uuid;

use crate::application::error::TtsError;

/// 删除重试次数
const CLEANUP_ATTEMPTS: u32 = 3;
/// 删除重试间隔
const CLEANUP_BACKOFF: Duration = Duration::from_millis(100);

/// 临时音频目录
#[derive(Debug, Clone)]
pub struct TempAudioDir {
    base_dir: PathBuf,
}

impl TempAudioDir {
    /// 创建目录（显式初始化，不在模块加载时发生）
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, TtsError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| TtsError::io(&base_dir, e))?;

        tracing::debug!(dir = %base_dir.display(), "Temp audio directory ready");

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 分配新的输出文件路径：`{prefix}_{uuid}.wav`
    pub fn allocate(&self, prefix: &str) -> PathBuf {
        self.base_dir.join(format!("{}_{}.wav", prefix, Uuid::new_v4()))
    }

    /// 尽力删除文件
    ///
    /// 文件被占用/无权限时短暂等待后重试，最终失败只记录日志
    pub async fn cleanup(&self, path: &Path) {
        remove_with_retry(path).await;
    }
}

/// 删除文件，不存在视为成功
pub async fn remove_with_retry(path: &Path) -> bool {
    for attempt in 1..=CLEANUP_ATTEMPTS {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed partial audio file");
                return true;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => return true,
            Err(e) if is_transient(&e) && attempt < CLEANUP_ATTEMPTS => {
                tracing::debug!(
                    path = %path.display(),
                    attempt,
                    error = %e,
                    "Audio file busy, retrying removal"
                );
                tokio::time::sleep(CLEANUP_BACKOFF).await;
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    attempt,
                    error = %e,
                    "Failed to clean up audio file"
                );
                return false;
            }
        }
    }
    false
}

fn is_transient(err: &std::io::Error) -> bool {
    if err.kind() == ErrorKind::PermissionDenied {
        return true;
    }
    // ERROR_SHARING_VIOLATION
    #[cfg(windows)]
    if err.raw_os_error() == Some(32) {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_new_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("data/temp/Azure_TTS");

        let dir = TempAudioDir::new(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(dir.base_dir(), nested.as_path());
    }

    #[tokio::test]
    async fn test_allocate_unique_paths() {
        let temp_dir = tempdir().unwrap();
        let dir = TempAudioDir::new(temp_dir.path()).await.unwrap();

        let first = dir.allocate("azure");
        let second = dir.allocate("azure");
        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(temp_dir.path()));

        let name = first.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("azure_"));
        assert!(name.ends_with(".wav"));
        assert!(!first.exists());
    }

    #[tokio::test]
    async fn test_cleanup_removes_file() {
        let temp_dir = tempdir().unwrap();
        let dir = TempAudioDir::new(temp_dir.path()).await.unwrap();

        let path = dir.allocate("otts");
        fs::write(&path, b"partial").await.unwrap();
        dir.cleanup(&path).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cleanup_tolerates_missing_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("never_written.wav");
        assert!(remove_with_retry(&path).await);
    }

    /// 去掉目录写权限；当前进程仍能写入（如 root）时返回 false
    #[cfg(unix)]
    fn make_read_only(dir: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o555)).unwrap();
        let write_check = dir.join(".write_check");
        if std::fs::File::create(&write_check).is_ok() {
            let _ = std::fs::remove_file(&write_check);
            restore_writable(dir);
            return false;
        }
        true
    }

    #[cfg(unix)]
    fn restore_writable(dir: &Path) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cleanup_gives_up_on_permission_denied() {
        let temp_dir = tempdir().unwrap();
        let dir = TempAudioDir::new(temp_dir.path().join("locked")).await.unwrap();

        let path = dir.allocate("azure");
        fs::write(&path, b"partial").await.unwrap();
        if !make_read_only(dir.base_dir()) {
            return;
        }

        let started = std::time::Instant::now();
        let removed = remove_with_retry(&path).await;
        let elapsed = started.elapsed();
        restore_writable(dir.base_dir());

        assert!(!removed);
        assert!(path.exists());
        // 三次尝试之间各等待一次
        assert!(elapsed >= CLEANUP_BACKOFF * (CLEANUP_ATTEMPTS - 1));
    }
}
