//! Azure TTS Provider - 对宿主暴露的入口
//!
//! 每次调用分配一个临时文件，成功时把路径交给调用方，失败时删除残留文件

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::factory::create_backend;
use crate::application::error::TtsError;
use crate::application::ports::{TtsBackend, TtsProvider};
use crate::config::{ProviderConfig, ProviderSettings};
use crate::infrastructure::adapters::storage::TempAudioDir;

pub const PROVIDER_ID: &str = "azure_tts";
pub const PROVIDER_DISPLAY_NAME: &str = "Azure TTS";

pub struct AzureTtsProvider {
    backend: Arc<dyn TtsBackend>,
    temp_dir: TempAudioDir,
}

impl AzureTtsProvider {
    /// 从宿主配置映射构造
    ///
    /// 凭据/模板错误在这里以 Configuration 错误返回
    pub async fn new(config: &ProviderConfig) -> Result<Self, TtsError> {
        let settings = ProviderSettings::from_map(config)?;
        Self::from_settings(&settings).await
    }

    pub async fn from_settings(settings: &ProviderSettings) -> Result<Self, TtsError> {
        let backend = create_backend(settings)?;
        let temp_dir = TempAudioDir::new(&settings.temp_dir).await?;
        Ok(Self { backend, temp_dir })
    }

    /// 使用现成的后端（测试或宿主自定义接线）
    pub async fn with_backend(
        backend: Arc<dyn TtsBackend>,
        temp_dir: impl AsRef<Path>,
    ) -> Result<Self, TtsError> {
        let temp_dir = TempAudioDir::new(temp_dir).await?;
        Ok(Self { backend, temp_dir })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.base_dir()
    }
}

#[async_trait]
impl TtsProvider for AzureTtsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn display_name(&self) -> &'static str {
        PROVIDER_DISPLAY_NAME
    }

    async fn get_audio(&self, text: &str) -> Result<PathBuf, TtsError> {
        let path = self.temp_dir.allocate(self.backend.name());

        tracing::debug!(
            backend = self.backend.name(),
            text_len = text.len(),
            path = %path.display(),
            "Synthesizing audio"
        );

        match self.backend.synthesize(text, &path).await {
            Ok(()) => Ok(path),
            Err(e) => {
                self.temp_dir.cleanup(&path).await;
                tracing::error!(
                    backend = self.backend.name(),
                    path = %path.display(),
                    error = %e,
                    "Speech synthesis failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::{CancellationReason, SynthesisError};
    use crate::domain::ssml::SsmlBuilder;
    use crate::domain::voice::VoiceConfig;
    use crate::infrastructure::adapters::tts::{
        FakeSpeechSynthesizer, FakeSynthesisBehavior, NativeVendorBackend,
    };
    use tempfile::tempdir;

    async fn provider(behavior: FakeSynthesisBehavior, dir: &Path) -> AzureTtsProvider {
        let synthesizer = Arc::new(FakeSpeechSynthesizer::new(behavior));
        let backend = NativeVendorBackend::new(
            synthesizer,
            SsmlBuilder::from_voice(&VoiceConfig::default()),
        );
        AzureTtsProvider::with_backend(Arc::new(backend), dir)
            .await
            .unwrap()
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_completed_returns_existing_file() {
        let temp_dir = tempdir().unwrap();
        let provider = provider(
            FakeSynthesisBehavior::Complete(b"RIFF....WAVEfmt ".to_vec()),
            temp_dir.path(),
        )
        .await;

        let path = provider.get_audio("hello").await.unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        assert!(path.starts_with(temp_dir.path()));
        assert_eq!(provider.id(), "azure_tts");
        assert_eq!(provider.display_name(), "Azure TTS");
    }

    #[tokio::test]
    async fn test_canceled_removes_partial_file() {
        let temp_dir = tempdir().unwrap();
        let provider = provider(
            FakeSynthesisBehavior::Cancel {
                reason: CancellationReason::Error,
                detail: Some("Connection was closed by the remote host".to_string()),
            },
            temp_dir.path(),
        )
        .await;

        let err = provider.get_audio("hello").await.unwrap_err();
        assert!(matches!(
            err,
            TtsError::Synthesis(SynthesisError::CanceledWithDetail { .. })
        ));
        assert_eq!(file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn test_completed_without_output_fails() {
        let temp_dir = tempdir().unwrap();
        let provider = provider(FakeSynthesisBehavior::CompleteWithoutOutput, temp_dir.path()).await;

        let err = provider.get_audio("hello").await.unwrap_err();
        assert!(matches!(
            err,
            TtsError::Synthesis(SynthesisError::MissingOutput { .. })
        ));
        assert_eq!(file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn test_empty_text_is_passed_through() {
        let temp_dir = tempdir().unwrap();
        let provider = provider(FakeSynthesisBehavior::Complete(b"x".to_vec()), temp_dir.path()).await;
        assert!(provider.get_audio("").await.is_ok());
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_key() {
        let temp_dir = tempdir().unwrap();
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "azure_tts_subscription_key": "not-a-key",
            "azure_tts_temp_dir": temp_dir.path().join("tts").to_string_lossy(),
        }))
        .unwrap();

        let err = AzureTtsProvider::new(&config).await.err().unwrap();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_new_creates_temp_dir() {
        let temp_dir = tempdir().unwrap();
        let audio_dir = temp_dir.path().join("data/temp/Azure_TTS");
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "azure_tts_subscription_key": "0123456789abcdef0123456789abcdef",
            "azure_tts_region": "eastasia",
            "azure_tts_temp_dir": audio_dir.to_string_lossy(),
        }))
        .unwrap();

        let provider = AzureTtsProvider::new(&config).await.unwrap();
        assert!(audio_dir.is_dir());
        assert_eq!(provider.backend_name(), "azure");
        assert_eq!(provider.temp_dir(), audio_dir.as_path());
    }

    /// 写出半截文件后锁住目录再报错的后端
    #[cfg(unix)]
    struct LockingBackend;

    #[cfg(unix)]
    #[async_trait]
    impl TtsBackend for LockingBackend {
        fn name(&self) -> &'static str {
            "azure"
        }

        async fn synthesize(&self, _text: &str, output: &Path) -> Result<(), TtsError> {
            use std::os::unix::fs::PermissionsExt;

            tokio::fs::write(output, b"RIFF").await.unwrap();
            let dir = output.parent().unwrap();
            std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o555)).unwrap();
            Err(SynthesisError::Timeout.into())
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cleanup_failure_keeps_primary_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let audio_dir = temp_dir.path().join("audio");
        let provider = AzureTtsProvider::with_backend(Arc::new(LockingBackend), &audio_dir)
            .await
            .unwrap();

        let result = provider.get_audio("hello").await;
        let write_check = std::fs::File::create(audio_dir.join(".write_check")).is_ok();
        std::fs::set_permissions(&audio_dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, TtsError::Synthesis(SynthesisError::Timeout)));
        if !write_check {
            // 目录不可写时残留文件无法删除，只记录日志
            assert_eq!(file_count(&audio_dir), 1);
        }
    }
}
