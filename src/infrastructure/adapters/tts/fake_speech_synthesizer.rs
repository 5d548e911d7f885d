//! Fake Speech Synthesizer - 用于测试的合成器
//!
//! 不调用 Azure，按配置的行为写入固定音频或报告取消

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

use crate::application::error::{CancellationReason, TtsError};
use crate::application::ports::{SpeechSynthesizer, SynthesisOutcome};

/// Fake 合成行为
#[derive(Debug, Clone)]
pub enum FakeSynthesisBehavior {
    /// 写入固定音频并报告完成
    Complete(Vec<u8>),
    /// 写入部分数据后报告取消
    Cancel {
        reason: CancellationReason,
        detail: Option<String>,
    },
    /// 报告完成但不写文件
    CompleteWithoutOutput,
}

/// Fake 合成器
pub struct FakeSpeechSynthesizer {
    behavior: FakeSynthesisBehavior,
    last_ssml: Mutex<Option<String>>,
}

impl FakeSpeechSynthesizer {
    pub fn new(behavior: FakeSynthesisBehavior) -> Self {
        Self {
            behavior,
            last_ssml: Mutex::new(None),
        }
    }

    /// 最近一次收到的 SSML
    pub fn last_ssml(&self) -> Option<String> {
        self.last_ssml.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeechSynthesizer {
    async fn speak_ssml(&self, ssml: &str, output: &Path) -> Result<SynthesisOutcome, TtsError> {
        tracing::debug!(
            ssml_len = ssml.len(),
            path = %output.display(),
            "FakeSpeechSynthesizer: simulating synthesis"
        );

        if let Ok(mut guard) = self.last_ssml.lock() {
            *guard = Some(ssml.to_string());
        }

        match &self.behavior {
            FakeSynthesisBehavior::Complete(audio) => {
                tokio::fs::write(output, audio)
                    .await
                    .map_err(|e| TtsError::io(output, e))?;
                Ok(SynthesisOutcome::completed())
            }
            FakeSynthesisBehavior::Cancel { reason, detail } => {
                // 取消前已经写出的半截文件
                tokio::fs::write(output, b"RIFF")
                    .await
                    .map_err(|e| TtsError::io(output, e))?;
                Ok(SynthesisOutcome::canceled(*reason, detail.clone()))
            }
            FakeSynthesisBehavior::CompleteWithoutOutput => Ok(SynthesisOutcome::completed()),
        }
    }
}
