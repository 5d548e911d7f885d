//! Speech Synthesizer Port - 供应商合成接口
//!
//! 对应 Azure Speech 的 synthesizer：合成结果通过 reason 枚举报告，
//! 取消时附带取消原因和可选的错误详情

use async_trait::async_trait;
use std::path::Path;

use crate::application::error::{CancellationReason, TtsError};

/// 合成结果原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultReason {
    SynthesizingAudioCompleted,
    Canceled,
}

/// 取消详情
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationDetails {
    pub reason: CancellationReason,
    pub error_details: Option<String>,
}

/// 合成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    pub reason: ResultReason,
    pub cancellation: Option<CancellationDetails>,
}

impl SynthesisOutcome {
    pub fn completed() -> Self {
        Self {
            reason: ResultReason::SynthesizingAudioCompleted,
            cancellation: None,
        }
    }

    pub fn canceled(reason: CancellationReason, error_details: Option<String>) -> Self {
        Self {
            reason: ResultReason::Canceled,
            cancellation: Some(CancellationDetails {
                reason,
                error_details,
            }),
        }
    }
}

/// 供应商合成器
///
/// 实现需要在返回前把音频完整写入 `output`
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak_ssml(
        &self,
        ssml: &str,
        output: &Path,
    ) -> Result<SynthesisOutcome, TtsError>;
}
