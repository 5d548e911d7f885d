//! Native Vendor Backend - Azure 原生合成后端
//!
//! 用音色参数（或自定义模板）构建 SSML，交给 SpeechSynthesizer 写入输出文件，
//! 再根据结果原因判定成败

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::application::error::{CancellationReason, SynthesisError, TtsError};
use crate::application::ports::{ResultReason, SpeechSynthesizer, TtsBackend};
use crate::domain::ssml::SsmlBuilder;

pub struct NativeVendorBackend {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    ssml: SsmlBuilder,
}

impl NativeVendorBackend {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, ssml: SsmlBuilder) -> Self {
        Self { synthesizer, ssml }
    }
}

#[async_trait]
impl TtsBackend for NativeVendorBackend {
    fn name(&self) -> &'static str {
        "azure"
    }

    async fn synthesize(&self, text: &str, output: &Path) -> Result<(), TtsError> {
        let ssml = self.ssml.render(text)?;

        let outcome = self.synthesizer.speak_ssml(&ssml, output).await?;

        match outcome.reason {
            ResultReason::SynthesizingAudioCompleted => {
                let exists = tokio::fs::try_exists(output)
                    .await
                    .map_err(|e| TtsError::io(output, e))?;
                if !exists {
                    return Err(SynthesisError::MissingOutput {
                        path: output.to_path_buf(),
                    }
                    .into());
                }
                Ok(())
            }
            ResultReason::Canceled => {
                let (reason, detail) = outcome
                    .cancellation
                    .map(|c| (c.reason, c.error_details))
                    .unwrap_or((CancellationReason::Error, None));
                let err = SynthesisError::canceled(reason, detail);
                tracing::error!(
                    path = %output.display(),
                    reason = %reason,
                    "{}",
                    err
                );
                Err(err.into())
            }
        }
    }
}
