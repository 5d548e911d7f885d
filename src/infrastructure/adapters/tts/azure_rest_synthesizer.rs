//! Azure REST Synthesizer - 通过 Azure Speech REST 接口合成
//!
//! 实现 SpeechSynthesizer trait，不依赖供应商 SDK
//!
//! 外部 API:
//! POST https://{region}.tts.speech.microsoft.com/cognitiveservices/v1
//! Headers: Ocp-Apim-Subscription-Key, Content-Type: application/ssml+xml,
//!          X-Microsoft-OutputFormat, User-Agent
//! Request: SSML 文档
//! Response: 音频二进制

use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use super::body_writer::{error_body, write_response_body};
use crate::application::error::{CancellationReason, SynthesisError, TtsError};
use crate::application::ports::{SpeechSynthesizer, SynthesisOutcome};
use crate::domain::credentials::NativeCredentials;

pub const DEFAULT_OUTPUT_FORMAT: &str = "raw-48khz-16bit-mono-pcm";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 按区域拼接默认合成地址
fn default_endpoint(region: &str) -> String {
    format!(
        "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
        region
    )
}

/// Azure REST 合成器配置
#[derive(Clone)]
pub struct AzureRestSynthesizerConfig {
    /// 合成接口地址
    pub endpoint: String,
    pub subscription_key: String,
    /// X-Microsoft-OutputFormat
    pub output_format: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AzureRestSynthesizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureRestSynthesizerConfig")
            .field("endpoint", &self.endpoint)
            .field("subscription_key", &"***")
            .field("output_format", &self.output_format)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AzureRestSynthesizerConfig {
    pub fn new(credentials: &NativeCredentials) -> Self {
        Self {
            endpoint: default_endpoint(&credentials.region),
            subscription_key: credentials.subscription_key.clone(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Azure REST 合成器
pub struct AzureRestSynthesizer {
    client: Client,
    config: AzureRestSynthesizerConfig,
}

impl AzureRestSynthesizer {
    pub fn new(config: AzureRestSynthesizerConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TtsError::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureRestSynthesizer {
    async fn speak_ssml(&self, ssml: &str, output: &Path) -> Result<SynthesisOutcome, TtsError> {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            ssml_len = ssml.len(),
            output_format = %self.config.output_format,
            "Sending Azure synthesis request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.config.output_format)
            .body(ssml.to_string())
            .send()
            .await
            .map_err(SynthesisError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Ok(SynthesisOutcome::canceled(
                CancellationReason::Error,
                Some(format!("HTTP {}: {}", status, body)),
            ));
        }

        let written = write_response_body(response, output).await?;

        tracing::info!(
            path = %output.display(),
            audio_size = written,
            "Azure synthesis completed"
        );

        Ok(SynthesisOutcome::completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> NativeCredentials {
        NativeCredentials {
            subscription_key: "0123456789abcdef0123456789abcdef".to_string(),
            region: "eastasia".to_string(),
        }
    }

    #[test]
    fn test_config_default() {
        let config = AzureRestSynthesizerConfig::new(&credentials());
        assert_eq!(
            config.endpoint,
            "https://eastasia.tts.speech.microsoft.com/cognitiveservices/v1"
        );
        assert_eq!(config.output_format, "raw-48khz-16bit-mono-pcm");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_config_builder() {
        let config = AzureRestSynthesizerConfig::new(&credentials())
            .with_endpoint("http://localhost:9000/tts")
            .with_output_format("riff-24khz-16bit-mono-pcm")
            .with_timeout(30);
        assert_eq!(config.endpoint, "http://localhost:9000/tts");
        assert_eq!(config.output_format, "riff-24khz-16bit-mono-pcm");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AzureRestSynthesizerConfig::new(&credentials());
        assert!(!format!("{:?}", config).contains("0123456789abcdef"));
    }
}
