//! Backend factory
//!
//! 根据解析出的凭据类型选择合成后端

use std::sync::Arc;

use crate::application::error::TtsError;
use crate::application::ports::TtsBackend;
use crate::config::ProviderSettings;
use crate::domain::credentials::Credentials;
use crate::domain::ssml::SsmlBuilder;
use crate::infrastructure::adapters::tts::{
    AzureRestSynthesizer, AzureRestSynthesizerConfig, NativeVendorBackend, RelayBackend,
};

/// 创建合成后端
///
/// - `Credentials::Native` -> Azure REST 合成器 + SSML
/// - `Credentials::Relay` -> 签名中转
pub fn create_backend(settings: &ProviderSettings) -> Result<Arc<dyn TtsBackend>, TtsError> {
    match &settings.credentials {
        Credentials::Native(native) => {
            let ssml = SsmlBuilder::new(&settings.voice, settings.ssml_template.as_deref())?;

            let mut config = AzureRestSynthesizerConfig::new(native)
                .with_output_format(settings.output_format.clone())
                .with_timeout(settings.timeout.as_secs());
            if let Some(endpoint) = &settings.endpoint {
                config = config.with_endpoint(endpoint.clone());
            }

            tracing::info!(
                region = %native.region,
                endpoint = %config.endpoint,
                custom_template = settings.ssml_template.is_some(),
                "Using native Azure TTS backend"
            );

            let synthesizer = Arc::new(AzureRestSynthesizer::new(config)?);
            Ok(Arc::new(NativeVendorBackend::new(synthesizer, ssml)))
        }
        Credentials::Relay(relay) => {
            if settings.ssml_template.is_some() {
                tracing::warn!("SSML template is ignored by the relay backend");
            }

            tracing::info!(api_url = %relay.api_url, "Using relay TTS backend");

            Ok(Arc::new(RelayBackend::new(
                relay.clone(),
                settings.voice.clone(),
                settings.timeout,
            )?))
        }
    }
}
