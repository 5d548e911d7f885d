//! TTS Adapter - 原生 Azure 与签名中转后端

mod azure_rest_synthesizer;
mod body_writer;
mod fake_speech_synthesizer;
mod native_backend;
mod relay_backend;

pub use azure_rest_synthesizer::{
    AzureRestSynthesizer, AzureRestSynthesizerConfig, DEFAULT_OUTPUT_FORMAT, DEFAULT_TIMEOUT_SECS,
};
pub use fake_speech_synthesizer::{FakeSpeechSynthesizer, FakeSynthesisBehavior};
pub use native_backend::NativeVendorBackend;
pub use relay_backend::RelayBackend;
