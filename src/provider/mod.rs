//! Provider - 宿主入口与后端工厂

mod azure_tts;
mod factory;

pub use azure_tts::{AzureTtsProvider, PROVIDER_DISPLAY_NAME, PROVIDER_ID};
pub use factory::create_backend;
