//! Provider Settings
//!
//! 把宿主传入的通用配置映射解析为强类型的 Provider 配置
//!
//! 空字符串与缺省等价，数值和布尔值会转成字符串

use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Duration;

use crate::application::error::TtsError;
use crate::domain::credentials::Credentials;
use crate::domain::voice::{
    VoiceConfig, DEFAULT_RATE, DEFAULT_ROLE, DEFAULT_STYLE, DEFAULT_VOICE, DEFAULT_VOLUME,
};
use crate::infrastructure::adapters::tts::{DEFAULT_OUTPUT_FORMAT, DEFAULT_TIMEOUT_SECS};

pub const KEY_VOICE: &str = "azure_tts_voice";
pub const KEY_STYLE: &str = "azure_tts_style";
pub const KEY_ROLE: &str = "azure_tts_role";
pub const KEY_RATE: &str = "azure_tts_rate";
pub const KEY_VOLUME: &str = "azure_tts_volume";
pub const KEY_SUBSCRIPTION_KEY: &str = "azure_tts_subscription_key";
pub const KEY_REGION: &str = "azure_tts_region";
pub const KEY_SSML_TEMPLATE: &str = "azure_tts_ssml_template";
pub const KEY_ENDPOINT: &str = "azure_tts_endpoint";
pub const KEY_OUTPUT_FORMAT: &str = "azure_tts_output_format";
pub const KEY_TIMEOUT_SECS: &str = "azure_tts_timeout_secs";
pub const KEY_TEMP_DIR: &str = "azure_tts_temp_dir";

pub const DEFAULT_REGION: &str = "eastus";
pub const DEFAULT_TEMP_DIR: &str = "data/temp/Azure_TTS";

/// 宿主传入的原始配置
pub type ProviderConfig = Map<String, Value>;

/// 解析后的 Provider 配置
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub voice: VoiceConfig,
    pub credentials: Credentials,
    /// 自定义 SSML 模板
    pub ssml_template: Option<String>,
    /// 覆盖默认的 Azure 合成地址
    pub endpoint: Option<String>,
    pub output_format: String,
    /// 合成请求超时
    pub timeout: Duration,
    pub temp_dir: PathBuf,
}

impl ProviderSettings {
    pub fn from_map(config: &ProviderConfig) -> Result<Self, TtsError> {
        let voice = VoiceConfig::new(
            string_or(config, KEY_VOICE, DEFAULT_VOICE)?,
            string_or(config, KEY_STYLE, DEFAULT_STYLE)?,
            string_or(config, KEY_ROLE, DEFAULT_ROLE)?,
            string_or(config, KEY_RATE, DEFAULT_RATE)?,
            string_or(config, KEY_VOLUME, DEFAULT_VOLUME)?,
        );

        let subscription_key = optional_string(config, KEY_SUBSCRIPTION_KEY)?.unwrap_or_default();
        let region = match optional_string(config, KEY_REGION)? {
            Some(region) => region,
            None => {
                tracing::warn!(
                    default_region = DEFAULT_REGION,
                    "{} not set, using default region",
                    KEY_REGION
                );
                DEFAULT_REGION.to_string()
            }
        };
        let credentials = Credentials::parse(&subscription_key, &region)?;

        let timeout_secs = match optional_string(config, KEY_TIMEOUT_SECS)? {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                TtsError::configuration(format!(
                    "{} must be a positive integer, got {:?}",
                    KEY_TIMEOUT_SECS, raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(TtsError::configuration(format!(
                "{} cannot be 0",
                KEY_TIMEOUT_SECS
            )));
        }

        Ok(Self {
            voice,
            credentials,
            ssml_template: optional_string(config, KEY_SSML_TEMPLATE)?,
            endpoint: optional_string(config, KEY_ENDPOINT)?,
            output_format: string_or(config, KEY_OUTPUT_FORMAT, DEFAULT_OUTPUT_FORMAT)?,
            timeout: Duration::from_secs(timeout_secs),
            temp_dir: PathBuf::from(string_or(config, KEY_TEMP_DIR, DEFAULT_TEMP_DIR)?),
        })
    }
}

fn optional_string(config: &ProviderConfig, key: &str) -> Result<Option<String>, TtsError> {
    let value = match config.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => {
            return Err(TtsError::configuration(format!(
                "{} must be a string, got {}",
                key, other
            )))
        }
    };
    Ok(if value.is_empty() { None } else { Some(value) })
}

fn string_or(config: &ProviderConfig, key: &str, default: &str) -> Result<String, TtsError> {
    Ok(optional_string(config, key)?.unwrap_or_else(|| default.to_string()))
}
