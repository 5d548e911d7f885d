//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::provider::{KEY_REGION, KEY_SUBSCRIPTION_KEY, KEY_VOICE};
use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `AZTTS_PROVIDER__AZURE_TTS_SUBSCRIPTION_KEY=0123...`
/// - `AZTTS_PROVIDER__AZURE_TTS_REGION=eastasia`
/// - `AZTTS_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: AZTTS_，层级分隔符: __
    // 值保持字符串，由 Provider 自行解析
    builder = builder.add_source(
        Environment::with_prefix("AZTTS")
            .prefix_separator("_")
            .separator("__"),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 凭据格式由 Provider 构造时校验，这里只检查必填项
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.log.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Log level cannot be empty".to_string(),
        ));
    }

    let has_key = config
        .provider
        .get(KEY_SUBSCRIPTION_KEY)
        .and_then(|v| v.as_str())
        .is_some_and(|s| !s.trim().is_empty());
    if !has_key {
        return Err(ConfigError::ValidationError(format!(
            "provider.{} is required",
            KEY_SUBSCRIPTION_KEY
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 不输出订阅密钥
pub fn print_config(config: &AppConfig) {
    let get = |key: &str| {
        config
            .provider
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or("<default>")
            .to_string()
    };
    let relay = config
        .provider
        .get(KEY_SUBSCRIPTION_KEY)
        .and_then(|v| v.as_str())
        .is_some_and(|s| s.trim_start().starts_with("other["));

    tracing::info!("=== Application Configuration ===");
    tracing::info!("Backend: {}", if relay { "relay" } else { "azure" });
    tracing::info!("Region: {}", get(KEY_REGION));
    tracing::info!("Voice: {}", get(KEY_VOICE));
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.provider.insert(
            KEY_SUBSCRIPTION_KEY.to_string(),
            json!("0123456789abcdef0123456789abcdef"),
        );
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_error_for_missing_key() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_log_level() {
        let mut config = valid_config();
        config.log.level = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[provider]
azure_tts_subscription_key = "0123456789abcdef0123456789abcdef"
azure_tts_region = "eastasia"
azure_tts_rate = "1.2"

[log]
level = "debug"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.provider.get(KEY_REGION).unwrap(), "eastasia");
        assert_eq!(config.provider.get("azure_tts_rate").unwrap(), "1.2");
    }
}
