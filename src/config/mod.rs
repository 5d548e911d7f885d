//! Configuration Module
//!
//! 两层配置：
//! - 应用配置（环境变量 > TOML 文件 > 默认值）
//! - Provider 配置映射解析（azure_tts_* 键 -> 强类型设置）

mod loader;
pub mod provider;
mod types;

pub use loader::{load_config, load_config_from_path, print_config, ConfigError};
pub use provider::{ProviderConfig, ProviderSettings};
pub use types::{AppConfig, LogConfig};
