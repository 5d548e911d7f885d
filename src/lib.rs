//! aztts - Azure TTS 适配器
//!
//! 把文本合成为本地音频文件，支持两种后端：
//! - Azure 原生：SSML 模板 + Azure Speech REST 接口
//! - 签名中转：md5 签名 URL + 表单 POST
//!
//! 领域层 (domain/):
//! - voice: 音色参数
//! - credentials: 订阅密钥 / 中转凭据
//! - ssml: SSML 模板解析与渲染
//! - signing: 中转签名
//!
//! 应用层 (application/):
//! - Ports: TtsBackend, TtsProvider, SpeechSynthesizer
//! - error: 配置/合成/IO 错误
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Azure REST 合成器、原生后端、中转后端、临时文件目录
//!
//! Provider (provider/): 宿主入口与后端工厂

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod provider;

pub use application::error::{SynthesisError, TtsError};
pub use application::ports::TtsProvider;
pub use config::{load_config, AppConfig, ProviderConfig};
pub use provider::AzureTtsProvider;
