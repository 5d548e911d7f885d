//! Domain Layer - 领域层
//!
//! - Voice: 音色参数
//! - Credentials: 供应商凭据
//! - SSML: 请求文档模板

pub mod credentials;
pub mod ssml;
pub mod voice;

// 中转签名
pub mod signing;
