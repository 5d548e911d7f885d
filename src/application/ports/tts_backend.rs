//! TTS Backend Port - 合成后端抽象
//!
//! 原生 Azure 与签名中转两种后端实现同一接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::application::error::TtsError;

/// 合成后端
///
/// 将文本合成为音频并写入 `output`。调用结束时要么文件已完整写入，
/// 要么返回错误；失败后的文件清理由调用方负责。
#[async_trait]
pub trait TtsBackend: Send + Sync {
    /// 后端名称（用于日志和临时文件前缀）
    fn name(&self) -> &'static str;

    /// 执行一次合成
    async fn synthesize(&self, text: &str, output: &Path) -> Result<(), TtsError>;
}

/// 宿主程序期望的 TTS Provider 能力接口
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// 注册 ID
    fn id(&self) -> &'static str;

    /// 展示名称
    fn display_name(&self) -> &'static str;

    /// 合成文本并返回音频文件路径，文件所有权转移给调用方
    async fn get_audio(&self, text: &str) -> Result<PathBuf, TtsError>;
}
