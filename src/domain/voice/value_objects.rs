//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

pub const DEFAULT_VOICE: &str = "zh-CN-YunxiaNeural";
pub const DEFAULT_STYLE: &str = "cheerful";
pub const DEFAULT_ROLE: &str = "Boy";
pub const DEFAULT_RATE: &str = "1.0";
pub const DEFAULT_VOLUME: &str = "100";

const DEFAULT_LOCALE: &str = "zh-CN";

/// 音色参数
///
/// 构造后不可变，所有合成请求共享同一份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    voice: String,
    style: String,
    role: String,
    rate: String,
    volume: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
            style: DEFAULT_STYLE.to_string(),
            role: DEFAULT_ROLE.to_string(),
            rate: DEFAULT_RATE.to_string(),
            volume: DEFAULT_VOLUME.to_string(),
        }
    }
}

impl VoiceConfig {
    pub fn new(
        voice: impl Into<String>,
        style: impl Into<String>,
        role: impl Into<String>,
        rate: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            voice: voice.into(),
            style: style.into(),
            role: role.into(),
            rate: rate.into(),
            volume: volume.into(),
        }
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn rate(&self) -> &str {
        &self.rate
    }

    pub fn volume(&self) -> &str {
        &self.volume
    }

    /// 从音色名推断语言标签
    ///
    /// `zh-CN-YunxiaNeural` -> `zh-CN`，无法识别时回落到 `zh-CN`
    pub fn locale(&self) -> &str {
        let mut parts = self.voice.splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(lang), Some(region), Some(_))
                if lang.len() == 2
                    && region.len() == 2
                    && lang.chars().all(|c| c.is_ascii_lowercase())
                    && region.chars().all(|c| c.is_ascii_uppercase()) =>
            {
                &self.voice[..lang.len() + 1 + region.len()]
            }
            _ => DEFAULT_LOCALE,
        }
    }
}

/// 单次合成请求，用后即弃
#[derive(Debug, Clone)]
pub struct SynthesisRequest<'a> {
    pub text: &'a str,
    pub voice: &'a VoiceConfig,
}

impl<'a> SynthesisRequest<'a> {
    pub fn new(text: &'a str, voice: &'a VoiceConfig) -> Self {
        Self { text, voice }
    }
}
