//! Voice Context - 音色参数
//!
//! 职责:
//! - 音色/风格/角色/语速/音量参数
//! - 单次合成请求

mod value_objects;

pub use value_objects::{
    SynthesisRequest, VoiceConfig, DEFAULT_RATE, DEFAULT_ROLE, DEFAULT_STYLE, DEFAULT_VOICE,
    DEFAULT_VOLUME,
};
