//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod speech_synthesizer;
mod tts_backend;

pub use speech_synthesizer::{
    CancellationDetails, ResultReason, SpeechSynthesizer, SynthesisOutcome,
};
pub use tts_backend::{TtsBackend, TtsProvider};
