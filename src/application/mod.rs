//! 应用层
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsBackend、TtsProvider、SpeechSynthesizer）
//! - error: 应用层错误定义

pub mod error;
pub mod ports;

pub use error::{CancellationReason, SynthesisError, TtsError};

pub use ports::{
    CancellationDetails, ResultReason, SpeechSynthesizer, SynthesisOutcome, TtsBackend,
    TtsProvider,
};
