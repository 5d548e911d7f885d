//! 应用层错误定义
//!
//! 配置错误在构造时抛出，合成错误按次抛出，IO 错误携带文件路径

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::credentials::CredentialError;
use crate::domain::ssml::SsmlError;

/// 供应商取消原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    Error,
    EndOfStream,
    CancelledByUser,
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "Error",
            Self::EndOfStream => "EndOfStream",
            Self::CancelledByUser => "CancelledByUser",
        };
        f.write_str(name)
    }
}

/// 合成失败
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("synthesis canceled: {reason}, error details: {detail}")]
    CanceledWithDetail {
        reason: CancellationReason,
        detail: String,
    },

    #[error("synthesis canceled: {reason}")]
    Canceled { reason: CancellationReason },

    #[error("synthesis completed but output file is missing: {}", path.display())]
    MissingOutput { path: PathBuf },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("request timeout")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to build request: {0}")]
    Request(String),
}

impl SynthesisError {
    /// 由取消结果构造，只有 Error 原因才附带详情
    pub fn canceled(reason: CancellationReason, detail: Option<String>) -> Self {
        match (reason, detail) {
            (CancellationReason::Error, Some(detail)) => Self::CanceledWithDetail { reason, detail },
            (reason, _) => Self::Canceled { reason },
        }
    }

    /// 稳定的原因代码，供调用方记录
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::CanceledWithDetail { .. } | Self::Canceled { .. } => "canceled",
            Self::MissingOutput { .. } => "missing_output",
            Self::HttpStatus { .. } => "http_status",
            Self::Timeout => "timeout",
            Self::Transport(_) => "transport",
            Self::Request(_) => "request",
        }
    }

    /// 附加的详情
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::CanceledWithDetail { detail, .. } => Some(detail.as_str()),
            Self::HttpStatus { body, .. } => Some(body.as_str()),
            Self::Transport(message) | Self::Request(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SynthesisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Transport(format!("cannot connect to TTS service: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TtsError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<CredentialError> for TtsError {
    fn from(err: CredentialError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<SsmlError> for TtsError {
    fn from(err: SsmlError) -> Self {
        match err {
            SsmlError::Render(message) => Self::Synthesis(SynthesisError::Request(message)),
            other => Self::Configuration(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canceled_with_detail_message() {
        let err = SynthesisError::canceled(
            CancellationReason::Error,
            Some("WebSocket upgrade failed: 401".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "synthesis canceled: Error, error details: WebSocket upgrade failed: 401"
        );
        assert_eq!(err.reason_code(), "canceled");
        assert_eq!(err.detail(), Some("WebSocket upgrade failed: 401"));
    }

    #[test]
    fn test_canceled_without_detail_message() {
        let err = SynthesisError::canceled(CancellationReason::EndOfStream, Some("x".to_string()));
        assert_eq!(err.to_string(), "synthesis canceled: EndOfStream");

        let err = SynthesisError::canceled(CancellationReason::Error, None);
        assert_eq!(err.to_string(), "synthesis canceled: Error");
    }

    #[test]
    fn test_missing_output_message() {
        let err = SynthesisError::MissingOutput {
            path: PathBuf::from("/tmp/azure_x.wav"),
        };
        assert_eq!(
            err.to_string(),
            "synthesis completed but output file is missing: /tmp/azure_x.wav"
        );
    }

    #[test]
    fn test_credential_error_is_configuration() {
        let err: TtsError = CredentialError::InvalidSubscriptionKey.into();
        assert!(err.is_configuration());
    }
}
