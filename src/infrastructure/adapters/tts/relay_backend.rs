//! Relay Backend - 签名中转合成后端
//!
//! 外部中转 API:
//! GET  {TTS_AUTH_TIME}             -> {"timestamp": <unix seconds>}
//! POST {TTS_URL}?sign=ts-nonce-0-md5   (form: text, voice, style, role, rate, volume)
//! Response: 音频二进制

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use super::body_writer::{error_body, write_response_body};
use crate::application::error::{SynthesisError, TtsError};
use crate::application::ports::TtsBackend;
use crate::domain::credentials::RelayCredentials;
use crate::domain::signing::{generate_nonce, sign_url};
use crate::domain::voice::{SynthesisRequest, VoiceConfig};

/// 时间同步超时
const TIME_SYNC_TIMEOUT: Duration = Duration::from_secs(3);

/// 中转表单
#[derive(Debug, Serialize)]
struct RelayForm<'a> {
    text: &'a str,
    voice: &'a str,
    style: &'a str,
    role: &'a str,
    rate: &'a str,
    volume: &'a str,
}

impl<'a> From<SynthesisRequest<'a>> for RelayForm<'a> {
    fn from(request: SynthesisRequest<'a>) -> Self {
        Self {
            text: request.text,
            voice: request.voice.voice(),
            style: request.voice.style(),
            role: request.voice.role(),
            rate: request.voice.rate(),
            volume: request.voice.volume(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthTimeResponse {
    timestamp: i64,
}

/// 中转后端
pub struct RelayBackend {
    client: Client,
    credentials: RelayCredentials,
    api_path: String,
    voice: VoiceConfig,
    timeout: Duration,
    /// 服务器时间 - 本地时间（秒），仅作为优化提示
    time_offset: AtomicI64,
}

impl RelayBackend {
    pub fn new(
        credentials: RelayCredentials,
        voice: VoiceConfig,
        timeout: Duration,
    ) -> Result<Self, TtsError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TtsError::configuration(format!("failed to build HTTP client: {}", e)))?;
        let api_path = credentials.api_path();

        Ok(Self {
            client,
            credentials,
            api_path,
            voice,
            timeout,
            time_offset: AtomicI64::new(0),
        })
    }

    /// 当前缓存的时钟偏移
    pub fn time_offset(&self) -> i64 {
        self.time_offset.load(Ordering::Relaxed)
    }

    /// 同步后的时间戳
    ///
    /// 时间服务不可用时退回本地时钟加上次偏移
    async fn sync_timestamp(&self) -> i64 {
        match self.fetch_server_time().await {
            Ok(server_time) => {
                let offset = server_time - chrono::Utc::now().timestamp();
                self.time_offset.store(offset, Ordering::Relaxed);
                server_time
            }
            Err(e) => {
                tracing::warn!(
                    auth_time_url = %self.credentials.auth_time_url,
                    error = %e,
                    "Time sync failed, falling back to local clock"
                );
                chrono::Utc::now().timestamp() + self.time_offset()
            }
        }
    }

    async fn fetch_server_time(&self) -> Result<i64, SynthesisError> {
        let response = self
            .client
            .get(&self.credentials.auth_time_url)
            .timeout(TIME_SYNC_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::HttpStatus {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let body: AuthTimeResponse = response.json().await?;
        Ok(body.timestamp)
    }

    /// 生成带签名的请求 URL
    pub async fn signed_url(&self) -> String {
        let timestamp = self.sync_timestamp().await;
        let nonce = generate_nonce();
        sign_url(
            &self.credentials.api_url,
            &self.api_path,
            timestamp,
            &nonce,
            &self.credentials.signing_key,
        )
    }
}

#[async_trait]
impl TtsBackend for RelayBackend {
    fn name(&self) -> &'static str {
        "otts"
    }

    async fn synthesize(&self, text: &str, output: &Path) -> Result<(), TtsError> {
        let url = self.signed_url().await;
        let form = RelayForm::from(SynthesisRequest::new(text, &self.voice));

        tracing::debug!(
            api_url = %self.credentials.api_url,
            text_len = text.len(),
            voice = %self.voice.voice(),
            "Sending relay TTS request"
        );

        let response = self
            .client
            .post(&url)
            .form(&form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(SynthesisError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(SynthesisError::HttpStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let written = write_response_body(response, output).await?;

        tracing::info!(
            path = %output.display(),
            audio_size = written,
            "Relay synthesis completed"
        );

        Ok(())
    }
}
