//! Credentials - Value Objects

use std::collections::BTreeSet;
use std::fmt;

use reqwest::Url;
use serde_json::{Map, Value};

use super::CredentialError;

const RELAY_SENTINEL_PREFIX: &str = "other[";
const RELAY_SENTINEL_SUFFIX: &str = "]";

pub const RELAY_SIGNING_KEY: &str = "TTS_SKEY";
pub const RELAY_API_URL: &str = "TTS_URL";
pub const RELAY_AUTH_TIME_URL: &str = "TTS_AUTH_TIME";

const RELAY_REQUIRED_KEYS: [&str; 3] = [RELAY_SIGNING_KEY, RELAY_API_URL, RELAY_AUTH_TIME_URL];

/// Azure 原生订阅凭据
#[derive(Clone, PartialEq, Eq)]
pub struct NativeCredentials {
    pub subscription_key: String,
    pub region: String,
}

impl fmt::Debug for NativeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCredentials")
            .field("subscription_key", &"***")
            .field("region", &self.region)
            .finish()
    }
}

/// 中转服务凭据
///
/// 不变量:
/// - api_url 为绝对 URL，且不以 `/` 结尾
#[derive(Clone, PartialEq, Eq)]
pub struct RelayCredentials {
    pub signing_key: String,
    pub api_url: String,
    pub auth_time_url: String,
}

impl fmt::Debug for RelayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCredentials")
            .field("signing_key", &"***")
            .field("api_url", &self.api_url)
            .field("auth_time_url", &self.auth_time_url)
            .finish()
    }
}

impl RelayCredentials {
    /// api_url 的路径部分，参与签名
    pub fn api_path(&self) -> String {
        // 构造时已校验过 URL
        Url::parse(&self.api_url)
            .map(|url| url.path().to_string())
            .unwrap_or_else(|_| "/".to_string())
    }
}

/// 凭据：原生订阅与中转二选一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Native(NativeCredentials),
    Relay(RelayCredentials),
}

impl Credentials {
    /// 解析订阅密钥字段
    ///
    /// `other[<json>]` 形式选择中转，否则要求 32 位十六进制订阅密钥
    pub fn parse(subscription_key: &str, region: &str) -> Result<Self, CredentialError> {
        let key = subscription_key.trim();

        if let Some(payload) = key
            .strip_prefix(RELAY_SENTINEL_PREFIX)
            .and_then(|rest| rest.strip_suffix(RELAY_SENTINEL_SUFFIX))
        {
            return Self::parse_relay_payload(payload).map(Self::Relay);
        }

        if !is_subscription_key(key) {
            return Err(CredentialError::InvalidSubscriptionKey);
        }

        Ok(Self::Native(NativeCredentials {
            subscription_key: key.to_string(),
            region: region.to_string(),
        }))
    }

    fn parse_relay_payload(payload: &str) -> Result<RelayCredentials, CredentialError> {
        let object: Map<String, Value> = serde_json::from_str(payload)
            .map_err(|e| CredentialError::MalformedPayload(e.to_string()))?;

        let missing: BTreeSet<&str> = RELAY_REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !object.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.into_iter().collect();
            return Err(CredentialError::MissingKeys(names.join(", ")));
        }

        let signing_key = string_field(&object, RELAY_SIGNING_KEY)?;
        let api_url = string_field(&object, RELAY_API_URL)?
            .trim_end_matches('/')
            .to_string();
        let auth_time_url = string_field(&object, RELAY_AUTH_TIME_URL)?;

        Url::parse(&api_url).map_err(|e| CredentialError::InvalidRelayUrl {
            url: api_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(RelayCredentials {
            signing_key,
            api_url,
            auth_time_url,
        })
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Result<String, CredentialError> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(CredentialError::MalformedPayload(format!(
            "{} must be a string, got {}",
            key, other
        ))),
        None => Err(CredentialError::MissingKeys(key.to_string())),
    }
}

fn is_subscription_key(key: &str) -> bool {
    key.len() == 32 && key.chars().all(|c| c.is_ascii_hexdigit())
}
