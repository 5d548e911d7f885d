//! Credentials Context - 供应商凭据
//!
//! 订阅密钥字段决定走 Azure 原生接口还是签名中转

mod errors;
mod value_objects;

pub use errors::CredentialError;
pub use value_objects::{
    Credentials, NativeCredentials, RelayCredentials, RELAY_API_URL, RELAY_AUTH_TIME_URL,
    RELAY_SIGNING_KEY,
};
