//! 中转签名
//!
//! `sign = timestamp-nonce-0-md5(path-timestamp-nonce-0-key)`

use rand::Rng;

const NONCE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const NONCE_LEN: usize = 10;

/// 生成 10 位小写字母数字 nonce
pub fn generate_nonce() -> String {
    let mut rng = rand::rng();
    (0..NONCE_LEN)
        .map(|_| NONCE_CHARSET[rng.random_range(0..NONCE_CHARSET.len())] as char)
        .collect()
}

/// 计算签名摘要
pub fn compute_signature(path: &str, timestamp: i64, nonce: &str, signing_key: &str) -> String {
    let digest = md5::compute(format!("{}-{}-{}-0-{}", path, timestamp, nonce, signing_key));
    format!("{:x}", digest)
}

/// 拼接带签名的请求 URL
pub fn sign_url(
    api_url: &str,
    path: &str,
    timestamp: i64,
    nonce: &str,
    signing_key: &str,
) -> String {
    let signature = compute_signature(path, timestamp, nonce, signing_key);
    format!("{}?sign={}-{}-0-{}", api_url, timestamp, nonce, signature)
}
