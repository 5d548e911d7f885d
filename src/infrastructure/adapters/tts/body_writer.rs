//! 响应体落盘

use std::path::Path;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::application::error::{SynthesisError, TtsError};

/// 写盘缓冲块大小
const CHUNK_SIZE: usize = 8 * 1024;

/// 将 HTTP 响应体按块流式写入文件，返回写入字节数
pub async fn write_response_body(response: reqwest::Response, path: &Path) -> Result<u64, TtsError> {
    let file = File::create(path)
        .await
        .map_err(|e| TtsError::io(path, e))?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);

    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(SynthesisError::from)?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| TtsError::io(path, e))?;
        written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| TtsError::io(path, e))?;

    Ok(written)
}

/// 读取错误响应体，失败时返回空串
pub async fn error_body(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_default()
}
