//! # 摘要模块
//!
//! 仅供显示的 SHA-256 十六进制摘要，不参与编解码的正确性。

use sha2::{Digest, Sha256};
use std::path::Path;
use std::{fs, io};

/// 消息明文 (UTF-8) 的 SHA-256 十六进制摘要。
pub fn message_digest(message: &str) -> String {
    sha256_hex(message.as_bytes())
}

/// 文件原始字节的 SHA-256 十六进制摘要。
pub fn file_digest(path: impl AsRef<Path>) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(sha256_hex(&bytes))
}

/// 判断一段文本是否形如先前显示的摘要 (64 个小写十六进制字符)。
pub fn looks_like_digest(text: &str) -> bool {
    text.len() == 64 && text.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
