//! # 错误类型模块
//!
//! 隐写编解码器的所有失败情形。截断读取和空消息都不是错误，
//! 它们由 [`crate::steganography::Extracted`] 表示。

use thiserror::Error;

/// 编码或解码过程中可能出现的错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 消息或密码为空，或消息中包含无法表示的字符。
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// 消息对于该图像来说过大。
    #[error("message too large for image: required {required}, available {available}")]
    Capacity { required: usize, available: usize },

    /// 像素缓冲区无法加载或格式不正确。
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// 解码时密码不匹配。
    #[error("incorrect password")]
    Auth,
}
