//! # 字符映射模块
//!
//! 码点 `0..=254` 与字节值 `0..=254` 之间的恒等双射。

use crate::constants::REPRESENTABLE_LIMIT;
use crate::error::StegoError;

/// 将字符映射为单个字节。码点不小于 255 时返回 `None`。
pub fn char_to_byte(c: char) -> Option<u8> {
    let code = u32::from(c);
    (code < REPRESENTABLE_LIMIT).then_some(code as u8)
}

/// 将字节映射回字符。字节 255 没有对应字符。
pub fn byte_to_char(byte: u8) -> Option<char> {
    (u32::from(byte) < REPRESENTABLE_LIMIT).then(|| char::from(byte))
}

/// 将整条消息转换为字节序列。
///
/// # Errors
///
/// 遇到第一个无法表示的字符时返回 [`StegoError::InvalidPayload`]，
/// 错误信息中包含该字符及其 (按字符计数的) 位置。
pub fn encode_payload(payload: &str) -> Result<Vec<u8>, StegoError> {
    payload
        .chars()
        .enumerate()
        .map(|(i, c)| {
            char_to_byte(c).ok_or_else(|| {
                StegoError::InvalidPayload(format!(
                    "character {c:?} (U+{:04X}) at index {i} is outside the representable range",
                    u32::from(c)
                ))
            })
        })
        .collect()
}
