//! # 隐写编解码模块
//!
//! 编码流布局：4 字节大端序长度前缀，紧接着 `length` 个单字节字符码，
//! 每个字节占用扫描游标访问到的一个像素通道。格式没有魔数也没有版本号，
//! 任何缓冲区都可以交给 [`extract`]，其前 4 个扫描字节会被当作长度解释。

use crate::buffer::PixelBuffer;
use crate::charmap::{byte_to_char, encode_payload};
use crate::constants::LENGTH_PREFIX_BYTES;
use crate::cursor::ScanCursor;
use crate::digest::message_digest;
use crate::error::StegoError;
use crate::guard::{check_capacity, check_walk, within_bounds};
use tracing::{debug, warn};

/// [`embed`] 的结果：新的缓冲区以及嵌入前消息的摘要 (仅供显示)。
#[derive(Debug, Clone)]
pub struct Embedded {
    pub buffer: PixelBuffer,
    pub digest: String,
}

/// [`extract`] 的结果。空消息是一个独立的结果，而不是错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Message(String),
    Empty,
}

impl Extracted {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            Self::Empty => None,
        }
    }
}

/// 将消息嵌入到缓冲区的副本中，原缓冲区保持不变。
///
/// # Errors
///
/// 见 [`embed_in_place`]。
pub fn embed(buffer: &PixelBuffer, payload: &str, password: &str) -> Result<Embedded, StegoError> {
    let mut buffer = buffer.clone();
    let digest = embed_in_place(&mut buffer, payload, password)?;
    Ok(Embedded { buffer, digest })
}

/// 将消息直接写入缓冲区，返回消息的 SHA-256 摘要。
///
/// 密码只参与非空校验，编解码器不会保存它。所有检查都在写入第一个像素之前完成，
/// 因此任何错误都不会留下部分修改的缓冲区。
///
/// # Errors
///
/// * 消息或密码为空，或消息包含码点不小于 255 的字符：[`StegoError::InvalidPayload`]。
/// * `(length + 4) * 3 > rows * cols`，或对角线遍历会越界：[`StegoError::Capacity`]。
pub fn embed_in_place(
    buffer: &mut PixelBuffer,
    payload: &str,
    password: &str,
) -> Result<String, StegoError> {
    if payload.is_empty() || password.is_empty() {
        return Err(StegoError::InvalidPayload(
            "both message and password must be non-empty".to_string(),
        ));
    }

    let bytes = encode_payload(payload)?;
    check_capacity(bytes.len(), buffer.rows(), buffer.cols())?;
    check_walk(LENGTH_PREFIX_BYTES + bytes.len(), buffer.rows(), buffer.cols())?;

    let length = u32::try_from(bytes.len()).map_err(|_| StegoError::Capacity {
        required: bytes.len(),
        available: u32::MAX as usize,
    })?;

    let stream = length.to_be_bytes().into_iter().chain(bytes);
    ScanCursor::new().zip(stream).for_each(|(p, byte)| {
        let written = buffer.set(p.row, p.col, p.channel, byte);
        debug_assert!(written, "walk was checked against buffer bounds");
    });

    debug!(length, "message embedded");
    Ok(message_digest(payload))
}

/// 读取前 4 个扫描字节并解释为大端序长度。
///
/// # Errors
///
/// 图像小于 `4 × 4`，长度前缀无法完整读取时返回 [`StegoError::InvalidImage`]。
pub fn read_length(buffer: &PixelBuffer) -> Result<u32, StegoError> {
    read_prefix(buffer).map(|(length, _)| length)
}

fn read_prefix(buffer: &PixelBuffer) -> Result<(u32, ScanCursor), StegoError> {
    let mut cursor = ScanCursor::new();
    let mut prefix = [0u8; LENGTH_PREFIX_BYTES];

    for slot in prefix.iter_mut() {
        let p = cursor.current();
        *slot = buffer.get(p.row, p.col, p.channel).ok_or_else(|| {
            StegoError::InvalidImage(format!(
                "image {}x{} is too small to hold a length prefix",
                buffer.rows(),
                buffer.cols()
            ))
        })?;
        cursor.advance();
    }

    Ok((u32::from_be_bytes(prefix), cursor))
}

/// 解码前的密码校验，不涉及任何像素数据。
///
/// # Errors
///
/// * 提供的密码为空：[`StegoError::InvalidPayload`]。
/// * 与期望的密码不一致：[`StegoError::Auth`]。
pub fn authorize(password: &str, expected_password: &str) -> Result<(), StegoError> {
    if password.is_empty() {
        return Err(StegoError::InvalidPayload(
            "password must be non-empty".to_string(),
        ));
    }
    if password != expected_password {
        return Err(StegoError::Auth);
    }
    Ok(())
}

/// 在密码匹配的前提下从缓冲区中恢复消息。
///
/// 密码不匹配时不会读取任何像素。读取过程中游标越界时静默停止，
/// 返回已经读到的部分。
///
/// # Errors
///
/// * 提供的密码为空：[`StegoError::InvalidPayload`]。
/// * 密码不匹配：[`StegoError::Auth`]。
/// * 长度前缀无法读取，或读到没有对应字符的字节 255：[`StegoError::InvalidImage`]。
pub fn extract(
    buffer: &PixelBuffer,
    password: &str,
    expected_password: &str,
) -> Result<Extracted, StegoError> {
    authorize(password, expected_password)?;

    let (length, mut cursor) = read_prefix(buffer)?;
    debug!(length, "decoded message length");

    let mut message = String::new();
    for _ in 0..length {
        if !within_bounds(&cursor, buffer) {
            let p = cursor.current();
            warn!(
                row = p.row,
                col = p.col,
                channel = p.channel,
                recovered = message.len(),
                "stopped at image bounds"
            );
            break;
        }

        let p = cursor.current();
        let byte = buffer
            .get(p.row, p.col, p.channel)
            .ok_or_else(|| StegoError::InvalidImage("scan position out of range".to_string()))?;
        let c = byte_to_char(byte).ok_or_else(|| {
            StegoError::InvalidImage(format!(
                "byte {byte} at ({}, {}, {}) has no character mapping",
                p.row, p.col, p.channel
            ))
        })?;
        message.push(c);
        cursor.advance();
    }

    if message.is_empty() {
        Ok(Extracted::Empty)
    } else {
        Ok(Extracted::Message(message))
    }
}
