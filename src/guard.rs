//! # 容量与边界检查模块
//!
//! 两项相互独立的检查：
//! * 嵌入前的容量检查 `(length + 4) * 3 <= rows * cols`。该公式并不精确，
//!   它按每个字符 3 字节估算，也不考虑通道数。接受与拒绝的输入必须与此公式完全一致。
//! * 解码过程中的运行时边界检查：游标越界时停止读取，而不是报错。

use crate::buffer::PixelBuffer;
use crate::constants::{CAPACITY_SLOT_BYTES, LENGTH_PREFIX_BYTES};
use crate::cursor::ScanCursor;
use crate::error::StegoError;

/// 嵌入前的容量检查。
///
/// # Errors
///
/// 当 `(payload_len + 4) * 3 > rows * cols` 时返回 [`StegoError::Capacity`]。
pub fn check_capacity(payload_len: usize, rows: usize, cols: usize) -> Result<(), StegoError> {
    let required = payload_len
        .checked_add(LENGTH_PREFIX_BYTES)
        .and_then(|n| n.checked_mul(CAPACITY_SLOT_BYTES))
        .unwrap_or(usize::MAX);
    let available = rows.saturating_mul(cols);

    if required > available {
        return Err(StegoError::Capacity {
            required,
            available,
        });
    }
    Ok(())
}

/// 检查长度为 `steps` 的对角线遍历是否完全落在 `rows × cols` 内。
///
/// 容量公式无法保证这一点 (例如 `100 × 1` 的图像)，因此嵌入时在写入任何像素前
/// 额外执行此检查。
///
/// # Errors
///
/// 当 `steps > min(rows, cols)` 时返回 [`StegoError::Capacity`]。
pub fn check_walk(steps: usize, rows: usize, cols: usize) -> Result<(), StegoError> {
    let available = rows.min(cols);
    if steps > available {
        return Err(StegoError::Capacity {
            required: steps,
            available,
        });
    }
    Ok(())
}

/// 解码时的运行时边界条件。
pub fn within_bounds(cursor: &ScanCursor, buffer: &PixelBuffer) -> bool {
    cursor.is_within(buffer.rows(), buffer.cols())
}
