//! # 扫描游标模块
//!
//! 编码和解码共享同一条确定性的遍历路径：每一步 `row` 和 `col` 同时加一，
//! `channel` 在 `0, 1, 2` 之间循环。路径沿对角线前进，
//! 对于非正方形或较小的图像会很快越界，这是该格式本身的性质。

use crate::constants::CHANNELS;

/// 一个扫描位置 `(row, col, channel)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
    pub channel: usize,
}

/// 从 `(0, 0, 0)` 出发的扫描游标。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor {
    row: usize,
    col: usize,
    channel: usize,
}

impl ScanCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
            channel: self.channel,
        }
    }

    /// 前进一步。
    pub fn advance(&mut self) {
        self.row += 1;
        self.col += 1;
        self.channel = (self.channel + 1) % CHANNELS;
    }

    /// 当前位置是否仍在 `rows × cols` 范围内。
    pub fn is_within(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

/// 无界遍历；调用方负责边界判断。
impl Iterator for ScanCursor {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let position = self.current();
        self.advance();
        Some(position)
    }
}
