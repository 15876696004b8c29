//! # 像素缓冲区模块
//!
//! [`PixelBuffer`] 是一个按 `[row][col][channel]` 索引的三维 `u8` 数组，
//! 通道数固定为 3。编解码器只依赖通道顺序在编码与解码之间保持一致。

use crate::constants::CHANNELS;
use crate::error::StegoError;
use image::RgbImage;
use std::path::Path;

/// 行优先存储的 `rows × cols × 3` 像素数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 由原始字节构造缓冲区。
    ///
    /// # Errors
    ///
    /// 当 `data` 的长度不等于 `rows * cols * 3` 时返回 [`StegoError::InvalidImage`]。
    pub fn new(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self, StegoError> {
        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                StegoError::InvalidImage(format!("dimensions {rows}x{cols} overflow"))
            })?;

        if data.len() != expected {
            return Err(StegoError::InvalidImage(format!(
                "expected {expected} bytes for {rows}x{cols}x{CHANNELS}, got {}",
                data.len()
            )));
        }

        Ok(Self { rows, cols, data })
    }

    /// 构造一个全零的缓冲区。
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols * CHANNELS],
        }
    }

    /// 解码图像文件并转换为 8 位 RGB 缓冲区。
    ///
    /// # Errors
    ///
    /// 文件无法读取或无法解码时返回 [`StegoError::InvalidImage`]。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StegoError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| StegoError::InvalidImage(format!("{}: {e}", path.display())))?;
        Ok(Self::from(image.to_rgb8()))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// 读取 `[row][col][channel]`，越界时返回 `None`。
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.offset(row, col, channel).map(|i| self.data[i])
    }

    /// 写入 `[row][col][channel]`，越界时返回 `false` 且不做任何修改。
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) -> bool {
        match self.offset(row, col, channel) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    fn offset(&self, row: usize, col: usize, channel: usize) -> Option<usize> {
        (row < self.rows && col < self.cols && channel < CHANNELS)
            .then(|| (row * self.cols + col) * CHANNELS + channel)
    }

    /// 转换为 `image` 的 RGB 图像，用于无损保存。
    ///
    /// # Errors
    ///
    /// 尺寸超出 `u32` 范围时返回 [`StegoError::InvalidImage`]。
    pub fn into_rgb_image(self) -> Result<RgbImage, StegoError> {
        let width = u32::try_from(self.cols)
            .map_err(|_| StegoError::InvalidImage(format!("width {} too large", self.cols)))?;
        let height = u32::try_from(self.rows)
            .map_err(|_| StegoError::InvalidImage(format!("height {} too large", self.rows)))?;

        RgbImage::from_raw(width, height, self.data).ok_or_else(|| {
            StegoError::InvalidImage("pixel data does not match image dimensions".to_string())
        })
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(image: RgbImage) -> Self {
        let rows = image.height() as usize;
        let cols = image.width() as usize;
        Self {
            rows,
            cols,
            data: image.into_raw(),
        }
    }
}
