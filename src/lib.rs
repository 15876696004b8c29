//! # pixel_cipher 库
//!
//! 本库包含像素通道文本嵌入工具的核心逻辑：编解码器及其容量/边界检查，
//! 以及命令行外壳使用的会话、摘要和命令处理模块。

// 声明库包含的所有模块。

pub mod buffer;
pub mod charmap;
pub mod cli;
pub mod constants;
pub mod cursor;
pub mod digest;
pub mod error;
pub mod guard;
pub mod handler;
pub mod session;
pub mod steganography;

pub use buffer::PixelBuffer;
pub use error::StegoError;
pub use steganography::{Embedded, Extracted, authorize, embed, embed_in_place, extract};
