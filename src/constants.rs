/// 长度前缀占用的扫描步数。
/// 消息长度以 `u32` 大端序写入，每一步写入一个完整字节，因此需要 4 步。
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// 每个像素的通道数 (RGB)。
pub const CHANNELS: usize = 3;

/// 容量检查中每个字符槽位按 3 字节计算。
/// 实际每个字符只消耗一个通道，这是一个偏保守的估计，必须原样保留。
pub const CAPACITY_SLOT_BYTES: usize = 3;

/// 可表示的码点 / 字节值的上界 (不含)。
/// 码点 `0..=254` 与字节值一一对应，255 及以上无法表示。
pub const REPRESENTABLE_LIMIT: u32 = 255;

/// 隐写输出文件名的前缀。
pub const ENCODED_FILE_PREFIX: &str = "encoded_image_";

/// 隐写输出文件的扩展名。必须是无损格式，否则嵌入的字节会被破坏。
pub const ENCODED_FILE_EXTENSION: &str = "png";

/// 输出文件名中时间戳的格式。
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// 默认的会话文件，用于记住最近一次编码时使用的密码。
pub const DEFAULT_SESSION_FILE: &str = ".pixel_cipher_session.toml";
