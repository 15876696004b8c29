//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_SESSION_FILE;
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

/// 在图像像素通道中嵌入文本，并在密码校验通过后恢复文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "在图像像素通道中嵌入文本，并在密码校验通过后恢复文本。输出图像始终保存为无损 PNG。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v: info, -vv: debug)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (嵌入)、decode (恢复) 和 digest (文件摘要)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文本嵌入图像，输出 encoded_image_<时间戳>.png。
    Encode(EncodeArgs),

    /// 校验密码后从图像中恢复文本。
    Decode(DecodeArgs),

    /// 显示图像文件的 SHA-256 摘要。
    Digest(DigestArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["message", "text"])))]
pub struct EncodeArgs {
    /// 作为载体的输入图像 (PNG, JPEG, BMP 等)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要嵌入的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 包含要嵌入文本的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 密码，解码时需要再次提供。
    #[arg(short, long)]
    pub password: String,

    /// 输出目录，默认为当前工作目录。
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// 保存记住的密码的会话文件。
    #[arg(short, long, default_value = DEFAULT_SESSION_FILE)]
    pub session: PathBuf,

    /// 保存后用系统默认程序打开输出图像。
    #[arg(long)]
    pub open: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已嵌入文本的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 密码，必须与会话中记住的密码一致。
    #[arg(short, long)]
    pub password: String,

    /// 保存记住的密码的会话文件。
    #[arg(short, long, default_value = DEFAULT_SESSION_FILE)]
    pub session: PathBuf,
}

/// 'digest' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DigestArgs {
    /// 要计算摘要的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
