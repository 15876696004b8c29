//! # 命令处理逻辑模块
//!
//! 包含处理 `encode`、`decode` 和 `digest` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、会话中记住的密码、调用核心编解码函数以及向用户报告结果。

use crate::buffer::PixelBuffer;
use crate::cli::{DecodeArgs, DigestArgs, EncodeArgs};
use crate::constants::{ENCODED_FILE_EXTENSION, ENCODED_FILE_PREFIX, TIMESTAMP_FORMAT};
use crate::digest::{file_digest, looks_like_digest};
use crate::error::StegoError;
use crate::session::Session;
use crate::steganography::{Extracted, authorize, embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::{fs, io};
use tracing::{info, warn};

/// 处理 'Encode' 命令的执行逻辑。
///
/// 读取载体图像和消息、调用 [`embed`] 嵌入消息，将结果以无损 PNG 写入
/// `encoded_image_<时间戳>.png`，并把密码摘要记入会话文件。
/// 会话文件在写出图像之前加载，损坏的会话不会留下输出文件。
///
/// # Returns
///
/// 输出图像的路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 消息或密码为空，或消息包含无法表示的字符。
/// * 图像没有足够的空间容纳消息。
/// * 会话文件无法解析，或输出目录不存在。
/// * 无法写入输出图像或会话文件。
pub fn handle_encode(args: EncodeArgs) -> Result<PathBuf> {
    let message = match (&args.message, &args.text) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("No message given. Use --message or --text."),
    };
    let message = message.trim();

    if looks_like_digest(message) {
        warn!("the message looks like a previously displayed digest");
    }

    let picture = PixelBuffer::load(&args.image).with_context(|| {
        format!(
            "Unable to load image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let embedded = embed(&picture, message, &args.password).map_err(|e| match e {
        StegoError::Capacity {
            required,
            available,
        } => anyhow::anyhow!(
            "Message too large for image. \nRequired: {}, Available: {}",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context("Failed to embed the message."),
    })?;

    let mut session = Session::load(&args.session).with_context(|| {
        format!(
            "Unable to read session file: {}",
            args.session.to_string_lossy().red().bold()
        )
    })?;

    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Unable to determine the working directory")?,
    };
    anyhow::ensure!(
        out_dir.is_dir(),
        "Output directory does not exist: {}",
        out_dir.to_string_lossy().red().bold()
    );
    let output_name = encoded_file_name(chrono::Local::now());
    let output_path = out_dir.join(&output_name);

    embedded
        .buffer
        .into_rgb_image()?
        .save_with_format(&output_path, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                output_path.to_string_lossy().red().bold()
            )
        })?;
    info!(path = %output_path.display(), "encoded image written");

    session.remember(&args.password);
    session.save(&args.session).with_context(|| {
        format!(
            "Unable to write session file: {}",
            args.session.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Message encoded successfully! Saved as {}",
        output_name.green().bold()
    );
    println!("Message SHA-256: {}", embedded.digest.cyan());

    if args.open {
        if let Err(e) = open_in_viewer(&output_path) {
            warn!(error = %e, "failed to open the encoded image");
            eprintln!("{} {e}", "Failed to open the image:".red().bold());
        }
    }

    Ok(output_path)
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 若文件名以 `encoded_image_` 开头，先显示文件摘要；随后以会话中记住的密码为准
/// 校验提供的密码，通过后调用 [`extract`] 恢复消息。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取会话文件或图像文件。
/// * 密码为空或与记住的密码不一致 (没有记住的密码时也视为不一致)。
/// * 图像过小或包含无法映射的字节。
pub fn handle_decode(args: DecodeArgs) -> Result<Extracted> {
    if is_encoded_file_name(&args.image) {
        let digest = file_digest(&args.image).with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?;
        println!("Encoded image SHA-256: {}", digest.cyan());
    }

    let session = Session::load(&args.session).with_context(|| {
        format!(
            "Unable to read session file: {}",
            args.session.to_string_lossy().red().bold()
        )
    })?;

    // 会话只保存密码摘要；没有记住的密码时，任何非空密码都无法通过校验。
    let supplied = Session::password_token(&args.password);
    let expected = session.password_digest.unwrap_or_default();
    authorize(&supplied, &expected)?;

    let picture = PixelBuffer::load(&args.image).with_context(|| {
        format!(
            "Unable to load image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let extracted = extract(&picture, &supplied, &expected).with_context(|| {
        format!(
            "Failed to decode message from '{}'.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    match &extracted {
        Extracted::Message(message) => {
            println!("{}", "Message decoded successfully".green().bold());
            println!("{message}");
        }
        Extracted::Empty => {
            println!("{}", "Decoding completed - No message found".yellow());
            println!("No message found or empty message");
        }
    }

    Ok(extracted)
}

/// 处理 'Digest' 命令：显示文件原始字节的 SHA-256 摘要。
///
/// # Errors
///
/// 无法读取文件时返回错误。
pub fn handle_digest(args: DigestArgs) -> Result<String> {
    let digest = file_digest(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    println!("{}", digest);
    Ok(digest)
}

/// 生成 `encoded_image_<YYYYMMDDHHMMSS>.png` 形式的文件名。
pub fn encoded_file_name<Tz>(now: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{ENCODED_FILE_PREFIX}{}.{ENCODED_FILE_EXTENSION}",
        now.format(TIMESTAMP_FORMAT)
    )
}

/// 文件名是否以 `encoded_image_` 开头。
pub fn is_encoded_file_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ENCODED_FILE_PREFIX))
}

fn open_in_viewer(path: &Path) -> io::Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    let status = command.arg(path).status()?;
    if !status.success() {
        return Err(io::Error::other(format!("viewer exited with {status}")));
    }
    Ok(())
}
