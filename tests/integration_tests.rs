use image::{ImageBuffer, Rgb};
use pixel_cipher::{
    StegoError,
    cli::{DecodeArgs, DigestArgs, EncodeArgs},
    digest::message_digest,
    handler::{handle_decode, handle_digest, handle_encode, is_encoded_file_name},
    session::Session,
    steganography::Extracted,
};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut raw_pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    let img_buf: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, raw_pixels).expect("Pixel data matches dimensions.");
    img_buf.save(path).expect("Failed to create test image.");
}

fn encode_args(image: &Path, message: &str, password: &str, dir: &Path) -> EncodeArgs {
    EncodeArgs {
        image: image.to_path_buf(),
        message: Some(message.to_string()),
        text: None,
        password: password.to_string(),
        out_dir: Some(dir.to_path_buf()),
        session: dir.join("session.toml"),
        open: false,
    }
}

fn decode_args(image: &Path, password: &str, session: PathBuf) -> DecodeArgs {
    DecodeArgs {
        image: image.to_path_buf(),
        password: password.to_string(),
        session,
    }
}

/// 验证从嵌入到恢复的完整流程
#[test]
fn test_handle_encode_and_decode_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    create_test_image(&original_image_path, 100, 100);
    let original_text = "This is a test message for the handler!";

    // 2. 测试 handle_encode
    let output = handle_encode(encode_args(
        &original_image_path,
        original_text,
        "secret",
        dir.path(),
    ))?;
    assert!(output.exists(), "Encoded image should be created.");
    assert!(is_encoded_file_name(&output));
    assert_eq!(output.extension().and_then(|e| e.to_str()), Some("png"));

    // 3. 会话中应记住密码
    let session = Session::load(dir.path().join("session.toml"))?;
    assert_eq!(
        session.password_digest,
        Some(Session::password_token("secret"))
    );

    // 4. 测试 handle_decode
    let extracted = handle_decode(decode_args(
        &output,
        "secret",
        dir.path().join("session.toml"),
    ))?;
    assert_eq!(extracted, Extracted::Message(original_text.to_string()));

    Ok(())
}

/// 验证从文本文件读取消息时首尾空白会被去除
#[test]
fn test_encode_from_text_file_trims_message() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    let text_path = dir.path().join("message.txt");
    create_test_image(&image_path, 64, 64);
    fs::write(&text_path, "  trimmed payload\n")?;

    let mut args = encode_args(&image_path, "", "pw", dir.path());
    args.message = None;
    args.text = Some(text_path);
    let output = handle_encode(args)?;

    let extracted = handle_decode(decode_args(&output, "pw", dir.path().join("session.toml")))?;
    assert_eq!(extracted.message(), Some("trimmed payload"));

    Ok(())
}

/// 验证错误密码会被拒绝
#[test]
fn test_decode_with_wrong_password_is_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 50, 50);

    let output = handle_encode(encode_args(&image_path, "hidden", "right", dir.path()))?;

    let result = handle_decode(decode_args(&output, "wrong", dir.path().join("session.toml")));
    let err = result.expect_err("Wrong password must not decode.");
    assert_eq!(err.downcast_ref::<StegoError>(), Some(&StegoError::Auth));

    Ok(())
}

/// 没有记住的密码时，解码一律视为密码错误
#[test]
fn test_decode_without_session_is_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 20, 20);

    let result = handle_decode(decode_args(&image_path, "any", dir.path().join("none.toml")));
    let err = result.expect_err("Decoding without a remembered password must fail.");
    assert_eq!(err.downcast_ref::<StegoError>(), Some(&StegoError::Auth));

    Ok(())
}

/// 验证空间不足时的错误处理
#[test]
fn test_handle_encode_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    create_test_image(&image_path, 10, 10);

    let large_text = "a".repeat(5000);
    let result = handle_encode(encode_args(&image_path, &large_text, "pw", dir.path()));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Message too large"));
    }
    assert!(
        !dir.path().join("session.toml").exists(),
        "A failed encode must not remember the password."
    );

    Ok(())
}

/// 验证无法表示的字符会在写入前被拒绝
#[test]
fn test_handle_encode_rejects_unrepresentable_text() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 50, 50);

    let result = handle_encode(encode_args(&image_path, "这是中文", "pw", dir.path()));
    let err = result.expect_err("Characters above U+00FE must be rejected.");
    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::InvalidPayload(_))
    ));

    Ok(())
}

/// 验证非图像文件会被报告为无效图像
#[test]
fn test_handle_encode_invalid_image() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("not_an_image.png");
    fs::write(&image_path, "definitely not a png")?;

    let result = handle_encode(encode_args(&image_path, "hi", "pw", dir.path()));
    let err = result.expect_err("Garbage input must fail to load.");
    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::InvalidImage(_))
    ));

    Ok(())
}

/// 长度前缀为 0 的图像得到 "未找到消息" 的结果，而不是错误
#[test]
fn test_decode_blank_image_is_empty_result() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("blank.png");
    ImageBuffer::<Rgb<u8>, Vec<u8>>::new(16, 16).save(&image_path)?;

    let session_path = dir.path().join("session.toml");
    let mut session = Session::default();
    session.remember("pw");
    session.save(&session_path)?;

    let extracted = handle_decode(decode_args(&image_path, "pw", session_path))?;
    assert_eq!(extracted, Extracted::Empty);

    Ok(())
}

/// 验证 digest 命令输出文件原始字节的摘要
#[test]
fn test_handle_digest_matches_file_bytes() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("payload.bin");
    fs::write(&path, "abc")?;

    let digest = handle_digest(DigestArgs { image: path })?;
    assert_eq!(digest, message_digest("abc"));

    Ok(())
}

/// 会话文件损坏时应在写出任何图像之前失败
#[test]
fn test_malformed_session_leaves_no_output() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 30, 30);
    fs::write(dir.path().join("session.toml"), "password_digest = [")?;

    let result = handle_encode(encode_args(&image_path, "hi", "pw", dir.path()));
    assert!(result.is_err());

    let encoded_outputs = fs::read_dir(dir.path())?
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_encoded_file_name(&entry.path()))
        .count();
    assert_eq!(encoded_outputs, 0, "No encoded image should be written.");

    Ok(())
}

/// 输出目录不存在时报错
#[test]
fn test_missing_output_directory_is_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 30, 30);

    let mut args = encode_args(&image_path, "hi", "pw", dir.path());
    args.out_dir = Some(dir.path().join("missing"));
    let result = handle_encode(args);

    let err = result.expect_err("A missing output directory must be rejected.");
    assert!(err.to_string().contains("Output directory does not exist"));
    assert!(!dir.path().join("session.toml").exists());

    Ok(())
}

/// 空密码在解码时被拒绝，而不是当作密码错误
#[test]
fn test_decode_with_empty_password_is_invalid() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 30, 30);

    let output = handle_encode(encode_args(&image_path, "hi", "pw", dir.path()))?;
    let result = handle_decode(decode_args(&output, "", dir.path().join("session.toml")));
    let err = result.expect_err("An empty password must be rejected.");
    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::InvalidPayload(_))
    ));

    Ok(())
}
