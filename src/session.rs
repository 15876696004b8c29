//! # 会话模块
//!
//! 解码时用来比对的 "记住的密码" 属于调用方的会话，而不是编解码器。
//! 命令行外壳把它以 TOML 格式保存在会话文件中，跨进程保留。
//! 文件中只保存密码的 SHA-256 摘要，不保存明文。

use crate::digest::message_digest;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

/// 会话文件读写错误。
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse session file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 外壳持有的会话状态。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// 最近一次成功编码时使用的密码的摘要。
    pub password_digest: Option<String>,
}

impl Session {
    /// 从文件加载会话；文件不存在时返回空会话。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let content = toml::to_string(self)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    pub fn remember(&mut self, password: &str) {
        self.password_digest = Some(Self::password_token(password));
    }

    /// 用于比对的密码令牌：空密码保持为空串，其余为 SHA-256 摘要。
    pub fn password_token(password: &str) -> String {
        if password.is_empty() {
            String::new()
        } else {
            message_digest(password)
        }
    }
}
