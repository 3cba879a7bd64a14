//! One-shot flash messages carried across a redirect in a cookie.
//!
//! Cookie value format: `<level>:<percent-encoded message>`.

use axum::http::{header, HeaderMap};
use serde::Serialize;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl FlashLevel {
    fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }
}

impl std::str::FromStr for FlashLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "success" => Ok(FlashLevel::Success),
            "info" => Ok(FlashLevel::Info),
            "danger" => Ok(FlashLevel::Danger),
            _ => Err(anyhow::anyhow!("Invalid flash level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }

    /// `Set-Cookie` value that stores this message for the next request
    pub fn to_cookie(&self) -> String {
        format!(
            "{}={}:{}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.level.as_str(),
            urlencoding::encode(&self.message)
        )
    }

    /// `Set-Cookie` value that removes a consumed message
    pub fn clear_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", FLASH_COOKIE)
    }

    /// Read the pending message from request cookies, ignoring malformed values
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .and_then(|(_, value)| Self::decode(value))
    }

    fn decode(value: &str) -> Option<Self> {
        let (level, message) = value.split_once(':')?;
        let level = level.parse().ok()?;
        let message = urlencoding::decode(message).ok()?.into_owned();
        Some(Self { level, message })
    }
}
