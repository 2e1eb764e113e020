//! One-shot notices carried across a redirect in a private cookie.

use axum_extra::extract::cookie::PrivateCookieJar;
use serde::{Deserialize, Serialize};

use super::session::{CookieSettings, clear_cookie};

const FLASH_COOKIE: &str = "queuedesk_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    /// Queue this notice for the next page render.
    pub fn push(self, jar: PrivateCookieJar, settings: CookieSettings) -> PrivateCookieJar {
        match serde_json::to_string(&self) {
            Ok(value) => jar.add(settings.build(FLASH_COOKIE, value)),
            Err(_) => jar,
        }
    }

    /// Read and clear the pending notice, if any.
    pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Flash>) {
        let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
            return (jar, None);
        };
        let flash = serde_json::from_str(&raw).ok();
        (jar.remove(clear_cookie(FLASH_COOKIE)), flash)
    }
}
