//! Типизированные сущности API.
//!
//! Каждая сущность декодируется через [`FromJson`] и сериализуется обратно
//! в сетевой формат (camelCase, отсутствующие необязательные поля пропускаются).

mod account;
mod feed;
mod post;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::decode::{Fields, FromJson};
use crate::error::DecodeResult;

pub use account::Account;
pub use feed::{Feed, Rebyte};
pub use post::{Comment, Post};

/// Профили, приложенные к ответу, по идентификатору аккаунта
pub type Accounts = BTreeMap<String, Account>;

pub(crate) fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Ошибка, которую вернул сам API внутри конверта ответа
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("API error {code}: {message}")]
pub struct Error {
    pub code: i64,
    pub message: String,
}

impl FromJson for Error {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        Ok(Error {
            code: fields.required("code")?,
            message: fields.required("message")?,
        })
    }
}

/// Полуоткрытый диапазон `[start, stop)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: i64,
    pub stop: i64,
}

impl Range {
    pub fn len(&self) -> i64 {
        self.stop.saturating_sub(self.start).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromJson for Range {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        Ok(Range {
            start: fields.required("start")?,
            stop: fields.required("stop")?,
        })
    }
}

/// Упоминание аккаунта в тексте.
///
/// `range` считается в символах, `byte_range` в байтах UTF-8 того же текста.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    #[serde(rename = "accountID")]
    pub account_id: String,
    pub username: String,
    pub text: String,
    pub range: Range,
    pub byte_range: Range,
}

impl FromJson for Mention {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        let account_id = fields.required("accountID")?;
        let username = fields.required("username")?;
        let text = fields.required("text")?;

        Ok(Mention {
            account_id,
            username,
            text,
            range: fields.required_entity("range")?,
            byte_range: fields.required_entity("byteRange")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    pub background: String,
    pub foreground: String,
    pub id: i64,
}

impl FromJson for Color {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        Ok(Color {
            background: fields.required("background")?,
            foreground: fields.required("foreground")?,
            id: fields.required("id")?,
        })
    }
}

/// Доступные цветовые схемы профиля
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Colors {
    pub colors: Vec<Color>,
}

impl Colors {
    pub fn find(&self, id: i64) -> Option<&Color> {
        self.colors.iter().find(|color| color.id == id)
    }
}

impl FromJson for Colors {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        Ok(Colors {
            colors: fields.required_list("colors")?,
        })
    }
}

/// Счётчик просмотров поста после `loop`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopCounter {
    #[serde(rename = "postID")]
    pub id: String,
    pub loop_count: i64,
}

impl FromJson for LoopCounter {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        Ok(LoopCounter {
            id: fields.required("postID")?,
            loop_count: fields.required("loopCount")?,
        })
    }
}
