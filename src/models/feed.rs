use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Accounts, Post};
use crate::decode::{Fields, FromJson, JsonInput};
use crate::error::DecodeResult;
use crate::response::Response;

/// Страница ленты
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feed {
    pub posts: Vec<Post>,
    /// Токен следующей страницы
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Accounts>,
}

impl Feed {
    /// Декодирует весь конверт ответа, у которого `data` имеет форму ленты
    pub fn from_envelope<'a>(input: impl Into<JsonInput<'a>>) -> DecodeResult<Response<Feed>> {
        Response::decode(input)
    }

    pub fn has_more(&self) -> bool {
        self.cursor.as_deref().is_some_and(|cursor| !cursor.is_empty())
    }
}

impl FromJson for Feed {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        Ok(Feed {
            posts: fields.required_list("posts")?,
            cursor: fields.optional("cursor")?,
            accounts: fields.optional_map("accounts")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rebyte {
    pub id: String,
    #[serde(rename = "authorID")]
    pub author_id: String,
    pub date: i64,
    pub post: Post,
    pub accounts: Accounts,
}

impl Rebyte {
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        super::timestamp(self.date)
    }
}

impl FromJson for Rebyte {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        let id = fields.required("id")?;
        let author_id = fields.required("authorID")?;
        let date = fields.required("date")?;

        Ok(Rebyte {
            id,
            author_id,
            date,
            post: fields.required_entity("post")?,
            accounts: fields.required_map("accounts")?,
        })
    }
}
