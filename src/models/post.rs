use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Accounts, Mention};
use crate::decode::{Fields, FromJson};
use crate::error::DecodeResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(rename = "postID")]
    pub post_id: String,
    #[serde(rename = "authorID")]
    pub author_id: String,
    pub body: String,
    pub mentions: Vec<Mention>,
    pub date: i64,
    /// Профили комментаторов, если сервер приложил их к ответу
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Accounts>,
}

impl Comment {
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        super::timestamp(self.date)
    }
}

impl FromJson for Comment {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        let id = fields.required("id")?;
        let post_id = fields.required("postID")?;
        let author_id = fields.required("authorID")?;
        let body = fields.required("body")?;
        let date = fields.required("date")?;

        Ok(Comment {
            id,
            post_id,
            author_id,
            body,
            date,
            mentions: fields.required_list("mentions")?,
            accounts: fields.optional_map("accounts")?,
        })
    }
}

/// Пост (байт) с видео
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(rename = "type")]
    pub post_type: i64,
    #[serde(rename = "authorID")]
    pub author_id: String,
    pub caption: String,
    pub allow_curation: bool,
    pub allow_remix: bool,
    pub mentions: Vec<Mention>,
    pub date: i64,
    pub video_src: String,
    pub thumb_src: String,
    pub comment_count: i64,
    pub like_count: i64,
    pub liked_by_me: bool,
    pub loop_count: i64,
    pub rebyted_by_me: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

impl Post {
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        super::timestamp(self.date)
    }
}

impl FromJson for Post {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
        let id = fields.required("id")?;
        let post_type = fields.required("type")?;
        let author_id = fields.required("authorID")?;
        let caption = fields.required("caption")?;
        let allow_curation = fields.required("allowCuration")?;
        let allow_remix = fields.required("allowRemix")?;
        let date = fields.required("date")?;
        let video_src = fields.required("videoSrc")?;
        let thumb_src = fields.required("thumbSrc")?;
        let comment_count = fields.required("commentCount")?;
        let like_count = fields.required("likeCount")?;
        let liked_by_me = fields.required("likedByMe")?;
        let loop_count = fields.required("loopCount")?;
        let rebyted_by_me = fields.required("rebytedByMe")?;

        Ok(Post {
            id,
            post_type,
            author_id,
            caption,
            allow_curation,
            allow_remix,
            date,
            video_src,
            thumb_src,
            comment_count,
            like_count,
            liked_by_me,
            loop_count,
            rebyted_by_me,
            mentions: fields.required_list("mentions")?,
            category: fields.optional("category")?,
            comments: fields.optional_list("comments")?,
        })
    }
}
