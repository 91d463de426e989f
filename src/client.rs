//! Методы конечных точек API.
//!
//! Каждый метод строит один запрос, отдаёт его транспорту и декодирует
//! конверт ответа. Отказ API (`success == 0`) возвращается как обычный
//! [`Response`], ошибкой становится только сбой сети или разбора.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::api::{ApiRequest, HttpTransport, Transport};
use crate::config::Config;
use crate::decode::FromJson;
use crate::error::{ClientError, ClientResult};
use crate::models::{Account, Colors, Comment, LoopCounter, Rebyte};
use crate::response::{RawResponse, Response};

/// Изменения профиля для `PUT account/me`; отправляются только заданные поля
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub color_scheme: Option<i64>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.display_name.is_none()
            && self.username.is_none()
            && self.color_scheme.is_none()
    }

    fn to_form(&self) -> Value {
        let mut body = json!({});

        if let Some(bio) = &self.bio {
            body["bio"] = Value::String(bio.clone());
        }
        if let Some(display_name) = &self.display_name {
            body["displayName"] = Value::String(display_name.clone());
        }
        if let Some(username) = &self.username {
            body["username"] = Value::String(username.clone());
        }
        if let Some(color_scheme) = self.color_scheme {
            body["colorScheme"] = Value::from(color_scheme);
        }

        body
    }
}

pub struct ByteClient<T = HttpTransport> {
    transport: T,
}

impl ByteClient<HttpTransport> {
    /// Клиент с настройками по умолчанию
    pub fn new(token: impl Into<String>) -> ClientResult<Self> {
        Self::from_config(Config::new(token))
    }

    pub fn from_config(config: Config) -> ClientResult<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ByteClient<T> {
    pub fn with_transport(transport: T) -> Self {
        ByteClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch(&self, request: ApiRequest) -> ClientResult<(String, String)> {
        let label = format!("{} {}", request.method, request.path);
        let body = self.transport.send(request).await?;
        Ok((label, body))
    }

    async fn call_raw(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        let (label, body) = self.fetch(request).await?;
        let response = RawResponse::from_json(&body).map_err(|e| {
            warn!("Cannot decode response to {}: {}", label, e);
            ClientError::Decode(e)
        })?;
        log_outcome(&label, &response);
        Ok(response)
    }

    async fn call<D: FromJson>(&self, request: ApiRequest) -> ClientResult<Response<D>> {
        let (label, body) = self.fetch(request).await?;
        let response = Response::<D>::decode(&body).map_err(|e| {
            warn!("Cannot decode response to {}: {}", label, e);
            ClientError::Decode(e)
        })?;
        log_outcome(&label, &response);
        Ok(response)
    }

    /// Подписывается на пользователя
    pub async fn follow(&self, id: &str) -> ClientResult<RawResponse> {
        self.call_raw(ApiRequest::put(format!("account/id/{id}/follow")))
            .await
    }

    /// Отписывается от пользователя
    pub async fn unfollow(&self, id: &str) -> ClientResult<RawResponse> {
        self.call_raw(ApiRequest::delete(format!("account/id/{id}/follow")))
            .await
    }

    /// Получает профиль пользователя
    pub async fn get_user(&self, id: &str) -> ClientResult<Response<Account>> {
        self.call(ApiRequest::get(format!("account/id/{id}"))).await
    }

    pub async fn like(&self, id: &str) -> ClientResult<RawResponse> {
        self.call_raw(ApiRequest::put(format!("post/id/{id}/feedback/like")))
            .await
    }

    /// Снимает лайк с поста
    pub async fn dislike(&self, id: &str) -> ClientResult<RawResponse> {
        self.call_raw(ApiRequest::delete(format!("post/id/{id}/feedback/like")))
            .await
    }

    pub async fn comment(&self, id: &str, text: &str) -> ClientResult<Response<Comment>> {
        debug!("Commenting post {} ({} chars)", id, text.chars().count());
        let request = ApiRequest::post(format!("post/id/{id}/feedback/comment")).json(json!({
            "postID": id,
            "body": text,
        }));
        self.call(request).await
    }

    /// Удаляет комментарий; `id` имеет вид `{post id}-{comment id}`
    pub async fn delete_comment(&self, id: &str) -> ClientResult<RawResponse> {
        let request =
            ApiRequest::post(format!("feedback/comment/id/{id}")).json(json!({ "commentID": id }));
        self.call_raw(request).await
    }

    /// Увеличивает счётчик просмотров поста
    pub async fn loop_post(&self, id: &str) -> ClientResult<Response<LoopCounter>> {
        self.call(ApiRequest::post(format!("post/id/{id}/loop"))).await
    }

    pub async fn rebyte(&self, id: &str) -> ClientResult<Response<Rebyte>> {
        self.call(ApiRequest::post("rebyte").json(json!({ "postID": id })))
            .await
    }

    /// Получает доступные цветовые схемы
    pub async fn get_colors(&self) -> ClientResult<Response<Colors>> {
        self.call(ApiRequest::get("account/me/colors")).await
    }

    /// Обновляет профиль текущего пользователя
    pub async fn set_info(&self, update: &ProfileUpdate) -> ClientResult<RawResponse> {
        if update.is_empty() {
            return Err(ClientError::Config(
                "Profile update has no fields to set".to_string(),
            ));
        }

        self.call_raw(ApiRequest::put("account/me").form(update.to_form()))
            .await
    }

    pub async fn set_username(&self, username: &str) -> ClientResult<RawResponse> {
        self.set_info(&ProfileUpdate {
            username: Some(username.to_string()),
            ..ProfileUpdate::default()
        })
        .await
    }

    pub async fn set_bio(&self, bio: &str) -> ClientResult<RawResponse> {
        self.set_info(&ProfileUpdate {
            bio: Some(bio.to_string()),
            ..ProfileUpdate::default()
        })
        .await
    }

    pub async fn set_display_name(&self, display_name: &str) -> ClientResult<RawResponse> {
        self.set_info(&ProfileUpdate {
            display_name: Some(display_name.to_string()),
            ..ProfileUpdate::default()
        })
        .await
    }

    pub async fn set_color_scheme(&self, color_scheme: i64) -> ClientResult<RawResponse> {
        self.set_info(&ProfileUpdate {
            color_scheme: Some(color_scheme),
            ..ProfileUpdate::default()
        })
        .await
    }
}

fn log_outcome<D>(label: &str, response: &Response<D>) {
    if response.is_success() {
        info!("{} succeeded", label);
    } else if let Some(error) = &response.error {
        warn!("{} rejected by API: {}", label, error);
    } else {
        warn!("{} failed without an error payload", label);
    }
}
