pub mod http;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::ClientResult;

pub use http::HttpTransport;

/// Тело запроса
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Плоский JSON объект, отправляется как `application/x-www-form-urlencoded`
    Form(Value),
}

/// Один запрос к API; путь задаётся относительно корня API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn form(mut self, body: Value) -> Self {
        self.body = RequestBody::Form(body);
        self
    }
}

/// Абстрактный транспорт до API.
///
/// Возвращает тело ответа целиком; статус и заголовки декодеру не нужны.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<String>;
}
