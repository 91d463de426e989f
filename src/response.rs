//! Конверт `{success, data?, error?}`, в который завёрнут любой ответ API.

use serde::Serialize;
use serde_json::Value;

use crate::decode::{Fields, FromJson, JsonInput};
use crate::error::{ClientError, ClientResult, DecodeError, DecodeResult};
use crate::models::Error;

/// Ответ API.
///
/// `success` хранится как есть (сервер присылает число, а не bool).
/// Ответ с `success == 0` и заполненным `error` декодируется успешно:
/// это отказ операции, а не ошибка разбора.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<T = Value> {
    pub success: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
}

impl<T> Response<T> {
    /// Декодирует конверт, передавая `data` в декодер, выбранный вызывающим
    pub fn decode_with<'a, F>(input: impl Into<JsonInput<'a>>, decode_data: F) -> DecodeResult<Self>
    where
        F: FnOnce(&Value) -> DecodeResult<T>,
    {
        let object = input.into().into_object()?;
        let fields = Fields::new(&object);

        let success = fields.required("success")?;
        let error = fields.optional_entity("error")?;
        let data = fields
            .optional_value("data")
            .map(decode_data)
            .transpose()
            .map_err(|e| DecodeError::nested("data", e))?;

        Ok(Response {
            success,
            data,
            error,
        })
    }

    pub fn is_success(&self) -> bool {
        self.success != 0
    }

    pub fn map_data<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }

    /// Превращает отказ API в [`ClientError::Api`]
    pub fn into_result(self) -> ClientResult<Option<T>> {
        if self.is_success() {
            return Ok(self.data);
        }

        match self.error {
            Some(error) => Err(ClientError::Api(error)),
            None => Err(ClientError::Custom(format!(
                "Request failed (success = {}) without an error payload",
                self.success
            ))),
        }
    }
}

/// Конверт без типизации `data`
pub type RawResponse = Response<Value>;

impl Response<Value> {
    pub fn from_json<'a>(input: impl Into<JsonInput<'a>>) -> DecodeResult<Self> {
        Self::decode_with(input, |data| Ok(data.clone()))
    }
}

impl<T: FromJson> Response<T> {
    pub fn decode<'a>(input: impl Into<JsonInput<'a>>) -> DecodeResult<Self> {
        Self::decode_with(input, |data| T::from_json(data))
    }
}
