use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Ошибки преобразования JSON в типизированные сущности.
///
/// Возвращаются только тогда, когда ответ нельзя понять структурно.
/// Отказ самого API (`success == 0` с заполненным `error`) сюда не попадает.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Malformed input: expected a JSON object or JSON text")]
    MalformedInput,

    #[error("Missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Field `{key}` has type {actual}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Failed to decode `{key}`: {source}")]
    NestedDecodeFailure {
        key: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub(crate) fn nested(key: impl Into<String>, source: DecodeError) -> Self {
        DecodeError::NestedDecodeFailure {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Самая глубокая причина в цепочке вложенных ошибок
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            DecodeError::NestedDecodeFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout waiting for server response")]
    Timeout,

    #[error("Empty response from API, check your token")]
    EmptyResponse,

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("API rejected the request: {0}")]
    Api(#[from] crate::models::Error),

    #[error("{0}")]
    Custom(String),
}

impl From<String> for ClientError {
    fn from(s: String) -> Self {
        ClientError::Custom(s)
    }
}

impl From<&str> for ClientError {
    fn from(s: &str) -> Self {
        ClientError::Custom(s.to_string())
    }
}
