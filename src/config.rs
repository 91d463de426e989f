use clap::Args;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_API_URL: &str = "https://api.byte.co/";
pub const DEFAULT_USER_AGENT: &str =
    "byte/0.2 (co.byte.video; build:145; iOS 13.3.0) Alamofire/4.9.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Токен авторизации, передаётся в заголовке Authorization как есть
    /// env: BYTE_TOKEN
    #[arg(long, env = "BYTE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Корень API
    /// env: BYTE_API_URL
    #[arg(long, env = "BYTE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// User-Agent, под которым ходит клиент
    /// env: BYTE_USER_AGENT
    #[arg(long, env = "BYTE_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Таймаут одного запроса в секундах
    /// env: BYTE_TIMEOUT_SECS
    #[arg(long, env = "BYTE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Дополнительный заголовок `Name: value`, можно повторять.
    /// Authorization этим не переопределяется
    /// env: BYTE_HEADERS (через запятую)
    #[arg(
        long = "header",
        env = "BYTE_HEADERS",
        value_delimiter = ',',
        value_parser = parse_header
    )]
    pub headers: Vec<(String, String)>,
}

/// Разбирает `Name: value` в пару имя/значение
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("Header must look like `Name: value`, got `{raw}`"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Header name is empty in `{raw}`"));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

impl Config {
    /// Конфигурация по умолчанию для использования как библиотеки
    pub fn new(token: impl Into<String>) -> Self {
        Config {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: Vec::new(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Валидирует конфигурацию перед созданием клиента
    pub fn validate(&self) -> ClientResult<()> {
        if self.token.trim().is_empty() {
            return Err(ClientError::Config(
                "Token is empty. Provide --token or BYTE_TOKEN".to_string(),
            ));
        }

        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://, got {}",
                self.api_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ClientError::Config("Timeout must be positive".to_string()));
        }

        Ok(())
    }

    /// Полный URL для пути относительно корня API
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
