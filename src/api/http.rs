use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use tracing::{debug, error, warn};

use super::{ApiRequest, RequestBody, Transport};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};

/// HTTP транспорт поверх reqwest
pub struct HttpTransport {
    http_client: Client,
    config: Config,
}

impl HttpTransport {
    pub fn new(config: Config) -> ClientResult<Self> {
        config.validate()?;

        let mut auth = HeaderValue::from_str(&config.token).map_err(|_| {
            ClientError::Config("Token contains characters not allowed in a header".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::Config(format!("Invalid header name `{name}`")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ClientError::Config(format!("Invalid value for header `{name}`")))?;
            headers.insert(header_name, header_value);
        }
        // токен всегда побеждает пользовательский Authorization
        headers.insert(AUTHORIZATION, auth);

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(HttpTransport {
            http_client,
            config,
        })
    }

    fn map_send_error(e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(e)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<String> {
        let url = self.config.endpoint(&request.path);
        debug!("{} {}", request.method, url);

        let builder = self.http_client.request(request.method.clone(), &url);
        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Form(body) => builder.form(body),
        };

        let response = builder.send().await.map_err(|e| {
            error!("Request {} {} failed: {}", request.method, url, e);
            Self::map_send_error(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body from {}: {}", url, e);
            Self::map_send_error(e)
        })?;

        debug!(
            "{} {} returned {} ({} bytes)",
            request.method,
            url,
            status,
            body.len()
        );

        if body.trim().is_empty() {
            warn!("Empty response from {} (status {})", url, status);
            return Err(ClientError::EmptyResponse);
        }

        Ok(body)
    }
}
