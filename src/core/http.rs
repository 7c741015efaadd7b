use crate::config::toml_config::{ClientConfig, DEFAULT_API_PREFIX, DEFAULT_TIMEOUT_MS};
use crate::domain::model::HealthStatus;
use crate::domain::ports::ConfigProvider;
use crate::domain::session::Session;
use crate::utils::error::{ApiError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Decoded 2xx response.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub data: T,
}

/// Per-request extras: query string, JSON body, headers and bearer token.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: Vec<(String, String)>,
    bearer: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn query_pairs<K: Into<String>>(mut self, pairs: impl IntoIterator<Item = (K, String)>) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(key, value)| (key.into(), value)));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn session(self, session: &Session) -> Self {
        self.bearer(session.access_token())
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }
}

/// Percent-encodes a free-form value for use as a single path segment, so
/// `/`, `?` and `#` cannot escape it.
pub fn path_segment(value: &str) -> Result<String> {
    let mut scratch = Url::parse("http://localhost/")?;
    scratch
        .path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase))?
        .pop_if_empty()
        .push(value);
    Ok(scratch.path().trim_start_matches('/').to_string())
}

/// The one HTTP client every resource module goes through. Base URL, API
/// prefix, timeout and default headers are fixed at construction.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    prefix: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(
            base_url,
            DEFAULT_API_PREFIX,
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
            &HashMap::new(),
        )
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_options(
            config.base_url(),
            config.api_prefix(),
            Duration::from_millis(config.timeout_ms()),
            config.api.headers.as_ref().unwrap_or(&HashMap::new()),
        )
    }

    pub fn with_options(
        base_url: &str,
        prefix: &str,
        timeout: Duration,
        headers: &HashMap<String, String>,
    ) -> Result<Self> {
        Url::parse(base_url)?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ApiError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ApiError::InvalidConfigValueError {
                    field: format!("api.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            default_headers.insert(header_name, header_value);
        }

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: prefix.to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for a path under the API prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.prefix, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.request(Method::POST, path, options).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.request(Method::PUT, path, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.request(Method::DELETE, path, options).await
    }

    /// Backend liveness check. Lives outside the API prefix.
    pub async fn health_check(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        let response = self.send(Method::GET, url, RequestOptions::new()).await?;
        Ok(response.data)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.send(method, self.url(path), options).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        tracing::debug!(%method, %url, "📡 request");

        let mut request = self.http.request(method.clone(), &url);

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }

        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(token) = &options.bearer {
            request = request.bearer_auth(token);
        }

        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(
            %method,
            %url,
            status = status.as_u16(),
            bytes = bytes.len(),
            "📡 response"
        );

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&bytes).ok();
            return Err(ApiError::Status { status, body });
        }

        // 204 and other empty bodies decode as JSON null, i.e. `()` or `None`.
        let data = if bytes.is_empty() {
            serde_json::from_value(Value::Null)?
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(ApiResponse { status, data })
    }
}
