//! HTTP client for the Posty5 API.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    config::{ClientOptions, Config},
    errors::{normalize, Failure},
    query::Query,
    retry::RetryPolicy,
    types::Envelope,
    Error,
};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Per-call overrides: extra headers, query parameters, timeout and retry policy.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds a single query parameter.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds every pair produced by a [`Query`] implementation.
    pub fn query(mut self, query: &impl Query) -> Self {
        self.query.extend(query.query_pairs());
        self
    }

    /// Overrides the client's default timeout for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the client's retry policy for this call.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Makes exactly one attempt regardless of the failure.
    pub fn skip_retry(self) -> Self {
        self.retry(RetryPolicy::none())
    }
}

/// HTTP client for the Posty5 API.
///
/// Owns the base URL, the API key, the default timeout and the default retry
/// policy. Safe to share between tasks; the only mutable state is the API
/// key, which sits behind a lock and is read once per call.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    api_key: RwLock<Option<String>>,
    debug: bool,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Creates a client with the default timeout and retry policy.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_options(config, ClientOptions::default())
    }

    /// Creates a client with explicit transport options.
    pub fn with_options(config: Config, options: ClientOptions) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                tracing::error!("Invalid default header name {}: {}", name, e);
                normalize(Failure::Plain(Box::new(e)))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                tracing::error!("Invalid default header value for {}: {}", name, e);
                normalize(Failure::Plain(Box::new(e)))
            })?;
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                normalize(Failure::Plain(Box::new(e)))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: RwLock::new(config.api_key),
            debug: config.debug,
            retry: options.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replaces the API key. Calls already in flight keep the key they started with.
    pub fn set_api_key(&self, api_key: impl Into<String>) {
        *self.api_key.write().unwrap_or_else(|e| e.into_inner()) = Some(api_key.into());
    }

    /// Removes the API key; later calls go out unauthenticated.
    pub fn clear_api_key(&self) {
        *self.api_key.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub async fn get<T>(&self, path: &str, options: RequestOptions) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
    {
        self.request::<T, ()>(Method::GET, path, None, options).await
    }

    pub async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), options).await
    }

    pub async fn put<T, B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), options).await
    }

    pub async fn patch<T, B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body), options).await
    }

    pub async fn delete<T>(&self, path: &str, options: RequestOptions) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
    {
        self.request::<T, ()>(Method::DELETE, path, None, options).await
    }

    fn get_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}{}", &self.base_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            normalize(Failure::Plain(Box::new(e)))
        })?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Envelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path, &options.query)?;
        let body = match body {
            Some(body) => Some(
                serde_json::to_vec(body).map_err(|e| normalize(Failure::Plain(Box::new(e))))?,
            ),
            None => None,
        };
        let api_key = self
            .api_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let policy = options.retry.unwrap_or(self.retry);

        let mut attempt = 0u32;
        loop {
            let failure = match self
                .send_once(&method, &url, body.as_deref(), api_key.as_deref(), &options)
                .await
            {
                Ok(envelope) => return Ok(envelope),
                Err(failure) => failure,
            };

            if attempt < policy.max_retries && failure.is_retryable() {
                attempt += 1;
                let delay = policy.delay_for_attempt(attempt);
                tracing::warn!(
                    "{} {} failed (attempt {}/{}), retrying in {:.1}s",
                    method,
                    path,
                    attempt,
                    policy.max_retries,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let err = normalize(failure);
            if self.debug {
                tracing::debug!(
                    method = %method,
                    path,
                    status = ?err.status(),
                    code = ?err.code(),
                    "Posty5 error: {}",
                    err
                );
            }
            return Err(err);
        }
    }

    async fn send_once<T>(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        api_key: Option<&str>,
        options: &RequestOptions,
    ) -> Result<Envelope<T>, Failure>
    where
        T: DeserializeOwned,
    {
        if self.debug {
            tracing::debug!(
                method = %method,
                path = url.path(),
                query = ?url.query(),
                "Posty5 request"
            );
        }

        let mut builder = self.http.request(method.clone(), url.clone());
        if let Some(key) = api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.body(body.to_vec());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let text = resp.text().await?;

        if self.debug {
            tracing::debug!(
                status = status.as_u16(),
                body = %truncate_body(&text),
                "Posty5 response"
            );
        }

        if !status.is_success() {
            return Err(Failure::Response {
                status,
                headers,
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Envelope::empty());
        }

        serde_json::from_str::<Envelope<T>>(&text).map_err(|e| {
            tracing::error!(
                "Failed to parse response: {} | body: {}",
                e,
                truncate_body(&text)
            );
            Failure::Plain(Box::new(e))
        })
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("ok"), "ok");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.len() < body.len());
    }

    #[test]
    fn request_options_collect_query_pairs() {
        let options = RequestOptions::new()
            .param("tag", "spring")
            .query(&crate::Pagination::default().with_page(2))
            .skip_retry();
        assert_eq!(
            options.query,
            vec![
                ("tag".to_string(), "spring".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
        assert_eq!(options.retry, Some(RetryPolicy::none()));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client =
            HttpClient::new(Config::default().with_base_url("http://localhost:9000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        let url = client.get_url("/api/short-link", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/short-link");
    }

    #[test]
    fn api_key_can_be_rotated() {
        let client = HttpClient::new(Config::default()).unwrap();
        assert!(!client.has_api_key());
        client.set_api_key("k1");
        assert!(client.has_api_key());
        client.clear_api_key();
        assert!(!client.has_api_key());
    }
}
