pub mod auth;
pub mod entities;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::config;
use crate::error::{AdminError, Result};
use crate::session::SessionContext;

/// Paths that never carry the bearer token
const PUBLIC_PATHS: &[&str] = &["/login", "/register"];

/// JSON client for the admin backend.
///
/// Every request except login/registration carries `Authorization: Bearer <token>` taken from
/// the injected session at send time, so sign-in and sign-out take effect immediately.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, session: SessionContext) -> Result<Self> {
        // Reject malformed base URLs up front rather than on the first request
        Url::parse(base_url)?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            log_requests: false,
        })
    }

    /// Client for the configured backend
    pub fn from_config(session: SessionContext) -> Result<Self> {
        let api = &config().api;
        let mut client = Self::new(&api.base_url, Duration::from_secs(api.timeout_secs), session)?;
        client.log_requests = api.enable_request_logging;
        Ok(client)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    pub fn is_public_path(path: &str) -> bool {
        PUBLIC_PATHS.iter().any(|p| path.contains(p))
    }

    /// Send one request and decode the JSON reply; an empty body decodes as `null`
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = self.url(path)?;
        let mut request = self.http.request(method.clone(), url);

        if !Self::is_public_path(path) {
            if let Some(token) = self.session.token() {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        if self.log_requests {
            tracing::debug!("{} {}", method, path);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &text);
            tracing::warn!("{} {} failed with {}: {}", method, path, status.as_u16(), message);
            return Err(AdminError::api(status.as_u16(), message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send::<Value>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn post_empty(&self, path: &str) -> Result<Value> {
        self.send::<Value>(Method::POST, path, None).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send::<Value>(Method::DELETE, path, None).await
    }
}

/// Message for a failed response: the JSON `detail` field when present, else the raw body
fn error_message(status: StatusCode, text: &str) -> String {
    if let Ok(body) = serde_json::from_str::<Value>(text) {
        if let Some(detail) = body.get("detail").and_then(Value::as_str) {
            return detail.to_string();
        }
    }
    if text.trim().is_empty() {
        return status.canonical_reason().unwrap_or("Request failed").to_string();
    }
    text.to_string()
}
