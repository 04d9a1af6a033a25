//! Typed HTTP client for the task/auth backend.
//!
//! Every call goes through [`ApiClient::request`], which attaches the bearer
//! token, translates error statuses, and clears the session on 401/403.
//! Endpoint bindings live in `tasks` and `auth`.

mod auth;
mod tasks;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use todo_shared::ErrorBody;

use crate::error::ClientError;
use crate::ports::{Headers, HttpRequest, HttpResponse, HttpTransport, Method};
use crate::session::Session;

/// Message used when a 401/403 body carries no usable detail.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";

/// Per-call options: method, JSON body and extra headers.
///
/// Caller headers are applied last and override the client's defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<String>,
    pub headers: Headers,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    pub fn post() -> Self {
        Self::new(Method::Post)
    }

    pub fn put() -> Self {
        Self::new(Method::Put)
    }

    pub fn patch() -> Self {
        Self::new(Method::Patch)
    }

    pub fn delete() -> Self {
        Self::new(Method::Delete)
    }

    /// Serialize `body` as the JSON request payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        let encoded = serde_json::to_string(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        self.body = Some(encoded);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }
}

/// HTTP client wrapper for the backend API.
///
/// Holds the base URL, the transport and the session. Cloning is cheap and
/// clones share the same transport and storage.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn HttpTransport>, session: Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Perform one request against `base_url + path`.
    ///
    /// Returns `Ok(None)` for 204 without looking at the body, otherwise the
    /// JSON body decoded as `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, ClientError> {
        let token = self.session.access_token();

        let mut headers = Headers::new().with("Content-Type", "application/json");
        if let Some(t) = &token {
            headers.set("Authorization", format!("Bearer {t}"));
        }
        headers.merge(&options.headers);

        tracing::info!(
            method = %options.method,
            path,
            authenticated = token.is_some(),
            "API request"
        );

        let request = HttpRequest {
            method: options.method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body: options.body,
        };

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!(path, error = %e, "API request failed to complete");
            ClientError::from(e)
        })?;

        if !response.is_success() {
            return Err(self.failure(path, response));
        }

        if response.status == 204 {
            tracing::debug!(path, status = response.status, "API response without content");
            return Ok(None);
        }

        tracing::debug!(path, status = response.status, body = %response.body, "API response");

        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| {
                tracing::error!(path, error = %e, "Response body did not decode");
                ClientError::Decode(e.to_string())
            })
    }

    /// Like [`ApiClient::request`] for endpoints that always return a body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        self.request(path, options)
            .await?
            .ok_or_else(|| ClientError::Decode(format!("{path} returned no content")))
    }

    fn failure(&self, path: &str, response: HttpResponse) -> ClientError {
        let extracted = ErrorBody::parse(&response.body).and_then(|body| body.message());
        let status = response.status;

        if status == 401 || status == 403 {
            let message = extracted.unwrap_or_else(|| AUTH_FAILED_MESSAGE.to_string());
            tracing::error!(path, status, message = %message, "Session rejected by server");
            self.session.clear();
            self.session.redirect_to_sign_in();
            return ClientError::Unauthorized { status, message };
        }

        let message = extracted.unwrap_or_else(|| {
            format!("Request failed with status {} {}", status, response.status_text)
                .trim_end()
                .to_string()
        });
        tracing::error!(path, status, message = %message, "API request returned an error");
        ClientError::Http { status, message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}
