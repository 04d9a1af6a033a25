//! Authentication endpoints and local session helpers.
//!
//! `register` and `login` hand the issued tokens back to the caller without
//! storing them; call [`crate::Session::persist`] to sign the session in.

use todo_shared::dto::{LoginRequest, LoginResponse, RegisterRequest};

use super::{ApiClient, RequestOptions};
use crate::error::ClientError;

impl ApiClient {
    /// POST /auth/register
    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse, ClientError> {
        self.fetch("/auth/register", RequestOptions::post().json(request)?)
            .await
    }

    /// POST /auth/login
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.fetch("/auth/login", RequestOptions::post().json(credentials)?)
            .await
    }

    /// Forget the stored tokens. No server call is made.
    pub fn logout(&self) {
        tracing::info!("Logging out");
        self.session().clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }
}
