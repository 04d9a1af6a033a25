//! Session state - the stored token pair and the sign-in redirect.

use std::sync::Arc;

use todo_shared::dto::LoginResponse;

use crate::ports::{Navigator, StorageError, TokenStorage};

/// Storage key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key of the refresh token. Stored, never exchanged.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Route the navigator is sent to when the backend rejects the session.
pub const DEFAULT_SIGN_IN_ROUTE: &str = "/login";

/// Explicit session object held by the client.
///
/// A session built with [`Session::browser`] reads and writes tokens through
/// its storage. A [`Session::detached`] session has no storage at all: it is
/// always anonymous, like code running outside the browser.
#[derive(Clone)]
pub struct Session {
    storage: Option<Arc<dyn TokenStorage>>,
    navigator: Arc<dyn Navigator>,
    sign_in_route: String,
}

impl Session {
    pub fn browser(storage: Arc<dyn TokenStorage>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            storage: Some(storage),
            navigator,
            sign_in_route: DEFAULT_SIGN_IN_ROUTE.to_string(),
        }
    }

    pub fn detached(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            storage: None,
            navigator,
            sign_in_route: DEFAULT_SIGN_IN_ROUTE.to_string(),
        }
    }

    pub fn with_sign_in_route(mut self, route: impl Into<String>) -> Self {
        self.sign_in_route = route.into();
        self
    }

    pub fn sign_in_route(&self) -> &str {
        &self.sign_in_route
    }

    /// Whether tokens can be stored at all.
    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    /// Stored bearer token. An empty value counts as absent.
    pub fn access_token(&self) -> Option<String> {
        self.token(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.token(REFRESH_TOKEN_KEY)
    }

    fn token(&self, key: &str) -> Option<String> {
        self.storage
            .as_ref()?
            .get(key)
            .filter(|value| !value.trim().is_empty())
    }

    /// True iff an access token is present. Always false when detached.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Store the token pair from a login or register response.
    ///
    /// If either write fails both keys are cleared, so the session ends up
    /// anonymous rather than holding a mixed pair.
    ///
    /// A detached session has nowhere to keep tokens; this is a no-op there.
    pub fn persist(&self, tokens: &LoginResponse) -> Result<(), StorageError> {
        let Some(storage) = &self.storage else {
            tracing::warn!("No session storage available; tokens not persisted");
            return Ok(());
        };
        let stored = storage
            .set(ACCESS_TOKEN_KEY, &tokens.access_token)
            .and_then(|_| storage.set(REFRESH_TOKEN_KEY, &tokens.refresh_token));
        if let Err(e) = stored {
            // Never leave half of a new pair next to half of an old one.
            self.clear();
            return Err(e);
        }
        tracing::debug!(token_type = %tokens.token_type, "Session tokens stored");
        Ok(())
    }

    /// Remove both tokens. Failures are logged and otherwise ignored.
    pub fn clear(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = storage.remove(key) {
                tracing::error!(key, error = %e, "Failed to clear session token");
            }
        }
    }

    pub(crate) fn redirect_to_sign_in(&self) {
        tracing::info!(route = %self.sign_in_route, "Redirecting to sign-in");
        self.navigator.navigate(&self.sign_in_route);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_storage", &self.has_storage())
            .field("authenticated", &self.is_authenticated())
            .field("sign_in_route", &self.sign_in_route)
            .finish()
    }
}
