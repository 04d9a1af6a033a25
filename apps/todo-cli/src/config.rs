//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use todo_core::session::DEFAULT_SIGN_IN_ROUTE;
use todo_infra::TransportConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub sign_in_route: String,
    pub transport: TransportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_base_url: var("API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            session_file: var("TODO_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(Self::default_session_file),
            sign_in_route: var("TODO_SIGN_IN_ROUTE")
                .unwrap_or_else(|| DEFAULT_SIGN_IN_ROUTE.to_string()),
            transport: TransportConfig::from_lookup(&lookup),
        }
    }

    /// `<config dir>/todo-client/session.json`, or the working directory
    /// when the platform has no config dir.
    fn default_session_file() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("todo-client").join("session.json"))
            .unwrap_or_else(|| PathBuf::from(".todo-session.json"))
    }
}
