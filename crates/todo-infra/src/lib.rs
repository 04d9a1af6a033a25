//! # Todo Infrastructure
//!
//! Concrete implementations of the ports defined in `todo-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No network stack, in-memory and file storage only
//! - `http` - `reqwest`-backed HTTP transport

pub mod navigation;
pub mod storage;

#[cfg(feature = "http")]
pub mod http;

// Re-exports
pub use navigation::{RecordingNavigator, TracingNavigator};
pub use storage::{FileTokenStorage, InMemoryTokenStorage};

#[cfg(feature = "http")]
pub use http::{ReqwestTransport, TransportConfig};
