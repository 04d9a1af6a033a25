//! Ports - trait definitions for the client's external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod navigation;
mod storage;
mod transport;

pub use navigation::Navigator;
pub use storage::{StorageError, TokenStorage};
pub use transport::{Headers, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
