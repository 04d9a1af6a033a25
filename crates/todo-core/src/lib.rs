//! # Todo Core
//!
//! The client layer of the todo application.
//! This crate holds the domain records, the port traits that infrastructure
//! implements, the session, and the typed API client. It has no network or
//! filesystem dependencies of its own.

pub mod client;
pub mod domain;
pub mod error;
pub mod ports;
pub mod session;

pub use client::{ApiClient, RequestOptions};
pub use error::ClientError;
pub use session::Session;
