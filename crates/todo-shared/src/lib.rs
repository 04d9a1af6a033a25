//! # Todo Shared
//!
//! Request and response payloads exchanged with the task/auth backend.
//! These types mirror the JSON wire contract and carry no behaviour.

pub mod dto;
pub mod response;

pub use response::ErrorBody;
