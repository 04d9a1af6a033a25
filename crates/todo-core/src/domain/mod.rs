//! Domain records - the objects returned by the backend.

mod task;

pub use task::{Task, TaskStatistics};
