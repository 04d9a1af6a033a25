//! Navigator implementations.

mod recording;

pub use recording::{RecordingNavigator, TracingNavigator};
