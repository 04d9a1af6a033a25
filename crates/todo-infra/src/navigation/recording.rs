use std::sync::Mutex;

use todo_core::ports::Navigator;

/// Navigator that remembers every route it was sent to.
///
/// Lets headless callers check after a call whether the session was
/// rejected, and lets tests assert on redirects.
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes visited so far, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Most recent route, if any.
    pub fn last(&self) -> Option<String> {
        self.visited.lock().ok()?.last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route.to_string());
        }
    }
}

/// Navigator with nowhere to go: it only logs the redirect.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: &str) {
        tracing::warn!(route, "Sign-in required");
    }
}
