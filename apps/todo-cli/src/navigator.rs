use todo_core::ports::Navigator;

/// Terminal stand-in for a browser redirect: tell the user to sign in again.
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn navigate(&self, route: &str) {
        tracing::debug!(route, "Redirect requested");
        eprintln!("Your session is no longer valid. Run `todo login` to sign in again.");
    }
}
