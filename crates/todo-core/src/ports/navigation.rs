/// Navigation side effect, triggered when the backend rejects the session.
pub trait Navigator: Send + Sync {
    /// Send the user to `route` (e.g. `/login`).
    fn navigate(&self, route: &str);
}
