//! Application state management.

use domain_users::InMemoryUserRepository;

/// Shared application state.
///
/// Cloning is cheap; the user store is shared between clones.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Process-lifetime user record store
    pub users: InMemoryUserRepository,
}

impl AppState {
    /// State with a freshly seeded user store.
    pub fn new(config: crate::config::Config) -> Self {
        Self {
            config,
            users: InMemoryUserRepository::new(),
        }
    }
}
