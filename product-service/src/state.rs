//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::repository::ProductRepository;

/// Application state shared across handlers
///
/// Carries the loaded configuration and the persistence port. The repository
/// is injected once at process start and passed by reference to every
/// handler; there is no process-wide global.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    repository: Arc<dyn ProductRepository>,
}

impl AppState {
    /// Create application state from a configuration and a bound repository.
    pub fn new(config: Config, repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            config: Arc::new(config),
            repository,
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The persistence port bound at startup.
    #[must_use]
    pub fn repository(&self) -> &dyn ProductRepository {
        self.repository.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryProductRepository;

    #[tokio::test]
    async fn test_state_exposes_injected_repository() {
        let state = AppState::new(Config::default(), Arc::new(MemoryProductRepository::new()));

        assert_eq!(state.config().service.name, "product-service");
        assert_eq!(state.repository().count_all().await.unwrap(), 0);
    }

    #[test]
    fn test_state_is_cheap_to_clone() {
        let state = AppState::new(Config::default(), Arc::new(MemoryProductRepository::new()));
        let cloned = state.clone();
        assert_eq!(
            cloned.config().service.port,
            state.config().service.port
        );
    }
}
