// state.rs
use std::sync::Arc;

use crate::core::AccountService;
use crate::infrastructure::database::AccountStore;
use crate::infrastructure::ml::ModelStore;
use crate::utils::{Config, SessionKeys};

/// Contexte applicatif construit une seule fois au démarrage et injecté dans chaque route
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub accounts: AccountService,
    pub store_backend: &'static str,
    pub models: Arc<ModelStore>,
    pub sessions: SessionKeys,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn AccountStore>, models: ModelStore) -> Self {
        let sessions = SessionKeys::new(&config.session_secret, config.session_expiry_hours);

        Self {
            store_backend: store.backend_name(),
            accounts: AccountService::new(store),
            models: Arc::new(models),
            sessions,
            config: Arc::new(config),
        }
    }

    /// État de test: stockage en mémoire, aucun modèle chargé
    #[cfg(test)]
    pub fn new_test(config: Config) -> (Self, Arc<crate::infrastructure::MemoryAccountStore>) {
        let store = Arc::new(crate::infrastructure::MemoryAccountStore::new());
        (Self::new(config, store.clone(), ModelStore::unavailable()), store)
    }
}
