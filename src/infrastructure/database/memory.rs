use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{AccountStore, StoreError};
use crate::domain::{ContactMessage, UserAccount};

/// Stockage en mémoire, pour les tests et le mode démo sans base
///
/// La vérification d'unicité et l'insertion se font sous le même verrou.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    users: RwLock<HashMap<String, UserAccount>>,
    messages: RwLock<Vec<ContactMessage>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<ContactMessage> {
        self.messages.read().await.clone()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert_user(&self, account: &UserAccount) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&account.email) {
            return Err(StoreError::DuplicateEmail);
        }
        users.insert(account.email.clone(), account.clone());
        Ok(())
    }

    async fn insert_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }
}
