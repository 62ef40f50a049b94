// core/account_service.rs
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{ContactMessage, NewUser, UserAccount};
use crate::infrastructure::database::AccountStore;
use crate::utils::error::{AppError, Result};
use crate::utils::security::{hash_password, verify_password};

/// Inscription, connexion et messages de contact
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Inscription d'un nouvel utilisateur
    ///
    /// La vérification préalable donne le message d'erreur habituel; la contrainte
    /// d'unicité du stockage couvre deux inscriptions simultanées.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<UserAccount> {
        if self.store.find_user_by_email(email).await?.is_some() {
            debug!(email, "Inscription refusée: email existant");
            return Err(AppError::DuplicateEmail);
        }

        // Argon2 est coûteux: hors du thread de la requête
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let account = UserAccount::from_new(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        });
        self.store.insert_user(&account).await?;

        info!(user_id = %account.id, "👤 Nouveau compte créé");
        Ok(account)
    }

    /// Authentification email/mot de passe
    ///
    /// Email inconnu et mauvais mot de passe donnent la même erreur.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount> {
        let Some(account) = self.store.find_user_by_email(email).await? else {
            return Err(AppError::InvalidCredentials);
        };

        let password = password.to_string();
        let hash = account.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        info!(user_id = %account.id, "🔑 Connexion réussie");
        Ok(account)
    }

    /// Enregistre un message de contact, sans validation du contenu
    pub async fn contact(&self, name: &str, email: &str, message: &str) -> Result<ContactMessage> {
        let message = ContactMessage::new(name.to_string(), email.to_string(), message.to_string());
        self.store.insert_message(&message).await?;

        info!(message_id = %message.id, "✉️  Message de contact enregistré");
        Ok(message)
    }
}
