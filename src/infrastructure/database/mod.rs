pub mod memory;
pub mod messages;
pub mod users;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error as SqlxError, PgPool};
use std::time::Duration;
use tracing::info;

use crate::domain::{ContactMessage, UserAccount};

pub use memory::MemoryAccountStore;
pub use messages::MessageRepository;
pub use users::UserRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Email déjà utilisé")]
    DuplicateEmail,
    #[error("Erreur de base de données: {0}")]
    Database(#[from] SqlxError),
}

/// Opérations de stockage des comptes et des messages
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Nom du backend, pour les logs et `/health`
    fn backend_name(&self) -> &'static str;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError>;

    /// Insère un compte; `StoreError::DuplicateEmail` si l'email est déjà pris
    async fn insert_user(&self, account: &UserAccount) -> Result<(), StoreError>;

    async fn insert_message(&self, message: &ContactMessage) -> Result<(), StoreError>;
}

/// Gestion de la connexion à la base de données PostgreSQL
#[derive(Debug, Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    /// Crée le pool sans ouvrir de connexion: une base injoignable n'empêche pas le démarrage
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, SqlxError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Vérifie que la base répond
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Vérifie la connexion et crée les tables si besoin
    pub async fn initialize(&self) -> Result<(), StoreError> {
        info!("🔌 Connexion à la base de données PostgreSQL...");
        self.ping().await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("✅ Connexion établie, schéma prêt");
        Ok(())
    }
}

/// Schéma minimal; la contrainte UNIQUE ferme la course entre vérification et insertion
const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        CONSTRAINT users_email_key UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        message TEXT NOT NULL,
        submitted_at TIMESTAMPTZ NOT NULL
    )
    "#,
];

#[async_trait]
impl AccountStore for Database {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError> {
        UserRepository::new(self.pool.clone()).find_by_email(email).await
    }

    async fn insert_user(&self, account: &UserAccount) -> Result<(), StoreError> {
        UserRepository::new(self.pool.clone()).insert(account).await
    }

    async fn insert_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
        MessageRepository::new(self.pool.clone()).insert(message).await
    }
}
