use sqlx::{query, query_as, Pool, Postgres};

use super::StoreError;
use crate::domain::UserAccount;

/// Repository pour les opérations sur les utilisateurs
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    /// Crée une nouvelle instance du repository
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Récupère un utilisateur par son email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError> {
        let user = query_as::<_, UserAccount>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insère un nouvel utilisateur
    ///
    /// Une violation de la contrainte d'unicité sur l'email devient `StoreError::DuplicateEmail`.
    pub async fn insert(&self, account: &UserAccount) -> Result<(), StoreError> {
        let result = query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }
}
