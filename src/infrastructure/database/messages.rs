use sqlx::{query, Pool, Postgres};

use super::StoreError;
use crate::domain::ContactMessage;

/// Repository des messages du formulaire de contact
#[derive(Clone)]
pub struct MessageRepository {
    pool: Pool<Postgres>,
}

impl MessageRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, message: &ContactMessage) -> Result<(), StoreError> {
        query(
            r#"
            INSERT INTO messages (id, name, email, message, submitted_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(message.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
