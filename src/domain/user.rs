use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Représente un compte utilisateur enregistré
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserAccount {
    /// Identifiant unique du compte
    pub id: Uuid,
    /// Nom affiché, utilisé pour identifier la session
    pub name: String,
    /// Email de l'utilisateur (clé unique)
    pub email: String,
    /// Hash Argon2 du mot de passe (jamais exposé dans les APIs)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Date de création du compte
    pub created_at: DateTime<Utc>,
}

/// Données d'un compte prêt à être inséré (mot de passe déjà hashé)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserAccount {
    /// Construit le compte à partir des données d'inscription
    pub fn from_new(new_user: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let account = UserAccount::from_new(NewUser {
            name: "Ravi".to_string(),
            email: "ravi@test.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
        });

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ravi@test.com");
    }
}
