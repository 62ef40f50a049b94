// utils/security.rs
use crate::utils::error::{AppError, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

/// Nom du cookie de session posé à la connexion
pub const SESSION_COOKIE: &str = "session";

/// Claims JWT de la session utilisateur
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,      // Nom de l'utilisateur
    pub email: String,    // Email de l'utilisateur
    pub exp: usize,       // Expiration timestamp
    pub iat: usize,       // Issued at timestamp
}

/// Clés de signature des sessions, construites une seule fois au démarrage
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: i64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("expiry_hours", &self.expiry_hours)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Générer un token de session JWT
    pub fn issue(&self, name: &str, email: &str) -> Result<String> {
        let now = chrono::Utc::now();
        let expires_at = now + chrono::Duration::hours(self.expiry_hours);

        let claims = SessionClaims {
            sub: name.to_string(),
            email: email.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Session(e.to_string()))
    }

    /// Vérifier un token de session
    pub fn verify(&self, token: &str) -> Result<TokenData<SessionClaims>> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map_err(|e| AppError::Session(e.to_string()))
    }
}

/// Générer un hash de mot de passe avec Argon2
pub fn hash_password(password: &str) -> Result<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
        Argon2,
    };

    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Erreur de hashage: {}", e)))
}

/// Vérifier un mot de passe contre un hash
///
/// Un hash illisible est traité comme un échec de vérification.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{
        password_hash::{PasswordHash, PasswordVerifier},
        Argon2,
    };

    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Hash de mot de passe illisible: {}", e);
            false
        }
    }
}
