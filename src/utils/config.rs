// utils/config.rs
use crate::utils::error::{AppError, Result};
use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Backend utilisé pour les comptes et les messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStoreKind {
    Postgres,
    Memory,
}

impl FromStr for AccountStoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(AccountStoreKind::Postgres),
            "memory" => Ok(AccountStoreKind::Memory),
            other => Err(AppError::Validation(format!(
                "ACCOUNT_STORE doit valoir 'postgres' ou 'memory' (reçu: {})",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Environnement et serveur
    pub run_mode: String,
    pub server_host: String,
    pub server_port: u16,
    pub workers: usize,
    pub log_level: String,
    pub logging_format: String,

    // Base de données
    pub account_store: AccountStoreKind,
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_connection_timeout: u64,

    // Sessions
    pub session_secret: String,
    pub session_expiry_hours: i64,

    // Répertoires
    pub models_dir: PathBuf,
    pub datasets_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

/// Secret de développement utilisé quand SESSION_SECRET est absent
pub const DEV_SESSION_SECRET: &str = "dev-only-session-secret-change-me";

impl Config {
    /// Charger la configuration depuis les variables d'environnement
    pub fn from_env() -> Result<Self> {
        // Charger le fichier .env si présent
        let _ = dotenv().ok();

        let config = Config {
            // Environnement et serveur
            run_mode: env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: parse_var("SERVER_PORT", "5000")?,
            workers: parse_var("WORKERS", "4")?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            logging_format: env::var("LOGGING_FORMAT").unwrap_or_else(|_| "json".to_string()),

            // Base de données
            account_store: parse_var("ACCOUNT_STORE", "postgres")?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/wavespsai".to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", "10")?,
            database_connection_timeout: parse_var("DATABASE_CONNECTION_TIMEOUT", "5")?,

            // Sessions
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| DEV_SESSION_SECRET.to_string()),
            session_expiry_hours: parse_var("SESSION_EXPIRY_HOURS", "24")?,

            // Répertoires
            models_dir: env::var("MODELS_DIR").unwrap_or_else(|_| ".".to_string()).into(),
            datasets_dir: env::var("DATASETS_DIR")
                .unwrap_or_else(|_| "datasets".to_string())
                .into(),
            templates_dir: env::var("TEMPLATES_DIR")
                .unwrap_or_else(|_| "templates".to_string())
                .into(),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()).into(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Valide les paramètres critiques
    pub fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(AppError::Validation("SERVER_PORT ne peut pas valoir 0".to_string()));
        }

        if self.workers == 0 {
            return Err(AppError::Validation("WORKERS doit être supérieur à 0".to_string()));
        }

        if self.session_expiry_hours <= 0 {
            return Err(AppError::Validation(
                "SESSION_EXPIRY_HOURS doit être positif".to_string(),
            ));
        }

        Ok(())
    }

    /// Signale les réglages acceptés mais risqués; à appeler une fois le tracing initialisé
    pub fn log_warnings(&self) {
        if self.session_secret == DEV_SESSION_SECRET {
            tracing::warn!("⚠️  SESSION_SECRET absent - secret de développement utilisé");
        } else if self.session_secret.len() < 32 {
            tracing::warn!("⚠️  SESSION_SECRET trop court (< 32 caractères) - risque de sécurité");
        }
    }

    pub fn is_production(&self) -> bool {
        self.run_mode == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_mode: "development".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            workers: 4,
            log_level: "info".to_string(),
            logging_format: "json".to_string(),
            account_store: AccountStoreKind::Postgres,
            database_url: "postgres://localhost:5432/wavespsai".to_string(),
            database_max_connections: 10,
            database_connection_timeout: 5,
            session_secret: DEV_SESSION_SECRET.to_string(),
            session_expiry_hours: 24,
            models_dir: PathBuf::from("."),
            datasets_dir: PathBuf::from("datasets"),
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: &str) -> Result<T> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::Validation(format!("{} a une valeur invalide", name)))
}
