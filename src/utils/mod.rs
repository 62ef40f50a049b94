// utils/mod.rs
pub mod error;
pub mod config;
pub mod security;
pub mod helpers;
pub mod logging;

// Ré-exports pour faciliter l'import
pub use error::{AppError, Result};
pub use config::{AccountStoreKind, Config};
pub use security::{hash_password, verify_password, SessionClaims, SessionKeys, SESSION_COOKIE};
pub use helpers::{ensure_directory_exists, resolve_in_directory, round_to};
pub use logging::init_tracing;
