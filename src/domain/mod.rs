//! # Domain Models Module
//!
//! Ce module contient les entités métier de l'application, partagées entre
//! l'API, les services et le stockage.
//!
//! ## Structure
//! - `user.rs`: Comptes utilisateurs (inscription / connexion)
//! - `message.rs`: Messages envoyés depuis le formulaire de contact
//! - `estimate.rs`: Estimation live renvoyée par `/api/live-prediction`
//!
//! ## Conventions
//! - Les champs sensibles sont exclus de la sérialisation JSON
//! - Les timestamps utilisent `chrono::DateTime<chrono::Utc>`

pub mod user;
pub mod message;
pub mod estimate;

// Ré-export des types principaux pour une utilisation facile
pub use user::{NewUser, UserAccount};
pub use message::ContactMessage;
pub use estimate::{LiveEstimate, LIVE_STATUS};
