// core/mod.rs
pub mod account_service;
pub mod live_estimate;

// Ré-exports pour faciliter l'import
pub use account_service::AccountService;
pub use live_estimate::{compute_live_estimate, MockWeather};
