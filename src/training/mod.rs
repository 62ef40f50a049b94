//! Génération des jeux de données synthétiques et entraînement hors ligne
//! des trois modèles servis par `/api/live-prediction`.

pub mod pipeline;
pub mod synthetic;

pub use pipeline::{run, TrainingError, TrainingOptions, TrainingReport};
