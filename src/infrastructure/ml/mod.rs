//! Modèles de régression: estimateurs smartcore, artefacts JSON signés par
//! somme de contrôle et magasin de modèles chargé au démarrage.

pub mod artifact;
pub mod estimators;
pub mod store;

pub use artifact::{ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use estimators::{Estimator, ForestParams};
pub use store::{ModelHandle, ModelStore, ModelSummary};

use thiserror::Error;

/// Échec d'entraînement d'un estimateur
#[derive(Debug, Error)]
pub enum FitError {
    #[error("Jeu d'entraînement vide")]
    EmptyTrainingSet,
    #[error("Aucune feature dans le jeu d'entraînement")]
    NoFeatures,
    #[error("{rows} lignes pour {targets} cibles")]
    LengthMismatch { rows: usize, targets: usize },
    #[error("Ligne {row}: nombre de features différent de {expected}")]
    RaggedRow { row: usize, expected: usize },
    #[error("Paramètres invalides: {0}")]
    InvalidParams(String),
    #[error("Échec de l'estimateur: {0}")]
    Model(#[from] smartcore::error::Failed),
}

/// Échec de chargement d'un artefact de modèle
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Lecture impossible: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format invalide: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Version d'artefact {found} non supportée (attendue: {expected})")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("Artefact incohérent: {0}")]
    Inconsistent(String),
}

/// Échec d'inférence d'un modèle
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Modèle indisponible")]
    Unavailable,
    #[error("Le modèle attend {expected} features, {got} fournies")]
    FeatureMismatch { expected: usize, got: usize },
    #[error("Prédiction non finie")]
    NonFinite,
    #[error("Échec de l'estimateur: {0}")]
    Model(String),
}
