use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::{ModelArtifact, PredictionError};

pub const TRAFFIC_MODEL_FILE: &str = "traffic_model.json";
pub const AQI_MODEL_FILE: &str = "aqi_model.json";
pub const ENERGY_MODEL_FILE: &str = "energy_model.json";

/// Référence vers un modèle chargé, ou état désactivé après un échec de chargement
#[derive(Debug, Clone)]
pub enum ModelHandle {
    Loaded(Arc<ModelArtifact>),
    Unavailable { reason: String },
}

impl ModelHandle {
    /// Charge un artefact; tout échec donne un handle `Unavailable`, jamais une erreur
    pub fn load(path: &Path) -> Self {
        match ModelArtifact::load(path) {
            Ok(artifact) => {
                info!("✅ Modèle chargé: {} ({:?})", artifact.name, path);
                ModelHandle::Loaded(Arc::new(artifact))
            }
            Err(e) => {
                warn!("⚠️  Modèle {:?} indisponible, valeur de repli utilisée: {}", path, e);
                ModelHandle::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        ModelHandle::Unavailable {
            reason: reason.to_string(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelHandle::Loaded(_))
    }

    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictionError> {
        match self {
            ModelHandle::Loaded(artifact) => artifact.predict(features),
            ModelHandle::Unavailable { .. } => Err(PredictionError::Unavailable),
        }
    }
}

/// État de chargement des trois modèles, exposé par `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub traffic: bool,
    pub aqi: bool,
    pub energy: bool,
}

/// Les trois modèles utilisés par l'estimation live, immuables après le démarrage
#[derive(Debug, Clone)]
pub struct ModelStore {
    pub traffic: ModelHandle,
    pub aqi: ModelHandle,
    pub energy: ModelHandle,
}

impl ModelStore {
    /// Charge chaque modèle indépendamment depuis `dir`
    pub fn load_from_dir(dir: &Path) -> Self {
        info!("🔧 Chargement des modèles depuis {:?}...", dir);

        let store = Self {
            traffic: ModelHandle::load(&dir.join(TRAFFIC_MODEL_FILE)),
            aqi: ModelHandle::load(&dir.join(AQI_MODEL_FILE)),
            energy: ModelHandle::load(&dir.join(ENERGY_MODEL_FILE)),
        };

        let summary = store.summary();
        if store.is_demo_mode() {
            warn!("⚠️  Aucun modèle chargé - mode démo (valeurs de repli)");
        } else {
            info!(
                traffic = summary.traffic,
                aqi = summary.aqi,
                energy = summary.energy,
                "✅ Modèles prêts"
            );
        }

        store
    }

    /// Magasin sans aucun modèle: toutes les prédictions utilisent les valeurs de repli
    pub fn unavailable() -> Self {
        Self {
            traffic: ModelHandle::unavailable("non chargé"),
            aqi: ModelHandle::unavailable("non chargé"),
            energy: ModelHandle::unavailable("non chargé"),
        }
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            traffic: self.traffic.is_loaded(),
            aqi: self.aqi.is_loaded(),
            energy: self.energy.is_loaded(),
        }
    }

    pub fn is_demo_mode(&self) -> bool {
        let summary = self.summary();
        !(summary.traffic || summary.aqi || summary.energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ml::Estimator;

    #[test]
    fn test_missing_directory_gives_demo_mode() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::load_from_dir(&dir.path().join("absent"));

        assert!(store.is_demo_mode());
        assert_eq!(store.traffic.predict(&[8.0, 1.0]), Err(PredictionError::Unavailable));
    }

    #[test]
    fn test_models_load_independently() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<Vec<f64>> = (0..24).map(|h| vec![h as f64]).collect();
        let targets: Vec<f64> = rows.iter().map(|r| r[0] + 50.0).collect();
        ModelArtifact::new("energy_model", &["hour"], Estimator::fit_linear(&rows, &targets).unwrap())
            .save(&dir.path().join(ENERGY_MODEL_FILE))
            .unwrap();
        std::fs::write(dir.path().join(AQI_MODEL_FILE), "{ pas du json").unwrap();

        let store = ModelStore::load_from_dir(dir.path());

        assert_eq!(
            store.summary(),
            ModelSummary {
                traffic: false,
                aqi: false,
                energy: true
            }
        );
        assert!(!store.is_demo_mode());
        assert!((store.energy.predict(&[10.0]).unwrap() - 60.0).abs() < 1e-6);
        assert!(matches!(store.aqi, ModelHandle::Unavailable { .. }));
    }
}
