use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sha2::{Digest, Sha256};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::{ArtifactError, Estimator, PredictionError};

/// Version courante du format d'artefact
pub const ARTIFACT_FORMAT_VERSION: u32 = 2;

/// Modèle entraîné, tel qu'écrit sur disque par `train-models`
#[derive(Debug)]
pub struct ModelArtifact {
    pub name: String,
    pub format_version: u32,
    /// Noms des colonnes d'entrée, dans l'ordre attendu par `predict`
    pub features: Vec<String>,
    pub trained_at: DateTime<Utc>,
    pub estimator: Estimator,
}

/// Enveloppe JSON sur disque; la somme de contrôle porte sur l'estimateur tel qu'écrit
#[derive(Serialize, Deserialize)]
struct ArtifactFile<'a> {
    name: String,
    format_version: u32,
    features: Vec<String>,
    trained_at: DateTime<Utc>,
    checksum: String,
    #[serde(borrow)]
    estimator: &'a RawValue,
}

/// SHA-256 hexadécimal d'un estimateur sérialisé
pub(crate) fn checksum(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl ModelArtifact {
    pub fn new(name: &str, features: &[&str], estimator: Estimator) -> Self {
        Self {
            name: name.to_string(),
            format_version: ARTIFACT_FORMAT_VERSION,
            features: features.iter().map(|f| f.to_string()).collect(),
            trained_at: Utc::now(),
            estimator,
        }
    }

    /// Charge et valide un artefact JSON
    ///
    /// Un fichier altéré, une version inconnue ou un estimateur incapable de prédire
    /// sur les features déclarées sont rejetés ici, jamais au moment de la requête.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let raw = fs::read(path)?;
        let file: ArtifactFile = serde_json::from_slice(&raw)?;

        if file.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::VersionMismatch {
                found: file.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        if checksum(file.estimator.get()) != file.checksum {
            return Err(ArtifactError::Inconsistent(
                "somme de contrôle de l'estimateur invalide".to_string(),
            ));
        }

        if file.features.is_empty() {
            return Err(ArtifactError::Inconsistent("aucune feature déclarée".to_string()));
        }

        let estimator: Estimator = serde_json::from_str(file.estimator.get())?;
        let artifact = ModelArtifact {
            name: file.name,
            format_version: file.format_version,
            features: file.features,
            trained_at: file.trained_at,
            estimator,
        };

        let sample = vec![0.0; artifact.features.len()];
        artifact.predict(&sample).map_err(|e| {
            ArtifactError::Inconsistent(format!("prédiction de contrôle en échec: {}", e))
        })?;

        Ok(artifact)
    }

    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let estimator = RawValue::from_string(serde_json::to_string(&self.estimator)?)?;

        let file = ArtifactFile {
            name: self.name.clone(),
            format_version: self.format_version,
            features: self.features.clone(),
            trained_at: self.trained_at,
            checksum: checksum(estimator.get()),
            estimator: &estimator,
        };

        fs::write(path, serde_json::to_vec(&file)?)?;
        Ok(())
    }

    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictionError> {
        if features.len() != self.features.len() {
            return Err(PredictionError::FeatureMismatch {
                expected: self.features.len(),
                got: features.len(),
            });
        }

        // Un estimateur incohérent peut faire paniquer smartcore: la panique devient une erreur
        let value = panic::catch_unwind(AssertUnwindSafe(|| self.estimator.predict_row(features)))
            .map_err(|_| PredictionError::Model("panique pendant la prédiction".to_string()))?
            .map_err(|e| PredictionError::Model(e.to_string()))?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(PredictionError::NonFinite)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hourly_linear() -> Estimator {
        let rows: Vec<Vec<f64>> = (0..24).map(|h| vec![h as f64]).collect();
        let targets: Vec<f64> = rows.iter().map(|r| 2.0 * r[0] + 10.0).collect();
        Estimator::fit_linear(&rows, &targets).unwrap()
    }

    fn linear_artifact() -> ModelArtifact {
        ModelArtifact::new("energy_model", &["hour"], hourly_linear())
    }

    fn rewrite(path: &Path, edit: impl FnOnce(&mut serde_json::Value)) {
        let mut value: serde_json::Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        edit(&mut value);
        fs::write(path, serde_json::to_vec(&value).unwrap()).unwrap();
    }

    #[test]
    fn test_save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("energy_model.json");

        let artifact = linear_artifact();
        artifact.save(&path).unwrap();

        let loaded = ModelArtifact::load(&path).unwrap();
        assert_eq!(loaded.name, "energy_model");
        assert_eq!(loaded.features, vec!["hour".to_string()]);
        assert_eq!(loaded.trained_at, artifact.trained_at);
        assert!((loaded.predict(&[5.0]).unwrap() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.json");
        linear_artifact().save(&path).unwrap();
        rewrite(&path, |v| v["format_version"] = json!(1));

        assert!(matches!(
            ModelArtifact::load(&path),
            Err(ArtifactError::VersionMismatch { found: 1, expected: 2 })
        ));
    }

    #[test]
    fn test_corrupt_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        fs::write(&path, b"\x80\x04pickle-bytes").unwrap();

        assert!(matches!(ModelArtifact::load(&path), Err(ArtifactError::Format(_))));
    }

    #[test]
    fn test_tampered_forest_fails_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("energy_model.json");
        linear_artifact().save(&path).unwrap();

        // Nœud dont les enfants pointent hors de l'arbre
        rewrite(&path, |v| {
            v["estimator"] = json!({
                "kind": "random_forest",
                "trees": [{ "nodes": [{ "type": "split", "feature": 0, "left": 7, "right": 9 }] }]
            })
        });

        assert!(matches!(ModelArtifact::load(&path), Err(ArtifactError::Inconsistent(_))));
    }

    #[test]
    fn test_malformed_estimator_with_valid_checksum_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("energy_model.json");
        linear_artifact().save(&path).unwrap();

        let bogus = r#"{"kind":"random_forest","trees":[{"nodes":[{"left":7,"right":9}]}]}"#;
        rewrite(&path, |v| {
            v["estimator"] = serde_json::from_str(bogus).unwrap();
            v["checksum"] = json!(checksum(bogus));
        });

        assert!(matches!(ModelArtifact::load(&path), Err(ArtifactError::Format(_))));
    }

    #[test]
    fn test_declared_features_must_match_estimator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");

        // Estimateur à une feature déclaré avec deux colonnes
        ModelArtifact::new("energy_model", &["hour", "day_of_week"], hourly_linear())
            .save(&path)
            .unwrap();

        assert!(matches!(ModelArtifact::load(&path), Err(ArtifactError::Inconsistent(_))));
    }

    #[test]
    fn test_predict_checks_feature_count() {
        let artifact = linear_artifact();
        assert_eq!(
            artifact.predict(&[1.0, 2.0]),
            Err(PredictionError::FeatureMismatch { expected: 1, got: 2 })
        );
    }

    #[test]
    fn test_predict_rejects_non_finite_output() {
        let artifact = linear_artifact();
        assert_eq!(artifact.predict(&[f64::INFINITY]), Err(PredictionError::NonFinite));
    }
}
