use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use super::synthetic::{self, AqiRecord, EnergyRecord, TrafficRecord};
use crate::infrastructure::ml::store::{AQI_MODEL_FILE, ENERGY_MODEL_FILE, TRAFFIC_MODEL_FILE};
use crate::infrastructure::ml::{ArtifactError, Estimator, FitError, ForestParams, ModelArtifact};

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Erreur d'entrée/sortie: {0}")]
    Io(#[from] std::io::Error),
    #[error("Erreur CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Entraînement impossible: {0}")]
    Fit(#[from] FitError),
    #[error("Sauvegarde du modèle impossible: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Paramètres d'une session d'entraînement
#[derive(Debug, Clone)]
pub struct TrainingOptions {
    pub models_dir: PathBuf,
    pub datasets_dir: PathBuf,
    pub samples: usize,
    pub seed: Option<u64>,
    pub traffic_trees: usize,
    pub energy_trees: usize,
    /// Entraîne l'AQI sur le petit jeu de référence plutôt que sur les données synthétiques
    pub aqi_reference: bool,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("."),
            datasets_dir: PathBuf::from("datasets"),
            samples: 1000,
            seed: None,
            traffic_trees: 100,
            energy_trees: 50,
            aqi_reference: false,
        }
    }
}

/// Fichiers produits par `run`
#[derive(Debug, Clone, Default)]
pub struct TrainingReport {
    pub datasets: Vec<PathBuf>,
    pub artifacts: Vec<PathBuf>,
}

/// Génère les jeux de données, entraîne les trois modèles et écrit les artefacts
pub fn run(options: &TrainingOptions) -> Result<TrainingReport, TrainingError> {
    fs::create_dir_all(&options.models_dir)?;
    fs::create_dir_all(&options.datasets_dir)?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut report = TrainingReport::default();

    info!("🚀 Démarrage de l'entraînement ({} échantillons)", options.samples);

    // 1. Trafic: forêt sur (heure, jour de la semaine)
    info!("[1/3] Entraînement du modèle de trafic...");
    let traffic = synthetic::generate_traffic(options.samples, &mut rng);
    report.datasets.push(write_csv(&options.datasets_dir.join("traffic_data.csv"), &traffic)?);

    let rows: Vec<Vec<f64>> = traffic
        .iter()
        .map(|r| vec![r.hour as f64, r.day_of_week as f64])
        .collect();
    let targets: Vec<f64> = traffic.iter().map(|r| r.traffic as f64).collect();
    let forest = Estimator::fit_forest(&rows, &targets, forest_params(options.traffic_trees, &mut rng))?;
    report.artifacts.push(save(
        &options.models_dir.join(TRAFFIC_MODEL_FILE),
        ModelArtifact::new("traffic_model", &["hour", "day_of_week"], forest),
    )?);

    // 2. AQI: régression linéaire sur (température, humidité, vent)
    info!("[2/3] Entraînement du modèle AQI...");
    let aqi: Vec<AqiRecord> = if options.aqi_reference {
        synthetic::reference_aqi()
    } else {
        synthetic::generate_aqi(options.samples, &mut rng)
    };
    report.datasets.push(write_csv(&options.datasets_dir.join("aqi_data.csv"), &aqi)?);

    let rows: Vec<Vec<f64>> = aqi
        .iter()
        .map(|r| vec![r.temperature, r.humidity, r.wind])
        .collect();
    let targets: Vec<f64> = aqi.iter().map(|r| r.aqi).collect();
    let linear = Estimator::fit_linear(&rows, &targets)?;
    report.artifacts.push(save(
        &options.models_dir.join(AQI_MODEL_FILE),
        ModelArtifact::new("aqi_model", &["Temp", "Humi", "Wind"], linear),
    )?);

    // 3. Énergie: forêt sur l'heure seule
    info!("[3/3] Entraînement du modèle d'énergie...");
    let hours: Vec<u32> = traffic.iter().map(|r: &TrafficRecord| r.hour).collect();
    let energy: Vec<EnergyRecord> = synthetic::generate_energy(&hours, &mut rng);
    report.datasets.push(write_csv(&options.datasets_dir.join("energy_data.csv"), &energy)?);

    let rows: Vec<Vec<f64>> = energy.iter().map(|r| vec![r.hour as f64]).collect();
    let targets: Vec<f64> = energy.iter().map(|r| r.consumption as f64).collect();
    let forest = Estimator::fit_forest(&rows, &targets, forest_params(options.energy_trees, &mut rng))?;
    report.artifacts.push(save(
        &options.models_dir.join(ENERGY_MODEL_FILE),
        ModelArtifact::new("energy_model", &["hour"], forest),
    )?);

    info!("🎉 Modèles et jeux de données prêts");
    Ok(report)
}

/// La graine de la forêt est tirée du générateur de la session: `--seed` fixe tout
fn forest_params(n_trees: usize, rng: &mut StdRng) -> ForestParams {
    ForestParams {
        n_trees,
        seed: rng.gen(),
    }
}

fn save(path: &Path, artifact: ModelArtifact) -> Result<PathBuf, TrainingError> {
    artifact.save(path)?;
    info!("✅ Modèle sauvegardé: {:?}", path);
    Ok(path.to_path_buf())
}

fn write_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<PathBuf, TrainingError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("📄 {} lignes écrites dans {:?}", records.len(), path);
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ml::ModelStore;

    fn options_in(dir: &Path) -> TrainingOptions {
        TrainingOptions {
            models_dir: dir.join("models"),
            datasets_dir: dir.join("datasets"),
            samples: 300,
            seed: Some(2024),
            traffic_trees: 8,
            energy_trees: 5,
            aqi_reference: false,
        }
    }

    #[test]
    fn test_run_produces_loadable_models() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path());

        let report = run(&options).unwrap();
        assert_eq!(report.artifacts.len(), 3);
        assert_eq!(report.datasets.len(), 3);

        let store = ModelStore::load_from_dir(&options.models_dir);
        assert!(store.summary().traffic && store.summary().aqi && store.summary().energy);

        // Pointe du matin en semaine vs nuit
        let peak = store.traffic.predict(&[9.0, 1.0]).unwrap();
        let night = store.traffic.predict(&[3.0, 1.0]).unwrap();
        assert!(peak > night + 1000.0, "pointe {} / nuit {}", peak, night);

        let day = store.energy.predict(&[12.0]).unwrap();
        let evening = store.energy.predict(&[22.0]).unwrap();
        assert!(day > evening + 40.0);
    }

    #[test]
    fn test_aqi_model_learns_generating_trend() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path());
        run(&options).unwrap();

        let artifact = ModelArtifact::load(&options.models_dir.join(AQI_MODEL_FILE)).unwrap();
        assert!(matches!(artifact.estimator, Estimator::LinearRegression(_)));

        // Tendance génératrice: 100 + 2*temp - 3*vent, humidité sans effet
        let base = artifact.predict(&[30.0, 50.0, 10.0]).unwrap();
        assert!((base - 130.0).abs() < 5.0, "base {}", base);

        let hotter = artifact.predict(&[40.0, 50.0, 10.0]).unwrap();
        let humid = artifact.predict(&[30.0, 80.0, 10.0]).unwrap();
        let windy = artifact.predict(&[30.0, 50.0, 15.0]).unwrap();
        assert!((hotter - base - 20.0).abs() < 5.0);
        assert!((humid - base).abs() < 5.0);
        assert!((windy - base + 15.0).abs() < 5.0);
    }

    #[test]
    fn test_datasets_have_expected_headers() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path());
        run(&options).unwrap();

        let aqi = fs::read_to_string(options.datasets_dir.join("aqi_data.csv")).unwrap();
        assert!(aqi.starts_with("Temp,Humi,Wind,AQI\n"));
        assert_eq!(aqi.lines().count(), 301);

        let traffic = fs::read_to_string(options.datasets_dir.join("traffic_data.csv")).unwrap();
        assert!(traffic.starts_with("hour,day_of_week,traffic\n"));

        let energy = fs::read_to_string(options.datasets_dir.join("energy_data.csv")).unwrap();
        assert!(energy.starts_with("hour,consumption\n"));
    }

    #[test]
    fn test_reference_aqi_table() {
        let dir = tempfile::tempdir().unwrap();
        let options = TrainingOptions {
            aqi_reference: true,
            ..options_in(dir.path())
        };
        run(&options).unwrap();

        let aqi = fs::read_to_string(options.datasets_dir.join("aqi_data.csv")).unwrap();
        assert_eq!(aqi.lines().count(), 6);
        assert!(ModelArtifact::load(&options.models_dir.join(AQI_MODEL_FILE)).is_ok());
    }
}
