//! Génère les jeux de données synthétiques et entraîne les modèles de trafic,
//! de qualité de l'air et d'énergie.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use wavespsai_backend::training::{self, TrainingOptions};
use wavespsai_backend::utils::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "train-models", version, about = "Entraîne les modèles de prédiction live")]
struct Cli {
    /// Répertoire de sortie des artefacts de modèles
    #[arg(long, env = "MODELS_DIR", default_value = ".")]
    models_dir: PathBuf,

    /// Répertoire des jeux de données CSV (servis par /download)
    #[arg(long, env = "DATASETS_DIR", default_value = "datasets")]
    datasets_dir: PathBuf,

    /// Nombre d'échantillons synthétiques par jeu de données
    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// Graine aléatoire, pour des résultats reproductibles
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 100)]
    traffic_trees: usize,

    #[arg(long, default_value_t = 50)]
    energy_trees: usize,

    /// Entraîne l'AQI sur le jeu de référence à 5 lignes
    #[arg(long)]
    aqi_reference: bool,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, "compact");

    let options = TrainingOptions {
        models_dir: cli.models_dir,
        datasets_dir: cli.datasets_dir,
        samples: cli.samples,
        seed: cli.seed,
        traffic_trees: cli.traffic_trees,
        energy_trees: cli.energy_trees,
        aqi_reference: cli.aqi_reference,
    };

    let report = training::run(&options)?;

    for path in report.datasets.iter().chain(&report.artifacts) {
        info!("📦 {}", path.display());
    }
    info!("Lancez maintenant le serveur: cargo run --bin wavespsai-backend");

    Ok(())
}
