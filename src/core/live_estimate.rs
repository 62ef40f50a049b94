// core/live_estimate.rs
use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::Rng;
use tracing::debug;

use crate::domain::{LiveEstimate, LIVE_STATUS};
use crate::infrastructure::ml::{ModelHandle, ModelStore, PredictionError};
use crate::utils::helpers::round_to;

/// Valeurs de repli quand un modèle est indisponible ou échoue
pub const TRAFFIC_FALLBACK: f64 = 1200.0;
pub const AQI_FALLBACK: f64 = 150.0;
pub const ENERGY_FALLBACK: f64 = 85.5;

/// Conditions météo simulées pour le modèle AQI (ce ne sont pas des mesures)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockWeather {
    pub temperature: f64,
    pub humidity: f64,
    pub wind: f64,
}

impl MockWeather {
    /// Tirage uniforme autour de 30°C ±5, 50% ±10, 10 km/h ±2
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            temperature: 30.0 + rng.gen_range(-5.0..=5.0),
            humidity: 50.0 + rng.gen_range(-10.0..=10.0),
            wind: 10.0 + rng.gen_range(-2.0..=2.0),
        }
    }

    fn features(&self) -> [f64; 3] {
        [self.temperature, self.humidity, self.wind]
    }
}

/// Choisit la prédiction ou la valeur de repli
fn resolve(model: &str, outcome: Result<f64, PredictionError>, fallback: f64) -> f64 {
    match outcome {
        Ok(value) => value,
        Err(PredictionError::Unavailable) => fallback,
        Err(e) => {
            debug!(model, error = %e, "Prédiction en échec, valeur de repli");
            fallback
        }
    }
}

fn predict_with_fallback(model: &str, handle: &ModelHandle, features: &[f64], fallback: f64) -> f64 {
    resolve(model, handle.predict(features), fallback)
}

/// Calcule l'estimation live pour l'instant `now` (heure locale)
///
/// Ne renvoie jamais d'erreur: chaque modèle en échec est remplacé par sa valeur de repli.
pub fn compute_live_estimate<R: Rng + ?Sized>(
    models: &ModelStore,
    now: NaiveDateTime,
    rng: &mut R,
) -> LiveEstimate {
    let hour = now.hour();
    // Lundi = 0, comme le jeu d'entraînement
    let day_of_week = now.weekday().num_days_from_monday();

    let traffic = predict_with_fallback(
        "traffic",
        &models.traffic,
        &[hour as f64, day_of_week as f64],
        TRAFFIC_FALLBACK,
    );

    let weather = MockWeather::sample(rng);
    let aqi = predict_with_fallback("aqi", &models.aqi, &weather.features(), AQI_FALLBACK);

    let energy = predict_with_fallback("energy", &models.energy, &[hour as f64], ENERGY_FALLBACK);

    LiveEstimate {
        traffic_volume: traffic.trunc() as i64,
        air_quality_index: aqi.trunc() as i64,
        energy_load: round_to(energy, 2),
        hour,
        status: LIVE_STATUS.to_string(),
    }
}
