use serde::{Deserialize, Serialize};

/// Statut affiché par le tableau de bord pour une estimation live
pub const LIVE_STATUS: &str = "AI Live";

/// Estimation live construite à chaque requête, jamais persistée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveEstimate {
    /// Volume de trafic prédit (tronqué à l'entier)
    #[serde(rename = "traffic")]
    pub traffic_volume: i64,
    /// Indice de qualité de l'air prédit (tronqué à l'entier)
    #[serde(rename = "aqi")]
    pub air_quality_index: i64,
    /// Charge énergétique prédite, arrondie à 2 décimales
    #[serde(rename = "energy")]
    pub energy_load: f64,
    /// Heure locale de la requête (0-23)
    pub hour: u32,
    pub status: String,
}
