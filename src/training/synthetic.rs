use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ligne de `traffic_data.csv`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub hour: u32,
    pub day_of_week: u32,
    pub traffic: i64,
}

/// Ligne de `aqi_data.csv` (en-têtes `Temp,Humi,Wind,AQI`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AqiRecord {
    #[serde(rename = "Temp")]
    pub temperature: f64,
    #[serde(rename = "Humi")]
    pub humidity: f64,
    #[serde(rename = "Wind")]
    pub wind: f64,
    #[serde(rename = "AQI")]
    pub aqi: f64,
}

/// Ligne de `energy_data.csv`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub hour: u32,
    pub consumption: i64,
}

/// Trafic attendu hors bruit: pointes 8h-10h et 17h-20h, creux le week-end
pub fn base_traffic(hour: u32, day_of_week: u32) -> i64 {
    let mut base = 500;
    if (8..=10).contains(&hour) || (17..=20).contains(&hour) {
        base += 1500;
    }
    if day_of_week >= 5 {
        base -= 400;
    }
    base
}

/// Consommation attendue hors bruit: plus élevée de 9h à 18h
pub fn base_energy(hour: u32) -> i64 {
    if (9..=18).contains(&hour) {
        110
    } else {
        50
    }
}

/// AQI attendu hors bruit: chaleur et vent faible dégradent l'air
pub fn base_aqi(temperature: f64, wind: f64) -> f64 {
    100.0 + temperature * 2.0 - wind * 3.0
}

pub fn generate_traffic<R: Rng + ?Sized>(samples: usize, rng: &mut R) -> Vec<TrafficRecord> {
    (0..samples)
        .map(|_| {
            let hour = rng.gen_range(0..24);
            let day_of_week = rng.gen_range(0..7);
            TrafficRecord {
                hour,
                day_of_week,
                traffic: base_traffic(hour, day_of_week) + rng.gen_range(-200..200),
            }
        })
        .collect()
}

/// Réutilise les heures tirées pour le trafic
pub fn generate_energy<R: Rng + ?Sized>(hours: &[u32], rng: &mut R) -> Vec<EnergyRecord> {
    hours
        .iter()
        .map(|&hour| EnergyRecord {
            hour,
            consumption: base_energy(hour) + rng.gen_range(-10..10),
        })
        .collect()
}

pub fn generate_aqi<R: Rng + ?Sized>(samples: usize, rng: &mut R) -> Vec<AqiRecord> {
    let temperatures: Vec<f64> = (0..samples).map(|_| rng.gen_range(20.0..45.0)).collect();
    let humidities: Vec<f64> = (0..samples).map(|_| rng.gen_range(30.0..90.0)).collect();
    let winds: Vec<f64> = (0..samples).map(|_| rng.gen_range(0.0..20.0)).collect();

    temperatures
        .into_iter()
        .zip(humidities)
        .zip(winds)
        .map(|((temperature, humidity), wind)| AqiRecord {
            temperature,
            humidity,
            wind,
            aqi: base_aqi(temperature, wind) + f64::from(rng.gen_range(-20_i32..20)),
        })
        .collect()
}

/// Petit jeu de référence utilisé par `--aqi-reference`
pub fn reference_aqi() -> Vec<AqiRecord> {
    [
        (35.0, 30.0, 15.0, 80.0),
        (25.0, 80.0, 5.0, 150.0),
        (15.0, 50.0, 8.0, 100.0),
        (30.0, 60.0, 10.0, 120.0),
        (20.0, 40.0, 12.0, 90.0),
    ]
    .into_iter()
    .map(|(temperature, humidity, wind, aqi)| AqiRecord {
        temperature,
        humidity,
        wind,
        aqi,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_traffic_pattern() {
        assert_eq!(base_traffic(3, 1), 500);
        assert_eq!(base_traffic(9, 2), 2000);
        assert_eq!(base_traffic(18, 6), 1600);
        assert_eq!(base_traffic(12, 5), 100);
    }

    #[test]
    fn test_generated_traffic_stays_within_noise() {
        let mut rng = StdRng::seed_from_u64(1);
        for record in generate_traffic(500, &mut rng) {
            assert!(record.hour < 24 && record.day_of_week < 7);
            let noise = record.traffic - base_traffic(record.hour, record.day_of_week);
            assert!((-200..200).contains(&noise));
        }
    }

    #[test]
    fn test_energy_reuses_hours() {
        let mut rng = StdRng::seed_from_u64(2);
        let hours = [0, 9, 18, 23];
        let records = generate_energy(&hours, &mut rng);

        assert_eq!(records.iter().map(|r| r.hour).collect::<Vec<_>>(), hours);
        for record in records {
            assert!((record.consumption - base_energy(record.hour)).abs() <= 10);
        }
    }

    #[test]
    fn test_aqi_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for record in generate_aqi(300, &mut rng) {
            assert!((20.0..45.0).contains(&record.temperature));
            assert!((30.0..90.0).contains(&record.humidity));
            assert!((0.0..20.0).contains(&record.wind));
            assert!((record.aqi - base_aqi(record.temperature, record.wind)).abs() <= 20.0);
        }
    }
}
