use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};

use super::FitError;

pub type LinearModel = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;
pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Estimateur entraîné, sérialisé tel quel dans l'artefact
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LinearRegression(LinearModel),
    RandomForest(ForestModel),
}

/// Hyperparamètres de la forêt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 0,
        }
    }
}

impl Estimator {
    /// Régression linéaire par moindres carrés (intercept inclus)
    pub fn fit_linear(rows: &[Vec<f64>], targets: &[f64]) -> Result<Self, FitError> {
        let x = to_matrix(rows, targets)?;
        let model = LinearRegression::fit(&x, &targets.to_vec(), LinearRegressionParameters::default())?;
        Ok(Estimator::LinearRegression(model))
    }

    /// Forêt aléatoire de régression, reproductible à graine fixée
    pub fn fit_forest(rows: &[Vec<f64>], targets: &[f64], params: ForestParams) -> Result<Self, FitError> {
        if params.n_trees == 0 {
            return Err(FitError::InvalidParams("n_trees doit être supérieur à 0".to_string()));
        }

        let x = to_matrix(rows, targets)?;
        let parameters = RandomForestRegressorParameters::default()
            .with_n_trees(params.n_trees)
            .with_seed(params.seed);
        let model = RandomForestRegressor::fit(&x, &targets.to_vec(), parameters)?;
        Ok(Estimator::RandomForest(model))
    }

    /// Prédit une seule ligne de features
    pub fn predict_row(&self, features: &[f64]) -> Result<f64, smartcore::error::Failed> {
        let x = DenseMatrix::from_2d_vec(&vec![features.to_vec()])?;
        let predictions = match self {
            Estimator::LinearRegression(model) => model.predict(&x)?,
            Estimator::RandomForest(model) => model.predict(&x)?,
        };

        predictions
            .first()
            .copied()
            .ok_or_else(|| smartcore::error::Failed::predict("aucune prédiction produite"))
    }
}

/// Vérifie le jeu d'entraînement puis le convertit en matrice dense
fn to_matrix(rows: &[Vec<f64>], targets: &[f64]) -> Result<DenseMatrix<f64>, FitError> {
    if rows.is_empty() {
        return Err(FitError::EmptyTrainingSet);
    }
    if rows.len() != targets.len() {
        return Err(FitError::LengthMismatch {
            rows: rows.len(),
            targets: targets.len(),
        });
    }

    let n_features = rows[0].len();
    if n_features == 0 {
        return Err(FitError::NoFeatures);
    }
    if let Some(bad) = rows.iter().position(|r| r.len() != n_features) {
        return Err(FitError::RaggedRow { row: bad, expected: n_features });
    }

    Ok(DenseMatrix::from_2d_vec(&rows.to_vec())?)
}
