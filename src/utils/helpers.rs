// utils/helpers.rs
use crate::utils::error::{AppError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Arrondir une valeur à `decimals` décimales
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Créer un répertoire s'il n'existe pas
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| AppError::Internal(e.to_string()))?;
    }
    Ok(())
}

/// Résoudre un nom de fichier à l'intérieur d'un répertoire de base
///
/// Seul un nom simple est accepté: pas de séparateur, pas de `..`, pas de chemin absolu.
pub fn resolve_in_directory(base: &Path, filename: &str) -> Option<PathBuf> {
    let candidate = Path::new(filename);
    let mut components = candidate.components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if !filename.contains('\\') => Some(base.join(name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_two_decimals() {
        assert_eq!(round_to(85.5, 2), 85.5);
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(-1.004, 2), -1.0);
    }

    #[test]
    fn test_resolve_accepts_plain_names() {
        let base = Path::new("datasets");
        assert_eq!(
            resolve_in_directory(base, "traffic_data.csv"),
            Some(PathBuf::from("datasets/traffic_data.csv"))
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let base = Path::new("datasets");
        assert_eq!(resolve_in_directory(base, "../Cargo.toml"), None);
        assert_eq!(resolve_in_directory(base, "sub/file.csv"), None);
        assert_eq!(resolve_in_directory(base, "/etc/passwd"), None);
        assert_eq!(resolve_in_directory(base, ".."), None);
        assert_eq!(resolve_in_directory(base, ""), None);
        assert_eq!(resolve_in_directory(base, "..\\secret"), None);
    }

    #[test]
    fn test_ensure_directory_exists_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
