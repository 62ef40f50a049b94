// utils/error.rs
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::infrastructure::database::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    // Erreurs de comptes
    #[error("Email already exists!")]
    DuplicateEmail,

    #[error("Invalid Email or Password")]
    InvalidCredentials,

    // Erreurs de données
    #[error("Validation error: {0}")]
    Validation(String),

    // Erreurs de ressources
    #[error("File not found!")]
    FileNotFound,

    #[error("Page not found: {0}")]
    PageNotFound(String),

    // Erreurs de session
    #[error("Session error: {0}")]
    Session(String),

    // Erreurs de base de données
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            // 400 - Bad Request
            AppError::Validation(_) => HttpResponse::BadRequest().json(json!({
                "message": self.to_string(),
                "status": "error"
            })),

            // 404 - Not Found (texte brut)
            AppError::FileNotFound | AppError::PageNotFound(_) => HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body(self.to_string()),

            // Les erreurs de compte sont normalement converties en réponse 200 par les routes
            AppError::DuplicateEmail | AppError::InvalidCredentials => {
                HttpResponse::Ok().json(json!({
                    "message": self.to_string(),
                    "status": "error"
                }))
            }

            // 500 - Internal Server Error
            _ => {
                tracing::error!("Internal server error: {}", self);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal server error",
                    "status": "error"
                }))
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
            other => AppError::Database(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let error_messages: Vec<String> = errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect();
        messages.sort();

        AppError::Validation(messages.join("; "))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

// Type de résultat standard
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_file_not_found_is_plain_text_404() {
        let resp = AppError::FileNotFound.error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"File not found!");
    }

    #[actix_web::test]
    async fn test_database_error_hides_details() {
        let resp = AppError::Database("connection refused".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "error");
        assert!(!value["message"].as_str().unwrap().contains("refused"));
    }

    #[test]
    fn test_store_duplicate_maps_to_duplicate_email() {
        let err: AppError = StoreError::DuplicateEmail.into();
        assert!(matches!(err, AppError::DuplicateEmail));
    }
}
