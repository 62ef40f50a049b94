use actix_web::cookie::{Cookie, SameSite};
use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::state::AppState;
use crate::utils::error::{AppError, Result};
use crate::utils::security::SESSION_COOKIE;

/// Page ouverte après une connexion réussie
pub const LOGIN_REDIRECT: &str = "/indexing";

/// Requête pour l'inscription
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Le nom est requis"))]
    pub name: String,
    #[validate(length(min = 1, message = "L'email est requis"))]
    pub email: String,
    #[validate(length(min = 1, message = "Le mot de passe est requis"))]
    pub password: String,
}

/// Requête pour la connexion
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "L'email est requis"))]
    pub email: String,
    #[validate(length(min = 1, message = "Le mot de passe est requis"))]
    pub password: String,
}

/// Réponse des routes de compte: le statut est porté par le corps, pas par le code HTTP
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl StatusResponse {
    pub fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: "success".to_string(),
            redirect: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: "error".to_string(),
            redirect: None,
        }
    }
}

/// Endpoint d'inscription
#[post("/signup")]
pub async fn signup(
    request: web::Json<SignupRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    request.validate()?;

    match state
        .accounts
        .signup(&request.name, &request.email, &request.password)
        .await
    {
        Ok(_) => Ok(HttpResponse::Ok().json(StatusResponse::success("Account created successfully!"))),
        Err(AppError::DuplicateEmail) => {
            Ok(HttpResponse::Ok().json(StatusResponse::error(&AppError::DuplicateEmail.to_string())))
        }
        Err(e) => Err(e),
    }
}

/// Endpoint de connexion (email/mot de passe)
#[post("/login")]
pub async fn login(
    request: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    request.validate()?;

    let account = match state.accounts.login(&request.email, &request.password).await {
        Ok(account) => account,
        Err(AppError::InvalidCredentials) => {
            debug!("Connexion refusée");
            return Ok(HttpResponse::Ok()
                .json(StatusResponse::error(&AppError::InvalidCredentials.to_string())));
        }
        Err(e) => return Err(e),
    };

    // La session identifie l'utilisateur par son nom
    let token = state.sessions.issue(&account.name, &account.email)?;
    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.is_production())
        .finish();

    let response = StatusResponse {
        redirect: Some(LOGIN_REDIRECT.to_string()),
        ..StatusResponse::success("Login Successful!")
    };

    Ok(HttpResponse::Ok().cookie(cookie).json(response))
}
