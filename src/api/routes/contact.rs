use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::auth::StatusResponse;
use crate::state::AppState;
use crate::utils::error::Result;

/// Formulaire de contact: tous les champs sont requis, leur contenu n'est pas validé
#[derive(Debug, Deserialize, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Endpoint du formulaire de contact
#[post("/contact")]
pub async fn contact(
    request: web::Json<ContactRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state
        .accounts
        .contact(&request.name, &request.email, &request.message)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::success("Message Sent to Command Center!")))
}
