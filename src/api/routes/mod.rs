use actix_web::web;

pub mod auth;
pub mod contact;
pub mod pages;
pub mod prediction;

/// Routes JSON sous `/api`
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(prediction::live_prediction)
        .service(auth::signup)
        .service(auth::login)
        .service(contact::contact)
}
