pub mod routes;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::state::AppState;
use crate::utils::error::AppError;

/// Configure toutes les routes de l'application
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(routes::api_scope())
        .service(routes::pages::home)
        .service(routes::pages::premium_page)
        .service(routes::pages::download_file);

    // Endpoint de santé
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
}

/// Corps JSON invalide ou incomplet: 400 avec `{message, status: "error"}`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::Validation(err.to_string()).into()
    })
}

/// Endpoint de santé pour monitoring
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.store_backend,
        "models": state.models.summary(),
        "demo_mode": state.models.is_demo_mode(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
