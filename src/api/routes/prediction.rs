use actix_web::{get, web, HttpResponse};

use crate::core::compute_live_estimate;
use crate::state::AppState;

/// Estimation live: répond toujours 200, avec les valeurs de repli si besoin
#[get("/live-prediction")]
pub async fn live_prediction(state: web::Data<AppState>) -> HttpResponse {
    let now = chrono::Local::now().naive_local();
    let estimate = compute_live_estimate(&state.models, now, &mut rand::thread_rng());

    HttpResponse::Ok().json(estimate)
}
