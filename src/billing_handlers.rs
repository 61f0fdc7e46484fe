use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::models::CheckoutSessionResponse;
use crate::server::AppState;

// POST /create-checkout-session - placeholder until a payment provider is wired in
pub async fn create_checkout_session_handler(data: web::Data<AppState>) -> impl Responder {
    info!("[CHECKOUT] returning placeholder session url");
    HttpResponse::Ok().json(CheckoutSessionResponse {
        url: data.config.checkout_url.clone(),
    })
}
