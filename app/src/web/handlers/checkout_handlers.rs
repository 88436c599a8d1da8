// app/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::checkout", skip(app_state))]
pub async fn checkout_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let receipt = app_state.checkout.checkout().await?;
  info!("Checkout completed with total {}.", receipt.total);
  Ok(HttpResponse::Ok().json(receipt))
}
