// app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use storefront::QuantityUpdate;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTOs ---

/// Both fields are optional at the wire level so a missing field is reported
/// as a validation error rather than a deserialization failure.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: Option<i64>,
  pub quantity: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateQuantityRequestPayload {
  pub change: Option<i64>,
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip(app_state))]
pub async fn get_cart_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let snapshot = app_state.cart.get_cart().await?;
  Ok(HttpResponse::Ok().json(snapshot))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, req_payload),
  fields(product_id = ?req_payload.product_id, quantity = ?req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let (product_id, quantity) = match (req_payload.product_id, req_payload.quantity) {
    (Some(product_id), Some(quantity)) => (product_id, quantity),
    _ => {
      return Err(AppError::Validation(
        "Invalid input: productId and a positive quantity are required.".to_string(),
      ))
    }
  };

  let outcome = app_state.cart.add_to_cart(product_id, quantity).await?;
  info!(
    "Cart line {} now holds {} of product {}.",
    outcome.line_id, outcome.quantity, product_id
  );

  if outcome.created {
    Ok(HttpResponse::Created().json(json!({ "message": "Item added to the cart", "id": outcome.line_id })))
  } else {
    Ok(HttpResponse::Ok().json(json!({ "message": "Cart updated", "id": outcome.line_id })))
  }
}

#[instrument(name = "handler::update_quantity", skip(app_state, path, req_payload), fields(line_id = %path.as_ref()))]
pub async fn update_quantity_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<UpdateQuantityRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let line_id = path.into_inner();
  let change = req_payload
    .change
    .ok_or_else(|| AppError::Validation("Invalid change value.".to_string()))?;

  let message = match app_state.cart.update_quantity(line_id, change).await? {
    QuantityUpdate::Updated { .. } => "Cart item updated successfully.",
    QuantityUpdate::Removed => "Item removed from cart.",
  };
  Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

#[instrument(name = "handler::remove_from_cart", skip(app_state, path), fields(line_id = %path.as_ref()))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state.cart.remove_from_cart(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Item removed" })))
}
