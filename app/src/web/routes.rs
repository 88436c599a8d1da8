// app/src/web/routes.rs

use actix_web::{error::InternalError, web, HttpRequest, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, checkout_handlers, product_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Malformed or incomplete JSON bodies answer with the same `{"error": ...}`
// shape as every other rejection.
fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  let app_error = AppError::Validation(format!("Invalid request body: {}", err));
  InternalError::from_response(err, actix_web::ResponseError::error_response(&app_error)).into()
}

fn path_error_handler(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
  let app_error = AppError::NotFound("Resource not found.".to_string());
  InternalError::from_response(err, actix_web::ResponseError::error_response(&app_error)).into()
}

/// Registers every `/api` route plus the extractor configs they rely on.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .service(
      web::scope("/api")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/products")
            .route("", web::get().to(product_handlers::list_products_handler))
            .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
        )
        .service(
          web::scope("/cart")
            .route("", web::get().to(cart_handlers::get_cart_handler))
            .route("", web::post().to(cart_handlers::add_to_cart_handler))
            .route("/update/{line_id}", web::patch().to(cart_handlers::update_quantity_handler))
            .route("/{line_id}", web::delete().to(cart_handlers::remove_from_cart_handler)),
        )
        .route("/checkout", web::post().to(checkout_handlers::checkout_handler)),
    );
}
