// app/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use storefront::StorefrontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Storefront(#[from] StorefrontError),

  /// Malformed request bodies or parameters rejected before reaching a service.
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),
}

impl AppError {
  /// Store, feed and configuration failures; everything else is the caller's fault.
  fn is_server_fault(&self) -> bool {
    match self {
      AppError::Storefront(e) => e.is_infrastructure(),
      AppError::Config(_) => true,
      AppError::Validation(_) | AppError::NotFound(_) => false,
    }
  }

  /// Message sent to the client. Infrastructure details stay in the logs.
  fn public_message(&self) -> String {
    match self {
      AppError::Storefront(StorefrontError::Validation(m)) => m.clone(),
      AppError::Storefront(StorefrontError::NotFound { .. }) => "Item not found in cart.".to_string(),
      AppError::Storefront(StorefrontError::EmptyCart) => "Cart is empty".to_string(),
      AppError::Storefront(StorefrontError::Store(_)) => "Internal database error".to_string(),
      AppError::Storefront(StorefrontError::Feed(_)) => "Product feed unavailable".to_string(),
      AppError::Validation(m) | AppError::NotFound(m) => m.clone(),
      AppError::Config(_) => "Internal server error".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Storefront(StorefrontError::Validation(_)) => StatusCode::BAD_REQUEST,
      AppError::Storefront(StorefrontError::EmptyCart) => StatusCode::BAD_REQUEST,
      AppError::Storefront(StorefrontError::NotFound { .. }) => StatusCode::NOT_FOUND,
      AppError::Storefront(StorefrontError::Store(_) | StorefrontError::Feed(_)) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if self.is_server_fault() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Rejecting request");
    }
    HttpResponse::build(status).json(json!({ "error": self.public_message() }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn maps_taxonomy_to_status_codes() {
    let cases = [
      (AppError::from(StorefrontError::validation("bad")), StatusCode::BAD_REQUEST),
      (AppError::from(StorefrontError::EmptyCart), StatusCode::BAD_REQUEST),
      (AppError::from(StorefrontError::NotFound { line_id: 1 }), StatusCode::NOT_FOUND),
      (
        AppError::from(StorefrontError::Store(sqlx::Error::PoolTimedOut)),
        StatusCode::INTERNAL_SERVER_ERROR,
      ),
      (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
      (AppError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, status) in cases {
      assert_eq!(err.status_code(), status, "{err}");
    }
  }

  #[test]
  fn server_faults_match_5xx_statuses() {
    let cases = [
      AppError::from(StorefrontError::Store(sqlx::Error::PoolTimedOut)),
      AppError::from(StorefrontError::EmptyCart),
      AppError::from(StorefrontError::NotFound { line_id: 9 }),
      AppError::Validation("x".into()),
      AppError::Config("x".into()),
    ];
    for err in cases {
      assert_eq!(err.is_server_fault(), err.status_code().is_server_error(), "{err}");
    }
  }

  #[test]
  fn store_errors_are_not_leaked() {
    let err = AppError::from(StorefrontError::Store(sqlx::Error::PoolTimedOut));
    assert_eq!(err.public_message(), "Internal database error");
  }
}
