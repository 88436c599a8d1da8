// core/src/error.rs
use thiserror::Error;

/// Every failure a catalog, cart or checkout operation can end in.
///
/// `Validation`, `NotFound` and `EmptyCart` are terminal per-request outcomes:
/// the caller has to issue a corrected request. `Store` and `Feed` wrap
/// infrastructure failures and are never retried here.
#[derive(Debug, Error)]
pub enum StorefrontError {
  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Cart line {line_id} not found")]
  NotFound { line_id: i64 },

  #[error("Cart is empty")]
  EmptyCart,

  #[error("Store error: {0}")]
  Store(#[from] sqlx::Error),

  #[error("Product feed error: {0}")]
  Feed(#[from] reqwest::Error),
}

impl StorefrontError {
  pub fn validation(message: impl Into<String>) -> Self {
    StorefrontError::Validation(message.into())
  }

  /// True for failures of the underlying persistence or feed, as opposed to
  /// outcomes caused by the request itself.
  pub fn is_infrastructure(&self) -> bool {
    matches!(self, StorefrontError::Store(_) | StorefrontError::Feed(_))
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
