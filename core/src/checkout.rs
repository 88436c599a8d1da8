// core/src/checkout.rs

use tracing::{debug, info, instrument, warn};

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{cart_line::cart_total, Receipt};
use crate::store::{cart, Store};

#[derive(Debug, Clone)]
pub struct CheckoutService {
  store: Store,
}

impl CheckoutService {
  pub fn new(store: Store) -> Self {
    Self { store }
  }

  /// Totals the cart, issues a receipt and empties the cart.
  ///
  /// The read, the total and the clear happen under the cart gate inside one
  /// transaction: the receipt always matches exactly the lines that were removed.
  #[instrument(name = "checkout::checkout", skip(self))]
  pub async fn checkout(&self) -> StorefrontResult<Receipt> {
    let _gate = self.store.lock_cart().await;
    let mut tx = self.store.pool().begin().await?;

    let items = cart::list_items(&mut tx).await?;
    if items.is_empty() {
      warn!("Checkout rejected: cart is empty.");
      return Err(StorefrontError::EmptyCart);
    }
    debug!(lines = items.len(), "load_cart_for_checkout: loaded");

    let receipt = Receipt::new(cart_total(&items)?);
    debug!(total = receipt.total, "compute_receipt_total: computed");

    let cleared = cart::delete_all(&mut tx).await?;
    debug!(lines = cleared, "clear_cart_after_checkout: cleared");
    tx.commit().await?;

    info!(total = receipt.total, lines = cleared, "Checkout completed.");
    Ok(receipt)
  }
}
