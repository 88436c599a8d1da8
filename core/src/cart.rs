// core/src/cart.rs

use sqlx::SqliteConnection;
use tracing::{debug, info, instrument, warn};

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{cart_line::cart_total, CartSnapshot};
use crate::store::{cart, products, Store};

/// Result of an add-to-cart call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
  pub line_id: i64,
  pub quantity: i64,
  /// `true` when a new line was created, `false` when an existing line absorbed the quantity.
  pub created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
  Updated { quantity: i64 },
  Removed,
}

/// Cart mutations and the joined cart view.
///
/// Every mutation holds the store's cart gate and runs in one SQL
/// transaction, so the read of a line and the write that follows it cannot
/// interleave with another mutation.
#[derive(Debug, Clone)]
pub struct CartService {
  store: Store,
}

impl CartService {
  pub fn new(store: Store) -> Self {
    Self { store }
  }

  /// Adds `quantity` of `product_id`, merging into the existing line for that
  /// product if there is one.
  #[instrument(name = "cart::add_to_cart", skip(self))]
  pub async fn add_to_cart(&self, product_id: i64, quantity: i64) -> StorefrontResult<AddOutcome> {
    if product_id <= 0 || quantity <= 0 {
      return Err(StorefrontError::validation(
        "Invalid input: productId and a positive quantity are required.",
      ));
    }
    debug!("validate_cart_input: ok");

    let _gate = self.store.lock_cart().await;
    let mut tx = self.store.pool().begin().await?;

    let Some(product) = products::get(&mut tx, product_id).await? else {
      warn!(product_id, "Add to cart rejected: unknown product.");
      return Err(StorefrontError::validation(format!("Product {product_id} does not exist.")));
    };
    debug!(price = product.price, "fetch_product_for_cart: found");

    let existing = cart::find_by_product(&mut tx, product_id).await?;
    let new_quantity = match &existing {
      Some(line) => line
        .quantity
        .checked_add(quantity)
        .ok_or_else(|| StorefrontError::validation("Quantity is too large."))?,
      None => quantity,
    };
    ensure_total_fits(&mut tx, product_id, new_quantity, product.price).await?;
    debug!(new_quantity, "check_cart_total_for_cart: fits");

    let outcome = match existing {
      Some(line) => {
        cart::set_quantity(&mut tx, line.id, new_quantity).await?;
        AddOutcome {
          line_id: line.id,
          quantity: new_quantity,
          created: false,
        }
      }
      None => {
        let line_id = cart::insert(&mut tx, product_id, new_quantity).await?;
        AddOutcome {
          line_id,
          quantity: new_quantity,
          created: true,
        }
      }
    };
    debug!(line_id = outcome.line_id, created = outcome.created, "add_or_update_cart_item_db: written");

    tx.commit().await?;
    info!(
      line_id = outcome.line_id,
      quantity = outcome.quantity,
      created = outcome.created,
      "Cart line saved."
    );
    Ok(outcome)
  }

  /// Applies `delta` to a line's quantity. A result of zero or less deletes the line.
  #[instrument(name = "cart::update_quantity", skip(self))]
  pub async fn update_quantity(&self, line_id: i64, delta: i64) -> StorefrontResult<QuantityUpdate> {
    if delta == 0 {
      return Err(StorefrontError::validation("Invalid change value."));
    }

    let _gate = self.store.lock_cart().await;
    let mut tx = self.store.pool().begin().await?;

    let line = cart::find(&mut tx, line_id)
      .await?
      .ok_or(StorefrontError::NotFound { line_id })?;
    debug!(current = line.quantity, "fetch_cart_line: found");

    // quantity is positive, so only a positive delta can overflow
    let new_quantity = line
      .quantity
      .checked_add(delta)
      .ok_or_else(|| StorefrontError::validation("Quantity is too large."))?;
    let update = if new_quantity <= 0 {
      cart::delete(&mut tx, line_id).await?;
      debug!("apply_quantity_change: line deleted");
      QuantityUpdate::Removed
    } else {
      if delta > 0 {
        let price = products::get(&mut tx, line.product_id)
          .await?
          .map(|product| product.price)
          .unwrap_or_default();
        ensure_total_fits(&mut tx, line.product_id, new_quantity, price).await?;
      }
      cart::set_quantity(&mut tx, line_id, new_quantity).await?;
      debug!(new_quantity, "apply_quantity_change: line updated");
      QuantityUpdate::Updated { quantity: new_quantity }
    };

    tx.commit().await?;
    info!(?update, "Cart line quantity changed.");
    Ok(update)
  }

  #[instrument(name = "cart::remove_from_cart", skip(self))]
  pub async fn remove_from_cart(&self, line_id: i64) -> StorefrontResult<()> {
    let _gate = self.store.lock_cart().await;
    let mut conn = self.store.pool().acquire().await?;
    if cart::delete(&mut conn, line_id).await? == 0 {
      return Err(StorefrontError::NotFound { line_id });
    }
    info!("Cart line removed.");
    Ok(())
  }

  /// All lines joined with their products, plus Σ(quantity × price).
  #[instrument(name = "cart::get_cart", skip(self))]
  pub async fn get_cart(&self) -> StorefrontResult<CartSnapshot> {
    let mut conn = self.store.pool().acquire().await?;
    let items = cart::list_items(&mut conn).await?;
    CartSnapshot::from_items(items)
  }
}

/// Rejects a write that would leave the line total or the cart total outside
/// the `i64` range once `product_id`'s line holds `new_quantity`.
async fn ensure_total_fits(
  conn: &mut SqliteConnection,
  product_id: i64,
  new_quantity: i64,
  price: i64,
) -> StorefrontResult<()> {
  let line_total = new_quantity
    .checked_mul(price)
    .ok_or_else(|| StorefrontError::validation("Quantity is too large for this product."))?;
  let others = cart::list_items(conn)
    .await?
    .into_iter()
    .filter(|item| item.product_id != product_id)
    .collect::<Vec<_>>();
  cart_total(&others)?
    .checked_add(line_total)
    .ok_or_else(|| StorefrontError::validation("Cart total is too large."))?;
  Ok(())
}
