// core/src/models/cart_line.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{StorefrontError, StorefrontResult};

/// One row of the `cart` table. `quantity` is always positive; a line that
/// would drop to zero is deleted instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub id: i64,
  pub product_id: i64,
  pub quantity: i64,
}

/// A cart line joined with the product it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub id: i64,
  pub quantity: i64,
  pub product_id: i64,
  pub name: String,
  pub price: i64,
  pub image: String,
}

impl CartItem {
  /// `None` when quantity × price does not fit in an `i64`.
  pub fn line_total(&self) -> Option<i64> {
    self.price.checked_mul(self.quantity)
  }
}

/// The whole cart as returned by `GET /api/cart`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
  pub items: Vec<CartItem>,
  pub total: i64,
}

impl CartSnapshot {
  pub fn from_items(items: Vec<CartItem>) -> StorefrontResult<Self> {
    let total = cart_total(&items)?;
    Ok(Self { items, total })
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

/// Σ(quantity × price) over the given lines, or a validation error when the
/// sum leaves the `i64` range.
pub fn cart_total(items: &[CartItem]) -> StorefrontResult<i64> {
  items
    .iter()
    .try_fold(0i64, |total, item| item.line_total().and_then(|line| total.checked_add(line)))
    .ok_or_else(|| StorefrontError::validation("Cart total is too large."))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(id: i64, quantity: i64, price: i64) -> CartItem {
    CartItem {
      id,
      quantity,
      product_id: id,
      name: format!("product {id}"),
      price,
      image: String::new(),
    }
  }

  #[test]
  fn snapshot_total_sums_every_line() {
    let snapshot = CartSnapshot::from_items(vec![item(1, 2, 10995), item(2, 3, 102)]).unwrap();
    assert_eq!(snapshot.total, 2 * 10995 + 3 * 102);
    assert!(!snapshot.is_empty());
  }

  #[test]
  fn empty_snapshot_has_zero_total() {
    let snapshot = CartSnapshot::from_items(Vec::new()).unwrap();
    assert_eq!(snapshot.total, 0);
    assert!(snapshot.is_empty());
  }

  #[test]
  fn overflowing_totals_are_errors() {
    assert!(item(1, i64::MAX / 1000, 10995).line_total().is_none());
    assert!(matches!(
      cart_total(&[item(1, i64::MAX / 1000, 10995)]),
      Err(StorefrontError::Validation(_))
    ));
    assert!(matches!(
      cart_total(&[item(1, i64::MAX / 2, 1), item(2, i64::MAX / 2, 1), item(3, 2, 1)]),
      Err(StorefrontError::Validation(_))
    ));
  }

  #[test]
  fn cart_item_serializes_product_id_in_camel_case() {
    let json = serde_json::to_value(item(7, 1, 500)).unwrap();
    assert_eq!(json["productId"], 7);
    assert!(json.get("product_id").is_none());
  }
}
