// core/src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A purchasable item. Prices are integers in the minor currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub price: i64,
  pub description: String,
  pub image: String,
}

/// A catalog row that has not been assigned an id yet, or whose id comes from
/// the feed it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
  pub id: Option<i64>,
  pub name: String,
  pub price: i64,
  pub description: String,
  pub image: String,
}
