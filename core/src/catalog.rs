// core/src/catalog.rs

use tracing::{debug, instrument};

use crate::error::StorefrontResult;
use crate::models::Product;
use crate::store::{products, Store};

/// Read-only view of the product catalog. No mutation path is exposed beyond
/// first-run seeding.
#[derive(Debug, Clone)]
pub struct Catalog {
  store: Store,
}

impl Catalog {
  pub fn new(store: Store) -> Self {
    Self { store }
  }

  /// All products ordered by id, so repeated calls return the same sequence.
  #[instrument(name = "catalog::list_products", skip(self))]
  pub async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
    let mut conn = self.store.pool().acquire().await?;
    let products = products::list(&mut conn).await?;
    debug!(count = products.len(), "Listed catalog products.");
    Ok(products)
  }

  #[instrument(name = "catalog::get_product", skip(self))]
  pub async fn get_product(&self, product_id: i64) -> StorefrontResult<Option<Product>> {
    let mut conn = self.store.pool().acquire().await?;
    Ok(products::get(&mut conn, product_id).await?)
  }
}
