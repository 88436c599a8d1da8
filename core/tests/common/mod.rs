// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicUsize, Ordering};
use storefront::{seed_catalog, FeedProduct, ProductFeed, SeedOutcome, Store, StorefrontResult};
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// A deterministic feed: ids 1..=3 with known prices.
#[derive(Debug, Default)]
pub struct FixedFeed {
  pub calls: AtomicUsize,
}

impl FixedFeed {
  pub fn entries() -> Vec<FeedProduct> {
    vec![
      feed_product(1, "Fjallraven Backpack", 109.95),
      feed_product(2, "Slim Fit T-Shirt", 22.3),
      feed_product(3, "Cotton Jacket", 55.99),
    ]
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ProductFeed for FixedFeed {
  async fn fetch_products(&self) -> StorefrontResult<Vec<FeedProduct>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(Self::entries())
  }

  fn name(&self) -> &str {
    "fixed"
  }
}

pub fn feed_product(id: i64, title: &str, price: f64) -> FeedProduct {
  FeedProduct {
    id: Some(id),
    title: title.to_string(),
    price,
    description: Some(format!("{title} description")),
    image: Some(format!("https://img.example.com/{id}.jpg")),
  }
}

pub const BACKPACK_ID: i64 = 1;
pub const BACKPACK_PRICE: i64 = 10995;
pub const SHIRT_ID: i64 = 2;
pub const SHIRT_PRICE: i64 = 2230;
pub const JACKET_ID: i64 = 3;
pub const JACKET_PRICE: i64 = 5599;

/// Fresh in-memory store with the schema applied and nothing seeded.
pub async fn empty_store() -> Store {
  setup_tracing();
  let store = Store::connect("sqlite::memory:", 1).await.unwrap();
  store.migrate().await.unwrap();
  store
}

/// Fresh in-memory store seeded from [`FixedFeed`].
pub async fn seeded_store() -> Store {
  let store = empty_store().await;
  let outcome = seed_catalog(&store, &FixedFeed::default()).await.unwrap();
  assert_eq!(outcome, SeedOutcome::Seeded(3));
  store
}
