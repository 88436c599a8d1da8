// core/src/seed.rs

//! One-time catalog seeding from a product feed.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::product::NewProduct;
use crate::store::{products, Store};

pub const DEFAULT_FEED_URL: &str = "https://fakestoreapi.com/products";

/// One entry of an external product feed. Prices are decimal major-unit amounts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedProduct {
  #[serde(default)]
  pub id: Option<i64>,
  pub title: String,
  pub price: f64,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
}

impl FeedProduct {
  pub fn into_new_product(self) -> StorefrontResult<NewProduct> {
    Ok(NewProduct {
      id: self.id,
      price: normalize_price(self.price)?,
      name: self.title,
      description: self.description.unwrap_or_default(),
      image: self.image.unwrap_or_default(),
    })
  }
}

/// Source of catalog entries used when the catalog is empty.
#[async_trait]
pub trait ProductFeed: Send + Sync {
  async fn fetch_products(&self) -> StorefrontResult<Vec<FeedProduct>>;

  /// Short label used in logs.
  fn name(&self) -> &str;
}

/// Fetches a JSON array of products over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteFeed {
  client: reqwest::Client,
  url: String,
}

impl RemoteFeed {
  pub fn new(url: impl Into<String>) -> Self {
    Self::with_client(reqwest::Client::new(), url)
  }

  pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
    Self { client, url: url.into() }
  }
}

#[async_trait]
impl ProductFeed for RemoteFeed {
  #[instrument(name = "seed::remote_feed", skip(self), fields(url = %self.url))]
  async fn fetch_products(&self) -> StorefrontResult<Vec<FeedProduct>> {
    let feed = self
      .client
      .get(&self.url)
      .send()
      .await?
      .error_for_status()?
      .json::<Vec<FeedProduct>>()
      .await?;
    info!(count = feed.len(), "Fetched remote product feed.");
    Ok(feed)
  }

  fn name(&self) -> &str {
    &self.url
  }
}

/// Fixed list used when no remote feed is wanted.
#[derive(Debug, Clone, Default)]
pub struct MockFeed;

impl MockFeed {
  pub fn products() -> Vec<FeedProduct> {
    [
      ("Vintage T-Shirt", 2210.00),
      ("Noise-Cancelling Headphones", 12750.00),
      ("Coffee Mug", 102.00),
      ("Leather Notebook", 1700.00),
      ("Wireless Mouse", 3825.00),
    ]
    .into_iter()
    .map(|(title, price)| FeedProduct {
      id: None,
      title: title.to_string(),
      price,
      description: None,
      image: None,
    })
    .collect()
  }
}

#[async_trait]
impl ProductFeed for MockFeed {
  async fn fetch_products(&self) -> StorefrontResult<Vec<FeedProduct>> {
    Ok(Self::products())
  }

  fn name(&self) -> &str {
    "mock"
  }
}

/// Converts a decimal major-unit price into minor units, e.g. 109.95 -> 10995.
pub fn normalize_price(major: f64) -> StorefrontResult<i64> {
  if !major.is_finite() || major < 0.0 {
    return Err(StorefrontError::validation(format!("Invalid product price: {major}")));
  }
  let minor = (major * 100.0).round();
  if minor > i64::MAX as f64 {
    return Err(StorefrontError::validation(format!("Product price out of range: {major}")));
  }
  Ok(minor as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
  Seeded(usize),
  AlreadyPopulated,
}

/// Populates the catalog from `feed` if it is empty; a populated catalog is
/// left alone and the feed is not contacted.
#[instrument(name = "seed::seed_catalog", skip(store, feed), fields(feed = feed.name()))]
pub async fn seed_catalog(store: &Store, feed: &dyn ProductFeed) -> StorefrontResult<SeedOutcome> {
  let mut conn = store.pool().acquire().await?;
  if products::count(&mut conn).await? > 0 {
    info!("Products table already populated.");
    return Ok(SeedOutcome::AlreadyPopulated);
  }
  drop(conn);

  let entries = feed
    .fetch_products()
    .await?
    .into_iter()
    .map(FeedProduct::into_new_product)
    .collect::<StorefrontResult<Vec<_>>>()?;

  if entries.is_empty() {
    warn!("Product feed returned no entries; catalog stays empty.");
    return Ok(SeedOutcome::Seeded(0));
  }

  let mut tx = store.pool().begin().await?;
  for entry in &entries {
    products::insert(&mut tx, entry).await?;
  }
  tx.commit().await?;

  info!(count = entries.len(), "Seeded products into the catalog.");
  Ok(SeedOutcome::Seeded(entries.len()))
}
