// app/src/lib.rs

//! HTTP surface for the storefront: configuration, error mapping, routes, and
//! a typed client that mirrors server-side cart state.

pub mod client;
pub mod config;
pub mod errors;
pub mod state;
pub mod web;

use storefront::{seed_catalog, MockFeed, ProductFeed, RemoteFeed, SeedOutcome, Store};
use tracing::info;

use crate::config::{AppConfig, FeedSource};
use crate::errors::Result;
use crate::state::AppState;

/// Opens the store, applies the schema and seeds the catalog if configured.
pub async fn prepare_state(config: &AppConfig) -> Result<AppState> {
  let store = Store::connect(&config.database_url, config.database_max_connections).await?;
  store.migrate().await?;

  if config.seed_db {
    let feed: Box<dyn ProductFeed> = match &config.product_feed {
      FeedSource::Mock => Box::new(MockFeed),
      FeedSource::Remote(url) => Box::new(RemoteFeed::new(url.clone())),
    };
    match seed_catalog(&store, feed.as_ref()).await? {
      SeedOutcome::Seeded(count) => info!("Seeded {} products from feed '{}'.", count, feed.name()),
      SeedOutcome::AlreadyPopulated => info!("Catalog already populated; seeding skipped."),
    }
  }

  Ok(AppState::new(store))
}
