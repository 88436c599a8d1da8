// core/src/store/mod.rs

//! SQLite persistence: pool lifecycle, schema bootstrap and the cart write gate.

pub mod cart;
pub mod products;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, instrument};

use crate::error::StorefrontResult;

const SCHEMA: &[&str] = &[
  r#"
  CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    image TEXT NOT NULL DEFAULT ''
  )
  "#,
  r#"
  CREATE TABLE IF NOT EXISTS cart (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    FOREIGN KEY (product_id) REFERENCES products(id)
  )
  "#,
  "CREATE UNIQUE INDEX IF NOT EXISTS cart_product_id_idx ON cart (product_id)",
];

/// Handle to the relational store, opened once at process start and passed to
/// every service.
///
/// Cloning is cheap: the pool and the cart gate are shared.
#[derive(Debug, Clone)]
pub struct Store {
  pool: SqlitePool,
  cart_gate: Arc<Mutex<()>>,
}

impl Store {
  #[instrument(name = "store::connect", skip(database_url))]
  pub async fn connect(database_url: &str, max_connections: u32) -> StorefrontResult<Self> {
    let options = SqliteConnectOptions::from_str(database_url)?
      .create_if_missing(true)
      .foreign_keys(true);

    // Each connection to an in-memory database gets its own private database,
    // so the pool must hold exactly one connection and never recycle it.
    let pool_options = if is_in_memory(database_url) {
      SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
    } else {
      SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;
    info!("Connected to the SQLite store.");
    Ok(Self::from_pool(pool))
  }

  pub fn from_pool(pool: SqlitePool) -> Self {
    Self {
      pool,
      cart_gate: Arc::new(Mutex::new(())),
    }
  }

  /// Creates the `products` and `cart` tables if they do not exist yet.
  #[instrument(name = "store::migrate", skip(self))]
  pub async fn migrate(&self) -> StorefrontResult<()> {
    let mut conn = self.pool.acquire().await?;
    for statement in SCHEMA {
      sqlx::query(statement).execute(&mut *conn).await?;
    }
    info!("Store schema is up to date.");
    Ok(())
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }

  /// Serialization point for every cart mutation and for checkout.
  ///
  /// Holders run their whole read-modify-write sequence, including the SQL
  /// transaction commit, before releasing the guard.
  pub async fn lock_cart(&self) -> MutexGuard<'_, ()> {
    self.cart_gate.lock().await
  }

  pub async fn close(&self) {
    self.pool.close().await;
    info!("Store connection pool closed.");
  }
}

fn is_in_memory(database_url: &str) -> bool {
  database_url.contains(":memory:") || database_url.contains("mode=memory")
}
