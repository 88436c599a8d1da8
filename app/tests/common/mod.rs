// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a subset of these helpers

use actix_web::{dev::ServerHandle, web, App, HttpServer};
use once_cell::sync::Lazy;
use std::net::SocketAddr;
use storefront::models::product::NewProduct;
use storefront::store::products;
use storefront::Store;
use storefront_server::state::AppState;
use storefront_server::web::configure_app_routes;
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

pub const BACKPACK_ID: i64 = 1;
pub const BACKPACK_PRICE: i64 = 10995;
pub const MUG_ID: i64 = 2;
pub const MUG_PRICE: i64 = 10200;

/// In-memory store holding two products: the backpack (10995) and a mug (10200).
pub async fn test_state() -> AppState {
  setup_tracing();
  let store = Store::connect("sqlite::memory:", 1).await.unwrap();
  store.migrate().await.unwrap();

  let mut conn = store.pool().acquire().await.unwrap();
  for (id, name, price) in [(BACKPACK_ID, "Fjallraven Backpack", BACKPACK_PRICE), (MUG_ID, "Coffee Mug", MUG_PRICE)] {
    let product = NewProduct {
      id: Some(id),
      name: name.to_string(),
      price,
      description: format!("{name} description"),
      image: format!("https://img.example.com/{id}.jpg"),
    };
    products::insert(&mut conn, &product).await.unwrap();
  }
  drop(conn);

  AppState::new(store)
}

/// Runs the full route configuration on an ephemeral port.
pub fn spawn_server(state: AppState) -> (SocketAddr, ServerHandle) {
  let server = HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(state.clone()))
      .configure(configure_app_routes)
  })
  .workers(2)
  .bind(("127.0.0.1", 0))
  .unwrap();
  let addr = server.addrs()[0];
  let server = server.run();
  let handle = server.handle();
  actix_web::rt::spawn(server);
  (addr, handle)
}
