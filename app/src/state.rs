// app/src/state.rs
use storefront::{CartService, Catalog, CheckoutService, Store};

/// Shared by every handler through `web::Data`. All services share one store handle.
#[derive(Clone)]
pub struct AppState {
  pub store: Store,
  pub catalog: Catalog,
  pub cart: CartService,
  pub checkout: CheckoutService,
}

impl AppState {
  pub fn new(store: Store) -> Self {
    Self {
      catalog: Catalog::new(store.clone()),
      cart: CartService::new(store.clone()),
      checkout: CheckoutService::new(store.clone()),
      store,
    }
  }
}
