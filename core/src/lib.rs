// core/src/lib.rs

//! Storefront: product catalog, cart and checkout over a SQLite store.
//!
//! The crate is organised leaves first:
//!  - [`store`] owns the connection pool, the schema and the cart write gate.
//!  - [`catalog`] reads products; [`seed`] fills an empty catalog from a feed.
//!  - [`cart`] merges adds, removes lines that drop to zero and totals the cart.
//!  - [`checkout`] turns the cart into a [`Receipt`] and empties it atomically.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod models;
pub mod seed;
pub mod store;

pub use crate::cart::{AddOutcome, CartService, QuantityUpdate};
pub use crate::catalog::Catalog;
pub use crate::checkout::CheckoutService;
pub use crate::error::{StorefrontError, StorefrontResult};
pub use crate::models::{CartItem, CartLine, CartSnapshot, Product, Receipt};
pub use crate::seed::{seed_catalog, FeedProduct, MockFeed, ProductFeed, RemoteFeed, SeedOutcome};
pub use crate::store::Store;
