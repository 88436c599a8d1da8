// core/src/models/mod.rs

//! Data structures for catalog rows, cart lines and checkout receipts.

pub mod cart_line;
pub mod product;
pub mod receipt;

pub use cart_line::{CartItem, CartLine, CartSnapshot};
pub use product::Product;
pub use receipt::Receipt;
