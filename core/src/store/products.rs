// core/src/store/products.rs

use sqlx::SqliteConnection;

use crate::models::product::{NewProduct, Product};

pub async fn count(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
  sqlx::query_scalar("SELECT COUNT(*) FROM products")
    .fetch_one(conn)
    .await
}

pub async fn list(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Product>> {
  sqlx::query_as("SELECT id, name, price, description, image FROM products ORDER BY id ASC")
    .fetch_all(conn)
    .await
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Product>> {
  sqlx::query_as("SELECT id, name, price, description, image FROM products WHERE id = ?")
    .bind(id)
    .fetch_optional(conn)
    .await
}

/// Inserts one catalog row and returns its id. A `None` id lets SQLite assign one.
pub async fn insert(conn: &mut SqliteConnection, product: &NewProduct) -> sqlx::Result<i64> {
  let result = sqlx::query("INSERT INTO products (id, name, price, description, image) VALUES (?, ?, ?, ?, ?)")
    .bind(product.id)
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(&product.image)
    .execute(conn)
    .await?;
  Ok(result.last_insert_rowid())
}
