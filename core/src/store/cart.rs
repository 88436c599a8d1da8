// core/src/store/cart.rs

use sqlx::SqliteConnection;

use crate::models::cart_line::{CartItem, CartLine};

pub async fn find_by_product(conn: &mut SqliteConnection, product_id: i64) -> sqlx::Result<Option<CartLine>> {
  sqlx::query_as("SELECT id, product_id, quantity FROM cart WHERE product_id = ?")
    .bind(product_id)
    .fetch_optional(conn)
    .await
}

pub async fn find(conn: &mut SqliteConnection, line_id: i64) -> sqlx::Result<Option<CartLine>> {
  sqlx::query_as("SELECT id, product_id, quantity FROM cart WHERE id = ?")
    .bind(line_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert(conn: &mut SqliteConnection, product_id: i64, quantity: i64) -> sqlx::Result<i64> {
  let result = sqlx::query("INSERT INTO cart (product_id, quantity) VALUES (?, ?)")
    .bind(product_id)
    .bind(quantity)
    .execute(conn)
    .await?;
  Ok(result.last_insert_rowid())
}

pub async fn set_quantity(conn: &mut SqliteConnection, line_id: i64, quantity: i64) -> sqlx::Result<u64> {
  let result = sqlx::query("UPDATE cart SET quantity = ? WHERE id = ?")
    .bind(quantity)
    .bind(line_id)
    .execute(conn)
    .await?;
  Ok(result.rows_affected())
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete(conn: &mut SqliteConnection, line_id: i64) -> sqlx::Result<u64> {
  let result = sqlx::query("DELETE FROM cart WHERE id = ?")
    .bind(line_id)
    .execute(conn)
    .await?;
  Ok(result.rows_affected())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> sqlx::Result<u64> {
  let result = sqlx::query("DELETE FROM cart").execute(conn).await?;
  Ok(result.rows_affected())
}

/// Every cart line joined with its product, in insertion order.
pub async fn list_items(conn: &mut SqliteConnection) -> sqlx::Result<Vec<CartItem>> {
  sqlx::query_as(
    r#"
    SELECT
      c.id,
      c.quantity,
      p.id AS product_id,
      p.name,
      p.price,
      p.image
    FROM cart c
    JOIN products p ON c.product_id = p.id
    ORDER BY c.id ASC
    "#,
  )
  .fetch_all(conn)
  .await
}
