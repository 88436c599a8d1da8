// tests/cart_service_tests.rs
mod common;
use common::*;
use storefront::{CartService, QuantityUpdate, StorefrontError};

#[tokio::test]
async fn test_first_add_creates_a_line() {
  let cart = CartService::new(seeded_store().await);

  let outcome = cart.add_to_cart(BACKPACK_ID, 2).await.unwrap();
  assert!(outcome.created);
  assert_eq!(outcome.quantity, 2);

  let snapshot = cart.get_cart().await.unwrap();
  assert_eq!(snapshot.items.len(), 1);
  let item = &snapshot.items[0];
  assert_eq!(item.id, outcome.line_id);
  assert_eq!(item.product_id, BACKPACK_ID);
  assert_eq!(item.name, "Fjallraven Backpack");
  assert_eq!(item.price, BACKPACK_PRICE);
  assert_eq!(item.image, "https://img.example.com/1.jpg");
}

#[tokio::test]
async fn test_repeat_add_merges_into_one_line() {
  let cart = CartService::new(seeded_store().await);

  for (first, second) in [(1, 1), (2, 5), (7, 3)] {
    let a = cart.add_to_cart(SHIRT_ID, first).await.unwrap();
    let b = cart.add_to_cart(SHIRT_ID, second).await.unwrap();
    assert!(!b.created);
    assert_eq!(a.line_id, b.line_id);

    let snapshot = cart.get_cart().await.unwrap();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].quantity, first + second);

    cart.remove_from_cart(a.line_id).await.unwrap();
  }
}

#[tokio::test]
async fn test_add_rejects_invalid_input() {
  let cart = CartService::new(seeded_store().await);

  for (product_id, quantity) in [(BACKPACK_ID, 0), (BACKPACK_ID, -3), (0, 1), (-1, 1)] {
    let err = cart.add_to_cart(product_id, quantity).await.unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)), "got {err:?}");
  }
  assert!(cart.get_cart().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_rejects_unknown_product() {
  let cart = CartService::new(seeded_store().await);
  let err = cart.add_to_cart(999, 1).await.unwrap_err();
  assert!(matches!(err, StorefrontError::Validation(_)));
  assert!(cart.get_cart().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_increments_and_decrements_in_place() {
  let cart = CartService::new(seeded_store().await);
  let line = cart.add_to_cart(JACKET_ID, 2).await.unwrap().line_id;

  assert_eq!(
    cart.update_quantity(line, 3).await.unwrap(),
    QuantityUpdate::Updated { quantity: 5 }
  );
  assert_eq!(
    cart.update_quantity(line, -4).await.unwrap(),
    QuantityUpdate::Updated { quantity: 1 }
  );
  assert_eq!(cart.get_cart().await.unwrap().items[0].quantity, 1);
}

#[tokio::test]
async fn test_update_to_zero_or_below_removes_the_line() {
  let cart = CartService::new(seeded_store().await);

  for delta in [-2, -3, -100, i64::MIN] {
    let line = cart.add_to_cart(BACKPACK_ID, 2).await.unwrap().line_id;
    assert_eq!(cart.update_quantity(line, delta).await.unwrap(), QuantityUpdate::Removed);
    assert!(cart.get_cart().await.unwrap().is_empty(), "delta {delta} left the line behind");
  }
}

#[tokio::test]
async fn test_update_validates_delta_and_line() {
  let cart = CartService::new(seeded_store().await);
  let line = cart.add_to_cart(BACKPACK_ID, 1).await.unwrap().line_id;

  assert!(matches!(
    cart.update_quantity(line, 0).await.unwrap_err(),
    StorefrontError::Validation(_)
  ));
  assert!(matches!(
    cart.update_quantity(line + 100, 1).await.unwrap_err(),
    StorefrontError::NotFound { line_id } if line_id == line + 100
  ));
  assert!(matches!(
    cart.update_quantity(line, i64::MAX).await.unwrap_err(),
    StorefrontError::Validation(_)
  ));
  assert_eq!(cart.get_cart().await.unwrap().items[0].quantity, 1);
}

#[tokio::test]
async fn test_remove_deletes_or_reports_not_found() {
  let cart = CartService::new(seeded_store().await);
  let line = cart.add_to_cart(SHIRT_ID, 4).await.unwrap().line_id;

  cart.remove_from_cart(line).await.unwrap();
  assert!(cart.get_cart().await.unwrap().is_empty());

  assert!(matches!(
    cart.remove_from_cart(line).await.unwrap_err(),
    StorefrontError::NotFound { .. }
  ));
}

#[tokio::test]
async fn test_total_tracks_cart_contents() {
  let cart = CartService::new(seeded_store().await);

  let backpack = cart.add_to_cart(BACKPACK_ID, 2).await.unwrap().line_id;
  cart.add_to_cart(SHIRT_ID, 3).await.unwrap();
  cart.add_to_cart(JACKET_ID, 1).await.unwrap();

  let snapshot = cart.get_cart().await.unwrap();
  let expected: i64 = snapshot.items.iter().map(|i| i.quantity * i.price).sum();
  assert_eq!(snapshot.total, expected);
  assert_eq!(snapshot.total, 2 * BACKPACK_PRICE + 3 * SHIRT_PRICE + JACKET_PRICE);

  cart.update_quantity(backpack, -1).await.unwrap();
  assert_eq!(
    cart.get_cart().await.unwrap().total,
    BACKPACK_PRICE + 3 * SHIRT_PRICE + JACKET_PRICE
  );
}

#[tokio::test]
async fn test_lines_are_returned_in_insertion_order() {
  let cart = CartService::new(seeded_store().await);
  cart.add_to_cart(JACKET_ID, 1).await.unwrap();
  cart.add_to_cart(BACKPACK_ID, 1).await.unwrap();
  cart.add_to_cart(SHIRT_ID, 1).await.unwrap();

  let order: Vec<i64> = cart.get_cart().await.unwrap().items.iter().map(|i| i.product_id).collect();
  assert_eq!(order, vec![JACKET_ID, BACKPACK_ID, SHIRT_ID]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_do_not_lose_increments() {
  let store = seeded_store().await;
  let cart = CartService::new(store);
  let line = cart.add_to_cart(BACKPACK_ID, 1).await.unwrap().line_id;

  let tasks: Vec<_> = (0..20)
    .map(|_| {
      let cart = cart.clone();
      tokio::spawn(async move { cart.update_quantity(line, 1).await })
    })
    .collect();
  for task in tasks {
    task.await.unwrap().unwrap();
  }

  assert_eq!(cart.get_cart().await.unwrap().items[0].quantity, 21);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_adds_merge_into_one_line() {
  let cart = CartService::new(seeded_store().await);

  let tasks: Vec<_> = (0..10)
    .map(|_| {
      let cart = cart.clone();
      tokio::spawn(async move { cart.add_to_cart(SHIRT_ID, 2).await })
    })
    .collect();
  let mut created = 0;
  for task in tasks {
    if task.await.unwrap().unwrap().created {
      created += 1;
    }
  }

  assert_eq!(created, 1);
  let snapshot = cart.get_cart().await.unwrap();
  assert_eq!(snapshot.items.len(), 1);
  assert_eq!(snapshot.items[0].quantity, 20);
}

#[tokio::test]
async fn test_add_rejects_quantity_whose_line_total_overflows() {
  let cart = CartService::new(seeded_store().await);

  let err = cart.add_to_cart(BACKPACK_ID, i64::MAX / 1000).await.unwrap_err();
  assert!(matches!(err, StorefrontError::Validation(_)), "got {err:?}");

  let snapshot = cart.get_cart().await.unwrap();
  assert!(snapshot.is_empty());
  assert_eq!(snapshot.total, 0);
}

#[tokio::test]
async fn test_add_rejects_quantity_whose_cart_total_overflows() {
  let cart = CartService::new(seeded_store().await);
  let fits = i64::MAX / BACKPACK_PRICE;
  cart.add_to_cart(BACKPACK_ID, fits).await.unwrap();

  // Each line fits on its own, the sum does not.
  let err = cart.add_to_cart(SHIRT_ID, i64::MAX / SHIRT_PRICE).await.unwrap_err();
  assert!(matches!(err, StorefrontError::Validation(_)), "got {err:?}");

  let snapshot = cart.get_cart().await.unwrap();
  assert_eq!(snapshot.items.len(), 1);
  assert_eq!(snapshot.total, fits * BACKPACK_PRICE);
}

#[tokio::test]
async fn test_merge_and_update_reject_overflowing_totals() {
  let cart = CartService::new(seeded_store().await);
  let half = i64::MAX / BACKPACK_PRICE / 2 + 1;
  let line = cart.add_to_cart(BACKPACK_ID, half).await.unwrap().line_id;

  assert!(matches!(
    cart.add_to_cart(BACKPACK_ID, half).await.unwrap_err(),
    StorefrontError::Validation(_)
  ));
  assert!(matches!(
    cart.update_quantity(line, half).await.unwrap_err(),
    StorefrontError::Validation(_)
  ));

  let snapshot = cart.get_cart().await.unwrap();
  assert_eq!(snapshot.items[0].quantity, half);
  assert_eq!(snapshot.total, half * BACKPACK_PRICE);

  // Decrements stay allowed.
  assert_eq!(
    cart.update_quantity(line, -1).await.unwrap(),
    QuantityUpdate::Updated { quantity: half - 1 }
  );
}
