// app/src/client.rs

//! Client-side mirror of the catalog and cart.
//!
//! [`StorefrontClient`] speaks the REST API; [`ClientState`] keeps a local copy
//! of products, cart lines, total and the last receipt, and re-fetches the
//! cart after every mutation so it never drifts from the server.

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use storefront::{CartItem, CartSnapshot, Product, Receipt};
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("HTTP transport error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("API returned {status}: {message}")]
  Api { status: StatusCode, message: String },
}

impl ClientError {
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      ClientError::Http(e) => e.status(),
      ClientError::Api { status, .. } => Some(*status),
    }
  }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Body of the add-to-cart and cart mutation responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MutationResponse {
  pub message: String,
  #[serde(default)]
  pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Typed wrapper over the `/api` endpoints.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
  http: reqwest::Client,
  base_url: String,
}

impl StorefrontClient {
  /// `base_url` is the server root, e.g. `http://127.0.0.1:5000`.
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_client(reqwest::Client::new(), base_url)
  }

  pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self { http, base_url }
  }

  pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
    self.send(Method::GET, "/api/products", None).await
  }

  pub async fn get_cart(&self) -> ClientResult<CartSnapshot> {
    self.send(Method::GET, "/api/cart", None).await
  }

  pub async fn add_to_cart(&self, product_id: i64, quantity: i64) -> ClientResult<MutationResponse> {
    let body = json!({ "productId": product_id, "quantity": quantity });
    self.send(Method::POST, "/api/cart", Some(body)).await
  }

  pub async fn update_quantity(&self, line_id: i64, change: i64) -> ClientResult<MutationResponse> {
    let path = format!("/api/cart/update/{}", line_id);
    self.send(Method::PATCH, &path, Some(json!({ "change": change }))).await
  }

  pub async fn remove_from_cart(&self, line_id: i64) -> ClientResult<MutationResponse> {
    let path = format!("/api/cart/{}", line_id);
    self.send(Method::DELETE, &path, None).await
  }

  pub async fn checkout(&self) -> ClientResult<Receipt> {
    self.send(Method::POST, "/api/checkout", None).await
  }

  async fn send<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
  ) -> ClientResult<T> {
    let url = format!("{}{}", self.base_url, path);
    let mut request = self.http.request(method.clone(), &url);
    if let Some(body) = body {
      request = request.json(&body);
    }
    let response = request.send().await?;
    let status = response.status();
    debug!(%method, %url, %status, "API call finished.");

    if status.is_success() {
      return Ok(response.json::<T>().await?);
    }
    let message = match response.json::<ErrorBody>().await {
      Ok(body) => body.error,
      Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(ClientError::Api { status, message })
  }
}

/// Local mirror of server state, refreshed after every mutation.
#[derive(Debug, Clone)]
pub struct ClientState {
  client: StorefrontClient,
  pub products: Vec<Product>,
  pub cart_items: Vec<CartItem>,
  pub cart_total: i64,
  pub receipt: Option<Receipt>,
  pub error: Option<String>,
}

impl ClientState {
  pub fn new(client: StorefrontClient) -> Self {
    Self {
      client,
      products: Vec::new(),
      cart_items: Vec::new(),
      cart_total: 0,
      receipt: None,
      error: None,
    }
  }

  /// Initial load: products first, then the cart.
  #[instrument(name = "client::load", skip(self))]
  pub async fn load(&mut self) -> ClientResult<()> {
    let products = self.client.list_products().await;
    self.products = self.record(products, "Failed to fetch the products")?;
    self.refresh_cart().await
  }

  #[instrument(name = "client::refresh_cart", skip(self))]
  pub async fn refresh_cart(&mut self) -> ClientResult<()> {
    let snapshot = self.client.get_cart().await;
    let snapshot = self.record(snapshot, "Failed to fetch cart")?;
    self.cart_items = snapshot.items;
    self.cart_total = snapshot.total;
    Ok(())
  }

  #[instrument(name = "client::add_to_cart", skip(self))]
  pub async fn add_to_cart(&mut self, product_id: i64, quantity: i64) -> ClientResult<MutationResponse> {
    let result = self.client.add_to_cart(product_id, quantity).await;
    let response = self.record(result, "Failed to add item to the cart")?;
    self.refresh_cart().await?;
    Ok(response)
  }

  #[instrument(name = "client::update_quantity", skip(self))]
  pub async fn update_quantity(&mut self, line_id: i64, change: i64) -> ClientResult<MutationResponse> {
    let result = self.client.update_quantity(line_id, change).await;
    let response = self.record(result, "Failed to update quantity")?;
    self.refresh_cart().await?;
    Ok(response)
  }

  #[instrument(name = "client::remove_from_cart", skip(self))]
  pub async fn remove_from_cart(&mut self, line_id: i64) -> ClientResult<MutationResponse> {
    let result = self.client.remove_from_cart(line_id).await;
    let response = self.record(result, "Failed to remove from cart")?;
    self.refresh_cart().await?;
    Ok(response)
  }

  /// Checks out, keeps the receipt and re-fetches the (now empty) cart.
  #[instrument(name = "client::checkout", skip(self))]
  pub async fn checkout(&mut self) -> ClientResult<Receipt> {
    let result = self.client.checkout().await;
    let receipt = self.record(result, "Checkout failed")?;
    self.receipt = Some(receipt.clone());
    self.refresh_cart().await?;
    Ok(receipt)
  }

  pub fn clear_receipt(&mut self) {
    self.receipt = None;
  }

  pub fn cart_count(&self) -> i64 {
    self.cart_items.iter().map(|item| item.quantity).sum()
  }

  fn record<T>(&mut self, result: ClientResult<T>, context: &str) -> ClientResult<T> {
    match result {
      Ok(value) => {
        self.error = None;
        Ok(value)
      }
      Err(e) => {
        warn!(error = %e, "{}", context);
        self.error = Some(format!("{}: {}", context, e));
        Err(e)
      }
    }
  }
}
