// app/src/main.rs

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use storefront_server::config::{AppConfig, LogFormat};
use storefront_server::{prepare_state, web::configure_app_routes};

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);
  match format {
    LogFormat::Pretty => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  init_tracing(app_config.log_format);

  tracing::info!("Starting storefront server...");

  let app_state = prepare_state(&app_config)
    .await
    .context("Failed to prepare the store")?;
  let store = app_state.store.clone();

  let server_address = app_config.bind_address();
  tracing::info!("Binding server to {}...", server_address);

  let server = HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run();

  let result = server.await.context("Server terminated abnormally");
  store.close().await;
  tracing::info!("Storefront server stopped.");
  result
}
