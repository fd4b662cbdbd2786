//! Server mode
//!
//! Configures and starts the HTTP server with the tracking, metrics and
//! dashboard routes.

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

use crate::api::services::{dashboard_routes, metrics_routes, tracking_routes};
use crate::config::get_config;
use crate::storage::SeaOrmStorage;

/// Run the HTTP server
///
/// Initializes storage (running migrations), then serves until the
/// process is stopped.
///
/// **Note**: Configuration and logging must be initialized before calling
/// this function.
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let storage = Arc::new(SeaOrmStorage::from_url(&config.database.database_url).await?);

    let cpu_count = config.server.cpu_count.min(32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        // Pixel and engagement requests arrive from mail clients and
        // arbitrary page origins; CORS stays wide open.
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .service(metrics_routes())
            .service(dashboard_routes())
            .service(tracking_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count)
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
