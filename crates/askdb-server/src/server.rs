//! HTTP server bootstrap.

use crate::routes;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use askdb_core::engine::QueryPipeline;
use std::sync::Arc;

/// Start the HTTP server and serve until shutdown. The pipeline is the
/// only shared state; each worker holds an `Arc` to it.
pub async fn run(port: u16, pipeline: Arc<QueryPipeline>) -> Result<()> {
    let bind_addr = format!("0.0.0.0:{}", port);
    tracing::info!(event = "http_listen", addr = %bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pipeline.clone()))
            .configure(routes::configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
