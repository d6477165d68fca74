// src/main.rs
use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use telecom_billing_engine::api;
use telecom_billing_engine::config::Config;
use telecom_billing_engine::services::CallSimulator;
use telecom_billing_engine::storage::{JsonFileStorage, Storage};
use telecom_billing_engine::BillingEngine;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .json()
        .init();

    info!("🚀 Starting Telecom Billing Engine");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Environment: {}", config.environment);
    info!("Data directory: {}", config.data_dir.display());

    let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::new(config.data_dir.clone()));

    let engine = BillingEngine::bootstrap(storage.clone(), config.recompute_interval).await;

    engine.scheduler.clone().spawn();
    info!("✅ Ledger recompute scheduler started");

    if config.simulator.enabled {
        let simulator = Arc::new(CallSimulator::new(
            storage.clone(),
            engine.catalog.clone(),
            config.simulator.clone(),
        ));
        simulator.spawn();
        info!("✅ Call simulator started");
    } else {
        info!("⚠️  Call simulator disabled");
    }

    // HTTP Server
    let bind_address = format!("{}:{}", config.host, config.port);
    info!("🌐 Starting HTTP server on {}", bind_address);

    let query_service = engine.query.clone();
    let scheduler = engine.scheduler.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(web::Data::new(query_service.clone()))
            .app_data(web::Data::new(scheduler.clone()))
            .configure(api::routes::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
