//! Contacts Pipeline - Main entry point
//!
//! Loads the configured contacts file, merges it, and serves the contact list
//! over stdin/stdout as JSON lines.

use anyhow::Result;
use contacts_pipeline::repositories::{ContactRepository, ContactSourceRepository};
use contacts_pipeline::services::{ContactListService, ContactListServiceImpl};
use contacts_pipeline::{Config, ContactMerger, JsonContactStore, MetricsTracker};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr only, stdout carries the JSON lines)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string()))
        })
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        contacts_file = %config.contacts_file.display(),
        default_sort = %config.default_sort_policy,
        merge_keys = %config.merge_policy,
        log_level = %config.log_level,
        "Starting contacts pipeline"
    );

    let store = Arc::new(JsonContactStore::open(&config.contacts_file).await?);
    if let Some(origin) = store.origin() {
        info!(path = %origin.display(), "Contacts file opened");
    }
    let source_repo = store.clone() as Arc<dyn ContactSourceRepository>;
    let contact_repo = store as Arc<dyn ContactRepository>;

    let metrics = MetricsTracker::new();
    let service = Arc::new(ContactListServiceImpl::new(
        source_repo,
        contact_repo,
        ContactMerger::new(config.merge_policy.clone()),
        config.default_sort_policy,
        metrics.clone(),
    ));

    if let Err(e) = service.init_load().await {
        error!("Failed to load contacts: {}", e);
        return Err(e.into());
    }

    // Run the server (this will block until stdin is closed)
    contacts_pipeline::server::run_server(service).await?;

    info!("{}", metrics.summary());
    info!("Contacts pipeline shutdown complete");
    Ok(())
}
