//! VaultView - search an archived mailbox from the terminal
//!
//! This is the main entry point for the VaultView client.

use std::sync::Arc;

use anyhow::Result;
use log::{error, info, warn};
use vault::{ArchiveApi, ArchiveClient, ClientSettings};

mod app;
mod demo;
mod input;
mod views;

use app::VaultApp;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let demo_mode = std::env::args().skip(1).any(|arg| arg == "--demo");

    let (api, downloader): (Arc<dyn ArchiveApi>, Option<Arc<ArchiveClient>>) = if demo_mode {
        info!("Running against the built-in demo archive");
        let api: Arc<dyn ArchiveApi> = Arc::new(demo::archive());
        (api, None)
    } else {
        // Load server settings from config file or environment
        let settings = match ClientSettings::load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Invalid client settings, using defaults: {:#}", e);
                if let Some(path) = ClientSettings::default_settings_path() {
                    warn!(
                        "To configure the archive server, either:\n\
                         1. Write {{\"server_url\": \"...\"}} to: {}\n\
                         2. Or set environment variables: MAILVAULT_SERVER_URL and MAILVAULT_TIMEOUT_SECS",
                        path.display()
                    );
                }
                ClientSettings::default()
            }
        };

        let client = Arc::new(ArchiveClient::from_settings(&settings)?);
        info!("Using archive server at {}", client.base_url());
        let api: Arc<dyn ArchiveApi> = client.clone();
        (api, Some(client))
    };

    VaultApp::new(api, downloader).run().await
}
