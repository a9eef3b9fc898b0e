use super::load_config;
use crate::errors::AppResult;
use crate::server::{start_server, AppState};
use clap::Args;
use std::path::Path;
use tracing::info;

/// Run the HTTP service
#[derive(Args)]
pub struct ServeCommand {
    /// Listen address (overrides server.bind_address)
    #[arg(long)]
    pub bind: Option<String>,

    /// Public origin used in frame targets and reply embeds
    #[arg(long)]
    pub public_url: Option<String>,
}

impl ServeCommand {
    pub async fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let mut config = load_config(config_path)?;
        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if let Some(public_url) = &self.public_url {
            config.server.public_url = public_url.clone();
        }
        config.validate()?;

        info!("=== Cast launcher ===");
        info!("Public URL: {}", config.server.public_url);

        let state = AppState::from_config(&config)?;
        start_server(state, &config.server.bind_address).await
    }
}
