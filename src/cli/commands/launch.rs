use super::{load_config, print_json};
use crate::errors::AppResult;
use crate::frame::TransactionDescriptor;
use crate::server::AppState;
use crate::types::CastIdentifier;
use crate::workflow::LaunchOutcome;
use clap::Args;
use serde_json::json;
use std::path::Path;

/// Build the signed launch transaction for a cast without sending it
#[derive(Args)]
pub struct BuildLaunchCommand {
    /// Cast hash or URL
    pub cast: String,
}

impl BuildLaunchCommand {
    pub async fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let config = load_config(config_path)?;
        config.validate()?;

        let state = AppState::from_config(&config)?;
        let outcome = state
            .workflow
            .build_launch(CastIdentifier::new(self.cast.clone()))
            .await?;

        match &outcome {
            LaunchOutcome::TransactionReady(tx) => print_json(&json!({
                "stage": outcome.stage(),
                "transaction": TransactionDescriptor::from_launch(tx),
                "args": tx.args,
                "message_hash": tx.message_hash,
            })),
            LaunchOutcome::AuthorizationFailed(rejection) => print_json(&json!({
                "stage": outcome.stage(),
                "rejection": rejection,
                "error": rejection.to_string(),
            })),
        }
    }
}
