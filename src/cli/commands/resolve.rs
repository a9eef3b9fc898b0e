use super::{load_config, print_json};
use crate::chain::{lookup_token, RegistryClient};
use crate::errors::AppResult;
use crate::social::{CastSource, NeynarClient};
use crate::ticker::extract_ticker;
use crate::types::{Cast, CastIdentifier, TokenRecord};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Look a cast up on chain and on the social graph
#[derive(Args)]
pub struct ResolveCommand {
    /// Cast hash or URL (defaults to launch.default_cast)
    pub cast: Option<String>,
}

#[derive(Serialize)]
struct Resolution {
    cast_identifier: CastIdentifier,
    token: Option<TokenRecord>,
    cast: Option<Cast>,
    ticker: Option<String>,
}

impl ResolveCommand {
    pub async fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let config = load_config(config_path)?;
        let cast_id = CastIdentifier::new(
            self.cast
                .clone()
                .unwrap_or_else(|| config.launch.default_cast.clone()),
        );

        let registry = RegistryClient::new(&config.chain)?;
        let token = lookup_token(&registry, &cast_id).await?;

        // A launched token is all the frame needs; skip the social lookup
        let cast = match &token {
            Some(token) => {
                info!("{} already launched as ${}", cast_id, token.symbol);
                None
            }
            None => Some(NeynarClient::new(&config.social)?.resolve(&cast_id).await?),
        };

        print_json(&Resolution {
            ticker: cast.as_ref().and_then(|c| extract_ticker(&c.author_text)),
            cast_identifier: cast_id,
            token,
            cast,
        })
    }
}
