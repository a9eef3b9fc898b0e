use super::{load_config, print_json};
use crate::auth::AddressAuthorizer;
use crate::errors::AppResult;
use clap::Args;
use serde_json::json;
use std::path::Path;

/// Sign an address list the way launch transactions do
#[derive(Args)]
pub struct SignAddressesCommand {
    /// Addresses, in the order the contract will receive them
    #[arg(required = true)]
    pub addresses: Vec<String>,

    /// Hex private key (overrides signing.private_key / DEPLOYER_KEY)
    #[arg(long)]
    pub private_key: Option<String>,
}

impl SignAddressesCommand {
    pub fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let key = match &self.private_key {
            Some(key) => key.clone(),
            None => load_config(config_path)?.signing.private_key,
        };

        let authorizer = AddressAuthorizer::from_private_key(&key)?;
        let proof = authorizer.authorize_strings(&self.addresses)?;

        print_json(&json!({
            "signer": authorizer.signer_address(),
            "addresses": self.addresses,
            "message_hash": proof.message_hash,
            "signature": proof.signature,
        }))
    }
}
