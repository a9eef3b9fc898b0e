//! On-chain registry integration
//!
//! This module provides all chain-facing functionality:
//! - **Abi** - `sol!` bindings for the launcher registry and launched tokens
//! - **Client** - JSON-RPC `eth_call` client implementing [`TokenRegistry`]
//! - **Lookup** - the two-step cast → token metadata resolution
//!
//! Only read calls are made here. The `launch` transaction itself is signed
//! and sent by the user's wallet.

pub mod abi;
pub mod client;
pub mod lookup;

use crate::errors::ChainResult;
use crate::types::CastIdentifier;
use alloy::primitives::{Address, U256};
use async_trait::async_trait;

// Re-export main types
pub use client::RegistryClient;
pub use lookup::lookup_token;

/// Read access to the launcher registry and the tokens it deployed
#[async_trait]
pub trait TokenRegistry: Send + Sync {
    /// Address of the registry contract, the target of `launch`
    fn registry_address(&self) -> Address;

    /// Token mapped to a cast; `Address::ZERO` when none was launched yet
    async fn cast_token(&self, cast: &CastIdentifier) -> ChainResult<Address>;

    /// `symbol()` of a launched token
    async fn token_symbol(&self, token: Address) -> ChainResult<String>;

    /// `image()` of a launched token
    async fn token_image(&self, token: Address) -> ChainResult<String>;

    /// Current value that must accompany a `launch` call
    async fn launch_cost(&self) -> ChainResult<U256>;
}
