//! Common Test Utilities
//!
//! Test doubles for the workflow's collaborators plus fixture loading. Each
//! test harness pulls in a different subset, hence the dead-code allowance.

#![allow(dead_code)]

use alloy::primitives::{address, Address, U256};
use async_trait::async_trait;
use cast_launcher::auth::AddressAuthorizer;
use cast_launcher::chain::TokenRegistry;
use cast_launcher::errors::{ChainError, ChainResult, SocialError, SocialResult};
use cast_launcher::social::{CastPublisher, CastSource};
use cast_launcher::types::{Cast, CastIdentifier, TokenRecord};
use cast_launcher::workflow::{LaunchWorkflow, WorkflowSettings};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Well-known development key (anvil account #0)
pub const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_SIGNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub const REGISTRY: Address = address!("00000000000000000000000000000000000000cc");
pub const TOKEN: Address = address!("00000000000000000000000000000000000000ee");
pub const ADDR_A: Address = address!("0000000000000000000000000000000000000aaa");
pub const ADDR_B: Address = address!("0000000000000000000000000000000000000bbb");
pub const ADDR_C: Address = address!("0000000000000000000000000000000000000ccc");

pub const PLACEHOLDER: &str = "https://img.test/placeholder.png";
pub const DEFAULT_CAST: &str = "0xdefault";
pub const PUBLIC_URL: &str = "https://launcher.test";

/// Raw bytes of a file under `tests/test_data/`
pub fn load_fixture(relative: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/test_data")
        .join(relative);
    std::fs::read(&path).unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e))
}

pub fn make_cast(text: &str, username: &str, addresses: Vec<Address>, media: Vec<&str>) -> Cast {
    Cast {
        identifier: "0x123".into(),
        hash: Some("0x123".to_string()),
        author_text: text.to_string(),
        author_username: username.to_string(),
        embedded_media_urls: media.into_iter().map(str::to_string).collect(),
        author_verified_addresses: addresses,
    }
}

/// Scripted response of [`MockCastSource`]
#[derive(Clone)]
pub enum CastReply {
    Found(Cast),
    NotFound,
    Unavailable,
}

/// Replays scripted replies in order, repeating the last one
pub struct MockCastSource {
    replies: Vec<CastReply>,
    calls: AtomicUsize,
}

impl MockCastSource {
    pub fn new(replies: Vec<CastReply>) -> Self {
        assert!(!replies.is_empty());
        Self {
            replies,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn found(cast: Cast) -> Self {
        Self::new(vec![CastReply::Found(cast)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CastSource for MockCastSource {
    async fn resolve(&self, identifier: &CastIdentifier) -> SocialResult<Cast> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.replies[index.min(self.replies.len() - 1)] {
            CastReply::Found(cast) => Ok(Cast {
                identifier: identifier.clone(),
                ..cast.clone()
            }),
            CastReply::NotFound => Err(SocialError::CastNotFound {
                identifier: identifier.to_string(),
            }),
            CastReply::Unavailable => Err(SocialError::UpstreamUnavailable(
                "connection refused".to_string(),
            )),
        }
    }
}

/// In-memory registry; `token` is what every cast maps to
pub struct MockRegistry {
    pub token: Mutex<Option<TokenRecord>>,
    pub unavailable: bool,
    pub launch_cost: U256,
    lookups: AtomicUsize,
}

impl MockRegistry {
    pub fn empty() -> Self {
        Self {
            token: Mutex::new(None),
            unavailable: false,
            launch_cost: U256::from(1_000_000_000_000_000u64),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn launched(symbol: &str) -> Self {
        let registry = Self::empty();
        registry.set_launched(symbol);
        registry
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::empty()
        }
    }

    /// Simulate the launch transaction landing
    pub fn set_launched(&self, symbol: &str) {
        *self.token.lock().unwrap() = Some(TokenRecord {
            address: TOKEN,
            symbol: symbol.to_string(),
            image_url: format!("https://img.test/{}.png", symbol.to_lowercase()),
        });
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn record(&self) -> ChainResult<Option<TokenRecord>> {
        if self.unavailable {
            return Err(ChainError::ChainUnavailable("rpc down".to_string()));
        }
        Ok(self.token.lock().unwrap().clone())
    }
}

#[async_trait]
impl TokenRegistry for MockRegistry {
    fn registry_address(&self) -> Address {
        REGISTRY
    }

    async fn cast_token(&self, _cast: &CastIdentifier) -> ChainResult<Address> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.record()?.map(|t| t.address).unwrap_or(Address::ZERO))
    }

    async fn token_symbol(&self, _token: Address) -> ChainResult<String> {
        self.record()?
            .map(|t| t.symbol)
            .ok_or_else(|| ChainError::ChainUnavailable("no token".to_string()))
    }

    async fn token_image(&self, _token: Address) -> ChainResult<String> {
        self.record()?
            .map(|t| t.image_url)
            .ok_or_else(|| ChainError::ChainUnavailable("no token".to_string()))
    }

    async fn launch_cost(&self) -> ChainResult<U256> {
        if self.unavailable {
            return Err(ChainError::ChainUnavailable("rpc down".to_string()));
        }
        Ok(self.launch_cost)
    }
}

/// Records every reply instead of posting it
#[derive(Default)]
pub struct RecordingPublisher {
    pub replies: Mutex<Vec<(String, String)>>,
}

impl RecordingPublisher {
    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl CastPublisher for RecordingPublisher {
    async fn post_reply(&self, parent_hash: &str, embed_url: &str) -> SocialResult<()> {
        self.replies
            .lock()
            .unwrap()
            .push((parent_hash.to_string(), embed_url.to_string()));
        Ok(())
    }
}

pub fn test_authorizer() -> Arc<AddressAuthorizer> {
    Arc::new(AddressAuthorizer::from_private_key(TEST_KEY).unwrap())
}

pub fn test_settings(allow_missing_ticker: bool) -> WorkflowSettings {
    WorkflowSettings {
        default_cast: DEFAULT_CAST.into(),
        placeholder_image: PLACEHOLDER.to_string(),
        allow_missing_ticker,
        chain_id: "eip155:8453".to_string(),
    }
}

pub fn make_workflow(
    registry: Arc<MockRegistry>,
    casts: Arc<MockCastSource>,
    allow_missing_ticker: bool,
) -> LaunchWorkflow {
    LaunchWorkflow::new(
        registry,
        casts,
        test_authorizer(),
        test_settings(allow_missing_ticker),
    )
}
