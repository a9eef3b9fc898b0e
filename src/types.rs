//! Core data types shared across the launch workflow
//!
//! Everything here is transient: casts are fetched fresh for every request and
//! proofs are produced per launch attempt. Nothing is persisted locally.

use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque cast reference, either a cast hash or a cast URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastIdentifier(String);

impl CastIdentifier {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is a cast URL rather than a hash
    pub fn is_url(&self) -> bool {
        self.0.starts_with("https://") || self.0.starts_with("http://")
    }
}

impl fmt::Display for CastIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CastIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CastIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A post as returned by the social graph service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub identifier: CastIdentifier,
    /// Canonical hash reported by the service, when present
    pub hash: Option<String>,
    pub author_text: String,
    pub author_username: String,
    /// Embed URLs in cast order; quoted-cast embeds are skipped
    pub embedded_media_urls: Vec<String>,
    /// Verified ETH addresses in the order the service returned them
    pub author_verified_addresses: Vec<Address>,
}

impl Cast {
    pub fn first_media_url(&self) -> Option<&str> {
        self.embedded_media_urls.first().map(String::as_str)
    }
}

/// Metadata of a token already launched for a cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub address: Address,
    pub symbol: String,
    pub image_url: String,
}

/// Signature attesting that an address list belongs to a cast's author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationProof {
    /// keccak256 of the `address[]` ABI encoding
    pub message_hash: B256,
    /// 65-byte `r || s || v` personal-message signature over `message_hash`
    pub signature: Bytes,
}

/// Arguments of the registry's `launch` entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchTransactionArgs {
    pub ticker: String,
    pub name: String,
    pub image_url: String,
    pub cast_identifier: CastIdentifier,
    pub author_addresses: Vec<Address>,
    pub signature: Bytes,
}
