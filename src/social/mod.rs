//! Social graph integration
//!
//! This module provides the cast-facing side of the launcher:
//! - **Payload** - parsing of cast lookup responses into [`Cast`](crate::types::Cast)
//! - **Client** - HTTP client for cast lookup and reply posting
//!
//! Both operations sit behind traits so the workflow and the notifier can be
//! driven by test doubles.

pub mod client;
pub mod payload;

use crate::errors::SocialResult;
use crate::types::{Cast, CastIdentifier};
use async_trait::async_trait;

pub use client::NeynarClient;
pub use payload::parse_cast_response;

/// Read access to casts
#[async_trait]
pub trait CastSource: Send + Sync {
    /// Fetch a cast with its author and verified addresses. Never cached.
    async fn resolve(&self, identifier: &CastIdentifier) -> SocialResult<Cast>;
}

/// Write access used to answer mentions
#[async_trait]
pub trait CastPublisher: Send + Sync {
    /// Post an empty-text reply under `parent_hash` embedding `embed_url`
    async fn post_reply(&self, parent_hash: &str, embed_url: &str) -> SocialResult<()>;
}
