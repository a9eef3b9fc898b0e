//! Cast lookup response parsing
//!
//! Only the fields the launcher needs are modelled. `author` and
//! `author.verified_addresses.eth_addresses` are required; everything else
//! degrades to an empty value.

use crate::errors::{SocialError, SocialResult};
use crate::types::{Cast, CastIdentifier};
use alloy::primitives::Address;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct CastEnvelope {
    cast: Option<RawCast>,
}

#[derive(Debug, Deserialize)]
struct RawCast {
    hash: Option<String>,
    #[serde(default)]
    text: Option<String>,
    author: Option<RawAuthor>,
    #[serde(default)]
    embeds: Option<Vec<RawEmbed>>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    username: Option<String>,
    verified_addresses: Option<RawVerifiedAddresses>,
}

#[derive(Debug, Deserialize)]
struct RawVerifiedAddresses {
    eth_addresses: Option<Vec<String>>,
}

// Quoted casts appear as embeds with a `cast_id` and no `url`
#[derive(Debug, Deserialize)]
struct RawEmbed {
    url: Option<String>,
}

/// Parse a cast lookup response body
pub fn parse_cast_response(identifier: &CastIdentifier, body: &[u8]) -> SocialResult<Cast> {
    let envelope: CastEnvelope = serde_json::from_slice(body).map_err(|e| {
        SocialError::MalformedCastPayload(format!("response is not a cast envelope: {}", e))
    })?;

    let raw = envelope.cast.ok_or_else(|| {
        SocialError::MalformedCastPayload(format!("no cast object for {}", identifier))
    })?;

    let author = raw
        .author
        .ok_or_else(|| SocialError::MalformedCastPayload("cast has no author".to_string()))?;

    let author_username = author.username.ok_or_else(|| {
        SocialError::MalformedCastPayload("author has no username".to_string())
    })?;

    let eth_addresses = author
        .verified_addresses
        .and_then(|v| v.eth_addresses)
        .ok_or_else(|| {
            SocialError::MalformedCastPayload(format!(
                "author @{} has no verified_addresses.eth_addresses",
                author_username
            ))
        })?;

    let author_verified_addresses = eth_addresses
        .iter()
        .map(|raw| {
            Address::from_str(raw.trim()).map_err(|e| {
                SocialError::MalformedCastPayload(format!(
                    "invalid verified address {:?}: {}",
                    raw, e
                ))
            })
        })
        .collect::<SocialResult<Vec<_>>>()?;

    let embedded_media_urls = raw
        .embeds
        .unwrap_or_default()
        .into_iter()
        .filter_map(|embed| embed.url)
        .filter(|url| !url.is_empty())
        .collect();

    Ok(Cast {
        identifier: identifier.clone(),
        hash: raw.hash,
        author_text: raw.text.unwrap_or_default(),
        author_username,
        embedded_media_urls,
        author_verified_addresses,
    })
}
