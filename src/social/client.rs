use crate::config::SocialConfig;
use crate::errors::{SocialError, SocialResult};
use crate::social::{parse_cast_response, CastPublisher, CastSource};
use crate::types::{Cast, CastIdentifier};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP client for the Neynar cast API
///
/// Every call is a single request. Retrying is left to whoever drives the
/// request (the frame client or the webhook sender).
#[derive(Clone)]
pub struct NeynarClient {
    http: Client,
    api_url: String,
    api_key: String,
    signer_uuid: String,
}

#[derive(Debug, Serialize)]
struct ReplyEmbed<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    embeds: Vec<ReplyEmbed<'a>>,
    text: &'a str,
    parent: &'a str,
    signer_uuid: &'a str,
}

impl NeynarClient {
    pub fn new(config: &SocialConfig) -> SocialResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                SocialError::UpstreamUnavailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            signer_uuid: config.signer_uuid.clone(),
        })
    }

    fn cast_endpoint(&self) -> String {
        format!("{}/v2/farcaster/cast", self.api_url)
    }
}

/// Lookup type the API expects for an identifier
pub fn identifier_type(identifier: &CastIdentifier) -> &'static str {
    if identifier.is_url() {
        "url"
    } else {
        "hash"
    }
}

fn transport_error(context: &str, err: reqwest::Error) -> SocialError {
    if err.is_timeout() {
        SocialError::UpstreamUnavailable(format!("{} timed out", context))
    } else {
        SocialError::UpstreamUnavailable(format!("{} failed: {}", context, err))
    }
}

/// Map a non-success lookup status onto the error taxonomy
pub fn lookup_status_error(identifier: &CastIdentifier, status: StatusCode) -> SocialError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => SocialError::CastNotFound {
            identifier: identifier.to_string(),
        },
        status => SocialError::UpstreamUnavailable(format!(
            "cast lookup for {} returned HTTP {}",
            identifier, status
        )),
    }
}

#[async_trait]
impl CastSource for NeynarClient {
    async fn resolve(&self, identifier: &CastIdentifier) -> SocialResult<Cast> {
        let kind = identifier_type(identifier);
        debug!("Looking up cast {} (type={})", identifier, kind);

        let response = self
            .http
            .get(self.cast_endpoint())
            .query(&[("type", kind), ("identifier", identifier.as_str())])
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| transport_error("cast lookup", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Cast lookup for {} returned {}", identifier, status);
            return Err(lookup_status_error(identifier, status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error("reading cast lookup body", e))?;

        let cast = parse_cast_response(identifier, &body)?;
        debug!(
            "Resolved cast {} by @{} with {} verified address(es)",
            identifier,
            cast.author_username,
            cast.author_verified_addresses.len()
        );
        Ok(cast)
    }
}

#[async_trait]
impl CastPublisher for NeynarClient {
    async fn post_reply(&self, parent_hash: &str, embed_url: &str) -> SocialResult<()> {
        let request = ReplyRequest {
            embeds: vec![ReplyEmbed { url: embed_url }],
            text: "",
            parent: parent_hash,
            signer_uuid: &self.signer_uuid,
        };

        let response = self
            .http
            .post(self.cast_endpoint())
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error("reply post", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SocialError::UpstreamUnavailable(format!(
                "reply to {} returned HTTP {}",
                parent_hash, status
            )));
        }

        info!("Posted launch frame reply to cast {}", parent_hash);
        Ok(())
    }
}
