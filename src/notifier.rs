//! Mention notifier
//!
//! Answers `@launcher launch $TICKER` mentions with a reply that embeds the
//! launch frame for the mentioning cast. Exactly one reply is attempted per
//! qualifying mention; failures are reported, never retried.

use crate::frame::public_link;
use crate::social::CastPublisher;
use crate::ticker::extract_ticker;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Webhook body delivered for a mention
#[derive(Debug, Clone, Deserialize)]
pub struct MentionPayload {
    pub data: MentionData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MentionData {
    #[serde(default)]
    pub text: String,
    pub hash: String,
}

impl MentionPayload {
    /// Parse a raw webhook body; `None` for anything that is not a mention
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice(body) {
            Ok(payload) => Some(payload),
            Err(e) => {
                debug!("Ignoring webhook body that is not a mention: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MentionOutcome {
    ReplyPosted { cast_hash: String, ticker: String },
    NoDirective,
    ReplyFailed { cast_hash: String, message: String },
}

pub struct MentionNotifier {
    publisher: Arc<dyn CastPublisher>,
    public_url: String,
}

impl MentionNotifier {
    pub fn new(publisher: Arc<dyn CastPublisher>, public_url: impl Into<String>) -> Self {
        Self {
            publisher,
            public_url: public_url.into(),
        }
    }

    /// Frame URL embedded in the reply for `cast_hash`
    pub fn embed_url(&self, cast_hash: &str) -> String {
        public_link(&self.public_url, &["api", cast_hash])
    }

    pub async fn on_mention(&self, payload: &MentionPayload) -> MentionOutcome {
        let cast_hash = payload.data.hash.as_str();

        let Some(ticker) = extract_ticker(&payload.data.text) else {
            debug!("Mention {} carries no launch directive", cast_hash);
            return MentionOutcome::NoDirective;
        };

        let embed = self.embed_url(cast_hash);
        match self.publisher.post_reply(cast_hash, &embed).await {
            Ok(()) => {
                info!("Replied to {} with ${} frame {}", cast_hash, ticker, embed);
                MentionOutcome::ReplyPosted {
                    cast_hash: cast_hash.to_string(),
                    ticker,
                }
            }
            Err(e) => {
                error!("Reply to {} failed: {}", cast_hash, e);
                MentionOutcome::ReplyFailed {
                    cast_hash: cast_hash.to_string(),
                    message: e.to_string(),
                }
            }
        }
    }
}
