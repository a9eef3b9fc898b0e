//! Frame presentation
//!
//! Maps workflow outcomes onto frame descriptors (image, text, buttons) and
//! the wallet transaction descriptor. No image rendering happens here: the
//! frame image is the token or cast media URL itself.

use crate::chain::abi::launch_abi;
use crate::workflow::{FailureKind, FrameOutcome, LaunchTransaction, PendingAction};
use alloy::primitives::{Address, Bytes};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

const MAX_BUTTONS: usize = 4;

/// Button behaviour as understood by frame clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    /// Open an external URL
    Link,
    /// Fetch a transaction descriptor from `target` and hand it to the wallet
    Tx,
    /// Re-post to the frame's own URL
    Post,
}

impl ButtonAction {
    fn as_str(&self) -> &'static str {
        match self {
            ButtonAction::Link => "link",
            ButtonAction::Tx => "tx",
            ButtonAction::Post => "post",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameButton {
    pub label: String,
    pub action: ButtonAction,
    pub target: Option<String>,
}

/// Everything a frame client needs to draw one state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameView {
    pub title: String,
    pub lines: Vec<String>,
    pub image_url: String,
    pub buttons: Vec<FrameButton>,
}

/// Build `{public_url}/{segments...}` with each segment percent-encoded
pub fn public_link(public_url: &str, segments: &[&str]) -> String {
    match Url::parse(public_url) {
        Ok(mut url) => {
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(segments);
            }
            url.to_string()
        }
        Err(_) => format!("{}/{}", public_url.trim_end_matches('/'), segments.join("/")),
    }
}

impl FrameView {
    pub fn from_outcome(outcome: &FrameOutcome, public_url: &str, placeholder_image: &str) -> Self {
        match outcome {
            FrameOutcome::TokenExists(token) => FrameView {
                title: format!("${} launched", token.symbol),
                lines: vec!["Interact with it below".to_string()],
                image_url: token.image_url.clone(),
                buttons: token
                    .links
                    .iter()
                    .map(|link| FrameButton {
                        label: link.label.clone(),
                        action: ButtonAction::Link,
                        target: Some(link.url.clone()),
                    })
                    .collect(),
            },
            FrameOutcome::LaunchPending(pending) => {
                let mut lines = vec![format!(
                    "Use an address linked to @{}:",
                    pending.author_username
                )];
                lines.extend(pending.verified_addresses.iter().map(Address::to_string));

                let buttons = pending
                    .actions
                    .iter()
                    .map(|action| match action {
                        PendingAction::LaunchTransaction { cast_identifier } => FrameButton {
                            label: "Launch".to_string(),
                            action: ButtonAction::Tx,
                            target: Some(public_link(
                                public_url,
                                &["api", "launch", cast_identifier.as_str()],
                            )),
                        },
                        PendingAction::Refresh => FrameButton {
                            label: "Refresh 🔄".to_string(),
                            action: ButtonAction::Post,
                            target: None,
                        },
                    })
                    .collect();

                FrameView {
                    title: match &pending.ticker {
                        Some(ticker) => format!("Launch ${}", ticker),
                        None => "Launch (no ticker found)".to_string(),
                    },
                    lines,
                    image_url: pending.image_url.clone(),
                    buttons,
                }
            }
            FrameOutcome::CastLookupFailed(failure) => FrameView {
                title: match failure.kind {
                    FailureKind::NotFound => "Cast Not Found ⚠️".to_string(),
                    FailureKind::Unavailable => "Something went wrong ⚠️".to_string(),
                },
                lines: vec!["Try again in a moment".to_string()],
                image_url: placeholder_image.to_string(),
                buttons: vec![],
            },
        }
    }

    /// Render the frame as an HTML document carrying `fc:frame` meta tags
    pub fn to_html(&self, post_url: &str) -> String {
        let mut meta: Vec<(String, String)> = vec![
            ("og:title".into(), self.title.clone()),
            ("og:image".into(), self.image_url.clone()),
            ("fc:frame".into(), "vNext".into()),
            ("fc:frame:image".into(), self.image_url.clone()),
            ("fc:frame:post_url".into(), post_url.to_string()),
        ];

        // Frame clients accept at most four buttons
        for (index, button) in self.buttons.iter().take(MAX_BUTTONS).enumerate() {
            let prefix = format!("fc:frame:button:{}", index + 1);
            meta.push((format!("{}:action", prefix), button.action.as_str().into()));
            if let Some(target) = &button.target {
                meta.push((format!("{}:target", prefix), target.clone()));
            }
            meta.push((prefix, button.label.clone()));
        }

        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(&self.title)));
        for (property, content) in &meta {
            html.push_str(&format!(
                "<meta property=\"{}\" content=\"{}\">\n",
                escape(property),
                escape(content)
            ));
        }
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape(&self.title)));
        for line in &self.lines {
            html.push_str(&format!("<p>{}</p>\n", escape(line)));
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Parameters of an `eth_sendTransaction` request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionParams {
    pub abi: Value,
    pub to: Address,
    pub data: Bytes,
    /// Wei, as a decimal string
    pub value: String,
}

/// Wallet transaction descriptor returned to frame clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDescriptor {
    #[serde(rename = "chainId")]
    pub chain_id: String,
    pub method: String,
    pub params: TransactionParams,
}

impl TransactionDescriptor {
    pub fn from_launch(tx: &LaunchTransaction) -> Self {
        Self {
            chain_id: tx.chain_id.clone(),
            method: "eth_sendTransaction".to_string(),
            params: TransactionParams {
                abi: launch_abi(),
                to: tx.registry,
                data: tx.calldata(),
                value: tx.value.to_string(),
            },
        }
    }
}
