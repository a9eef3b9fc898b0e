//! Launch workflow
//!
//! Turns a cast identifier into one of the launcher's display states, and a
//! launch request into a ready-to-sign transaction. The workflow holds no
//! mutable state: each call reads the chain and the social graph afresh, so
//! repeating a call before a launch lands yields the same state, and after it
//! lands yields [`LaunchStage::TokenExists`].
//!
//! ```text
//! CastUnresolved ──► TokenExists
//!        │
//!        ├─────────► CastLookupFailed
//!        │
//!        └─────────► LaunchPending ──(launch)──► Authorizing ──► TransactionReady
//!                                                     │
//!                                                     └─────────► AuthorizationFailed
//! ```

use crate::auth::AddressAuthorizer;
use crate::chain::abi::CastLauncher;
use crate::chain::{lookup_token, TokenRegistry};
use crate::config::AppConfig;
use crate::errors::{AuthorizationError, ChainError, SocialError, WorkflowError};
use crate::social::CastSource;
use crate::ticker::extract_ticker;
use crate::types::{Cast, CastIdentifier, LaunchTransactionArgs, TokenRecord};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Named states of the launch workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaunchStage {
    CastUnresolved,
    TokenExists,
    LaunchPending,
    CastLookupFailed,
    Authorizing,
    TransactionReady,
    AuthorizationFailed,
}

impl fmt::Display for LaunchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LaunchStage::CastUnresolved => "CAST_UNRESOLVED",
            LaunchStage::TokenExists => "TOKEN_EXISTS",
            LaunchStage::LaunchPending => "LAUNCH_PENDING",
            LaunchStage::CastLookupFailed => "CAST_LOOKUP_FAILED",
            LaunchStage::Authorizing => "AUTHORIZING",
            LaunchStage::TransactionReady => "TRANSACTION_READY",
            LaunchStage::AuthorizationFailed => "AUTHORIZATION_FAILED",
        };
        f.write_str(name)
    }
}

/// Venue for a launched token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Venue {
    Trade,
    Liquidity,
    Earn,
}

/// External link offered next to a launched token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionLink {
    pub venue: Venue,
    pub label: String,
    pub url: String,
}

impl ActionLink {
    /// The fixed trade / LP / earn links for a token
    pub fn for_token(token: Address) -> Vec<ActionLink> {
        vec![
            ActionLink {
                venue: Venue::Trade,
                label: "Trade".to_string(),
                url: format!("https://dexscreener.com/base/{}", token),
            },
            ActionLink {
                venue: Venue::Liquidity,
                label: "LP".to_string(),
                url: format!("https://www.rebase.finance/{}", token),
            },
            ActionLink {
                venue: Venue::Earn,
                label: "Earn".to_string(),
                url: format!("https://www.based.jobs/project/{}", token),
            },
        ]
    }
}

/// `TOKEN_EXISTS` display data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenDisplay {
    pub cast_identifier: CastIdentifier,
    pub symbol: String,
    pub image_url: String,
    pub token_address: Address,
    pub links: Vec<ActionLink>,
}

impl TokenDisplay {
    fn new(cast_identifier: CastIdentifier, token: TokenRecord) -> Self {
        Self {
            cast_identifier,
            links: ActionLink::for_token(token.address),
            symbol: token.symbol,
            image_url: token.image_url,
            token_address: token.address,
        }
    }
}

/// Actions offered while a launch is pending
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingAction {
    /// Ask the wallet for the launch transaction of this cast
    LaunchTransaction { cast_identifier: CastIdentifier },
    /// Re-enter the workflow from the start
    Refresh,
}

/// `LAUNCH_PENDING` display data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingLaunch {
    pub cast_identifier: CastIdentifier,
    /// `None` when the cast carries no `$TICKER` directive
    pub ticker: Option<String>,
    pub image_url: String,
    pub author_username: String,
    pub verified_addresses: Vec<Address>,
    pub actions: Vec<PendingAction>,
}

/// Why a lookup ended the render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Bad identifier or inconsistent upstream data, not worth retrying
    NotFound,
    /// Outage of the social service or the chain RPC
    Unavailable,
}

/// `CAST_LOOKUP_FAILED` display data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupFailure {
    pub cast_identifier: CastIdentifier,
    pub kind: FailureKind,
    pub message: String,
}

impl LookupFailure {
    fn from_social(cast_identifier: CastIdentifier, err: &SocialError) -> Self {
        let kind = match err {
            SocialError::UpstreamUnavailable(_) => FailureKind::Unavailable,
            SocialError::CastNotFound { .. } | SocialError::MalformedCastPayload(_) => {
                FailureKind::NotFound
            }
        };
        Self {
            cast_identifier,
            kind,
            message: err.to_string(),
        }
    }

    fn from_chain(cast_identifier: CastIdentifier, err: &ChainError) -> Self {
        Self {
            cast_identifier,
            kind: FailureKind::Unavailable,
            message: err.to_string(),
        }
    }
}

/// Result of rendering the frame for a cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameOutcome {
    TokenExists(TokenDisplay),
    LaunchPending(PendingLaunch),
    CastLookupFailed(LookupFailure),
}

impl FrameOutcome {
    pub fn stage(&self) -> LaunchStage {
        match self {
            FrameOutcome::TokenExists(_) => LaunchStage::TokenExists,
            FrameOutcome::LaunchPending(_) => LaunchStage::LaunchPending,
            FrameOutcome::CastLookupFailed(_) => LaunchStage::CastLookupFailed,
        }
    }
}

/// A launch the workflow refuses to authorise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum LaunchRejection {
    /// The registry already maps this cast to a token
    AlreadyLaunched { token_address: Address },
    /// The author has no verified addresses to authorise
    NoVerifiedAddresses { author_username: String },
    /// The cast text carries no `$TICKER` directive
    MissingTicker,
}

impl fmt::Display for LaunchRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchRejection::AlreadyLaunched { token_address } => {
                write!(f, "cast already launched as {}", token_address)
            }
            LaunchRejection::NoVerifiedAddresses { author_username } => {
                write!(f, "@{} has no verified addresses", author_username)
            }
            LaunchRejection::MissingTicker => f.write_str("cast has no launch directive"),
        }
    }
}

/// Everything the transaction builder needs for a `launch` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchTransaction {
    /// CAIP-2 chain, e.g. `eip155:8453`
    pub chain_id: String,
    pub registry: Address,
    /// Launch cost read from the registry, sent as the call value
    pub value: U256,
    pub args: LaunchTransactionArgs,
    pub message_hash: B256,
}

impl LaunchTransaction {
    /// ABI calldata for `launch(ticker, name, image, castHash, addresses, signature)`
    pub fn calldata(&self) -> Bytes {
        let call = CastLauncher::launchCall {
            ticker: self.args.ticker.clone(),
            name: self.args.name.clone(),
            image: self.args.image_url.clone(),
            castHash: self.args.cast_identifier.to_string(),
            addresses: self.args.author_addresses.clone(),
            signature: self.args.signature.clone(),
        };
        Bytes::from(call.abi_encode())
    }
}

/// Result of a launch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaunchOutcome {
    TransactionReady(LaunchTransaction),
    AuthorizationFailed(LaunchRejection),
}

impl LaunchOutcome {
    pub fn stage(&self) -> LaunchStage {
        match self {
            LaunchOutcome::TransactionReady(_) => LaunchStage::TransactionReady,
            LaunchOutcome::AuthorizationFailed(_) => LaunchStage::AuthorizationFailed,
        }
    }
}

/// Knobs the workflow reads from configuration
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    /// Rendered when no cast identifier is supplied
    pub default_cast: CastIdentifier,
    pub placeholder_image: String,
    pub allow_missing_ticker: bool,
    pub chain_id: String,
}

impl WorkflowSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_cast: CastIdentifier::new(config.launch.default_cast.clone()),
            placeholder_image: config.launch.placeholder_image.clone(),
            allow_missing_ticker: config.launch.allow_missing_ticker,
            chain_id: config.chain.caip2_chain_id(),
        }
    }
}

/// Orchestrates chain lookup, cast resolution and address authorisation
pub struct LaunchWorkflow {
    registry: Arc<dyn TokenRegistry>,
    casts: Arc<dyn CastSource>,
    authorizer: Arc<AddressAuthorizer>,
    settings: WorkflowSettings,
}

impl LaunchWorkflow {
    pub fn new(
        registry: Arc<dyn TokenRegistry>,
        casts: Arc<dyn CastSource>,
        authorizer: Arc<AddressAuthorizer>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            registry,
            casts,
            authorizer,
            settings,
        }
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Resolve the display state for a cast
    ///
    /// The chain is consulted first; a launched token short-circuits the
    /// social lookup entirely.
    pub async fn render_frame(&self, identifier: Option<CastIdentifier>) -> FrameOutcome {
        let cast_id = identifier.unwrap_or_else(|| {
            debug!(
                "No cast supplied, falling back to {}",
                self.settings.default_cast
            );
            self.settings.default_cast.clone()
        });
        debug!("{} {}", LaunchStage::CastUnresolved, cast_id);

        match lookup_token(self.registry.as_ref(), &cast_id).await {
            Ok(Some(token)) => {
                info!("{} {} -> ${}", LaunchStage::TokenExists, cast_id, token.symbol);
                return FrameOutcome::TokenExists(TokenDisplay::new(cast_id, token));
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Chain lookup for {} failed: {}", cast_id, e);
                return FrameOutcome::CastLookupFailed(LookupFailure::from_chain(cast_id, &e));
            }
        }

        match self.casts.resolve(&cast_id).await {
            Ok(cast) => {
                let pending = self.pending_launch(cast_id, cast);
                if pending.ticker.is_none() {
                    warn!(
                        "Cast {} has no launch directive, showing it anyway",
                        pending.cast_identifier
                    );
                }
                info!(
                    "{} {} (ticker: {:?})",
                    LaunchStage::LaunchPending,
                    pending.cast_identifier,
                    pending.ticker
                );
                FrameOutcome::LaunchPending(pending)
            }
            Err(e) => {
                warn!("Cast lookup for {} failed: {}", cast_id, e);
                FrameOutcome::CastLookupFailed(LookupFailure::from_social(cast_id, &e))
            }
        }
    }

    fn pending_launch(&self, cast_id: CastIdentifier, cast: Cast) -> PendingLaunch {
        PendingLaunch {
            ticker: extract_ticker(&cast.author_text),
            image_url: self.image_for(&cast),
            author_username: cast.author_username,
            verified_addresses: cast.author_verified_addresses,
            actions: vec![
                PendingAction::LaunchTransaction {
                    cast_identifier: cast_id.clone(),
                },
                PendingAction::Refresh,
            ],
            cast_identifier: cast_id,
        }
    }

    fn image_for(&self, cast: &Cast) -> String {
        cast.first_media_url()
            .unwrap_or(&self.settings.placeholder_image)
            .to_string()
    }

    /// Build the signed launch transaction for a cast
    ///
    /// The cast is fetched again rather than trusting what the frame showed,
    /// so the signed address list is current. Upstream and signing failures
    /// abort with an error; policy refusals come back as
    /// [`LaunchOutcome::AuthorizationFailed`].
    pub async fn build_launch(
        &self,
        cast_id: CastIdentifier,
    ) -> Result<LaunchOutcome, WorkflowError> {
        if let Some(token) = lookup_token(self.registry.as_ref(), &cast_id).await? {
            warn!("Refusing second launch for {}: token {}", cast_id, token.address);
            return Ok(LaunchOutcome::AuthorizationFailed(
                LaunchRejection::AlreadyLaunched {
                    token_address: token.address,
                },
            ));
        }

        debug!("{} {}", LaunchStage::Authorizing, cast_id);

        // Independent reads, fetched together
        let (cast, launch_cost) = tokio::try_join!(
            async { self.casts.resolve(&cast_id).await.map_err(WorkflowError::from) },
            async { self.registry.launch_cost().await.map_err(WorkflowError::from) },
        )?;

        let ticker = match extract_ticker(&cast.author_text) {
            Some(ticker) => ticker,
            None if self.settings.allow_missing_ticker => {
                warn!("Launching {} without a ticker", cast_id);
                String::new()
            }
            None => {
                info!("{} {}: no ticker", LaunchStage::AuthorizationFailed, cast_id);
                return Ok(LaunchOutcome::AuthorizationFailed(
                    LaunchRejection::MissingTicker,
                ));
            }
        };

        let proof = match self.authorizer.authorize(&cast.author_verified_addresses) {
            Ok(proof) => proof,
            Err(AuthorizationError::InvalidInput(reason)) => {
                info!(
                    "{} {}: {}",
                    LaunchStage::AuthorizationFailed,
                    cast_id,
                    reason
                );
                return Ok(LaunchOutcome::AuthorizationFailed(
                    LaunchRejection::NoVerifiedAddresses {
                        author_username: cast.author_username,
                    },
                ));
            }
            Err(e) => return Err(WorkflowError::Signing(e)),
        };

        let image_url = self.image_for(&cast);
        let args = LaunchTransactionArgs {
            name: ticker.clone(),
            ticker,
            image_url,
            cast_identifier: cast_id.clone(),
            author_addresses: cast.author_verified_addresses,
            signature: proof.signature,
        };

        info!(
            "{} {} (${}, {} address(es), value {})",
            LaunchStage::TransactionReady,
            cast_id,
            args.ticker,
            args.author_addresses.len(),
            launch_cost
        );

        Ok(LaunchOutcome::TransactionReady(LaunchTransaction {
            chain_id: self.settings.chain_id.clone(),
            registry: self.registry.registry_address(),
            value: launch_cost,
            args,
            message_hash: proof.message_hash,
        }))
    }
}
