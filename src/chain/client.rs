use crate::chain::abi::{CastLauncher, LaunchedToken};
use crate::chain::TokenRegistry;
use crate::config::ChainConfig;
use crate::errors::{AppError, AppResult, ChainError, ChainResult};
use crate::types::CastIdentifier;
use alloy::contract::Error as ContractError;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::transports::http::reqwest::{Client, Url};
use alloy::transports::http::Http;
use alloy::transports::{RpcError, TransportErrorKind};
use async_trait::async_trait;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// JSON-RPC error code nodes use for reverted `eth_call`s
const EXECUTION_REVERTED: i64 = 3;

/// Read-only client for the launcher registry
///
/// The endpoint URL usually embeds the provider's access key, so it never
/// appears in errors or logs: see [`EndpointScrubber`].
pub struct RegistryClient {
    provider: DynProvider,
    registry: Address,
    scrubber: EndpointScrubber,
}

impl RegistryClient {
    pub fn new(config: &ChainConfig) -> AppResult<Self> {
        let rpc_url = config
            .rpc_endpoint()
            .map_err(|e| AppError::Config(e.to_string()))?;
        let url = Url::parse(&rpc_url)
            .map_err(|e| AppError::Config(format!("Invalid chain RPC URL: {}", e)))?;
        let registry = Address::from_str(&config.registry_address).map_err(|e| {
            AppError::Config(format!(
                "Invalid registry address {}: {}",
                config.registry_address, e
            ))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build RPC client: {}", e.without_url())))?;
        let scrubber = EndpointScrubber::new(&url);
        let is_local = url
            .host_str()
            .is_some_and(|host| host == "localhost" || host == "127.0.0.1");
        let client = RpcClient::new(Http::with_client(http, url), is_local);
        let provider = ProviderBuilder::new().connect_client(client).erased();

        debug!("Chain RPC endpoint {}", scrubber.label);
        Ok(Self {
            provider,
            registry,
            scrubber,
        })
    }

    fn call_error(&self, method: &str, err: ContractError) -> ChainError {
        let mapped = classify_call_error(method, err, &self.scrubber);
        if let ChainError::ChainUnavailable(reason) = &mapped {
            warn!("RPC call {} failed: {}", method, reason);
        }
        mapped
    }
}

/// Removes the endpoint's secret parts (path, query, credentials) from text
pub struct EndpointScrubber {
    full: String,
    secrets: Vec<String>,
    label: String,
}

impl EndpointScrubber {
    pub fn new(url: &Url) -> Self {
        let label = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), url.host_str().unwrap_or(""), port),
            None => format!("{}://{}", url.scheme(), url.host_str().unwrap_or("")),
        };

        let mut secrets = Vec::new();
        if url.path().len() > 1 {
            secrets.push(url.path().to_string());
        }
        if let Some(query) = url.query() {
            secrets.push(query.to_string());
        }
        if !url.username().is_empty() {
            secrets.push(url.username().to_string());
        }
        if let Some(password) = url.password() {
            secrets.push(password.to_string());
        }

        Self {
            full: url.as_str().trim_end_matches('/').to_string(),
            secrets,
            label,
        }
    }

    pub fn scrub(&self, text: &str) -> String {
        let mut scrubbed = text.replace(&self.full, &self.label);
        for secret in &self.secrets {
            scrubbed = scrubbed.replace(secret.as_str(), "/<redacted>");
        }
        scrubbed
    }
}

/// Map a contract call failure onto the chain error taxonomy
///
/// Node-reported reverts become `CallReverted`, return data that does not
/// decode becomes `UndecodableResponse`, anything on the transport side is
/// `ChainUnavailable`. Messages pass through `scrubber` first.
pub fn classify_call_error(method: &str, err: ContractError, scrubber: &EndpointScrubber) -> ChainError {
    if err.as_revert_data().is_some() {
        return ChainError::CallReverted {
            method: method.to_string(),
            message: scrubber.scrub(&err.to_string()),
        };
    }

    match err {
        ContractError::TransportError(rpc) => classify_transport_error(method, rpc, scrubber),
        other => ChainError::UndecodableResponse {
            method: method.to_string(),
            message: scrubber.scrub(&other.to_string()),
        },
    }
}

fn classify_transport_error(
    method: &str,
    err: RpcError<TransportErrorKind>,
    scrubber: &EndpointScrubber,
) -> ChainError {
    if let Some(payload) = err.as_error_resp() {
        let message = scrubber.scrub(&payload.message);
        if payload.code == EXECUTION_REVERTED {
            return ChainError::CallReverted {
                method: method.to_string(),
                message,
            };
        }
        return ChainError::ChainUnavailable(format!(
            "{} rejected by node ({}): {}",
            method, payload.code, message
        ));
    }

    if matches!(err, RpcError::DeserError { .. } | RpcError::NullResp) {
        return ChainError::UndecodableResponse {
            method: method.to_string(),
            message: scrubber.scrub(&err.to_string()),
        };
    }

    ChainError::ChainUnavailable(format!("{} failed: {}", method, scrubber.scrub(&err.to_string())))
}

#[async_trait]
impl TokenRegistry for RegistryClient {
    fn registry_address(&self) -> Address {
        self.registry
    }

    async fn cast_token(&self, cast: &CastIdentifier) -> ChainResult<Address> {
        let registry = CastLauncher::new(self.registry, self.provider.clone());
        let token = registry
            .getCastToken(cast.to_string())
            .call()
            .await
            .map_err(|e| self.call_error("getCastToken", e))?;
        debug!("Registry maps cast {} to {}", cast, token);
        Ok(token)
    }

    async fn token_symbol(&self, token: Address) -> ChainResult<String> {
        LaunchedToken::new(token, self.provider.clone())
            .symbol()
            .call()
            .await
            .map_err(|e| self.call_error("symbol", e))
    }

    async fn token_image(&self, token: Address) -> ChainResult<String> {
        LaunchedToken::new(token, self.provider.clone())
            .image()
            .call()
            .await
            .map_err(|e| self.call_error("image", e))
    }

    async fn launch_cost(&self) -> ChainResult<U256> {
        CastLauncher::new(self.registry, self.provider.clone())
            .getLaunchCost()
            .call()
            .await
            .map_err(|e| self.call_error("getLaunchCost", e))
    }
}
