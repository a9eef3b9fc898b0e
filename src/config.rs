use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;

/// Base mainnet
pub const DEFAULT_CHAIN_ID: u64 = 8453;

/// Launcher registry contract on Base
pub const DEFAULT_REGISTRY_ADDRESS: &str = "0xDC324998F1cbf814e5e4Fa29C60Be0778A1B702A";

/// Cast rendered when the frame is opened without a cast identifier
pub const DEFAULT_CAST: &str = "https://warpcast.com/owl/0x6864e592";

/// Shown when a cast has no embedded media
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://i.imgur.com/ShRHsoG.png";

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chain: ChainConfig,
    pub social: SocialConfig,
    pub signing: SigningConfig,
    pub launch: LaunchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Externally reachable origin, used for reply embeds and frame targets
    pub public_url: String,
}

/// Chain RPC and contract settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Full RPC URL; takes precedence over `alchemy_key`
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub alchemy_key: Option<String>,
    pub registry_address: String,
    pub chain_id: u64,
    pub timeout_seconds: u64,
}

/// Social graph API settings
#[derive(Clone, Serialize, Deserialize)]
pub struct SocialConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Managed signer used when posting replies
    pub signer_uuid: String,
    pub timeout_seconds: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Hex-encoded secp256k1 key trusted by the registry contract
    #[serde(skip_serializing)]
    pub private_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub default_cast: String,
    pub placeholder_image: String,
    /// Let a cast without a `$TICKER` directive reach the signed transaction
    pub allow_missing_ticker: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            public_url: "https://launcher-frame.vercel.app".to_string(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            alchemy_key: None,
            registry_address: DEFAULT_REGISTRY_ADDRESS.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            timeout_seconds: 15,
        }
    }
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.neynar.com".to_string(),
            api_key: String::new(),
            signer_uuid: String::new(),
            timeout_seconds: 10,
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            default_cast: DEFAULT_CAST.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            allow_missing_ticker: false,
        }
    }
}

impl ChainConfig {
    /// Resolve the JSON-RPC endpoint from an explicit URL or an Alchemy key
    pub fn rpc_endpoint(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.rpc_url.as_deref().filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }
        match self.alchemy_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => Ok(format!("https://base-mainnet.g.alchemy.com/v2/{}", key)),
            None => Err(ConfigError::Message(
                "No chain RPC configured. Set ALCHEMY_KEY or chain.rpc_url".to_string(),
            )),
        }
    }

    /// CAIP-2 network identifier used in transaction descriptors
    pub fn caip2_chain_id(&self) -> String {
        format!("eip155:{}", self.chain_id)
    }
}

// Secrets never reach the logs
impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("rpc_url", &self.rpc_url.as_ref().map(|_| "<set>"))
            .field("alchemy_key", &redact(self.alchemy_key.as_deref().unwrap_or("")))
            .field("registry_address", &self.registry_address)
            .field("chain_id", &self.chain_id)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl fmt::Debug for SocialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocialConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("signer_uuid", &self.signer_uuid)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("private_key", &redact(&self.private_key))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Same as [`AppConfig::load`] but reads an explicit file instead of `./config.toml`
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let server = ServerConfig::default();
        let chain = ChainConfig::default();
        let social = SocialConfig::default();
        let launch = LaunchConfig::default();

        let file_source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        let config = Config::builder()
            // Start with default values
            .set_default("server.bind_address", server.bind_address)?
            .set_default("server.public_url", server.public_url)?
            .set_default("chain.registry_address", chain.registry_address)?
            .set_default("chain.chain_id", chain.chain_id)?
            .set_default("chain.timeout_seconds", chain.timeout_seconds)?
            .set_default("social.api_url", social.api_url)?
            .set_default("social.api_key", social.api_key)?
            .set_default("social.signer_uuid", social.signer_uuid)?
            .set_default("social.timeout_seconds", social.timeout_seconds)?
            .set_default("signing.private_key", "")?
            .set_default("launch.default_cast", launch.default_cast)?
            .set_default("launch.placeholder_image", launch.placeholder_image)?
            .set_default("launch.allow_missing_ticker", launch.allow_missing_ticker)?
            .add_source(file_source)
            // LAUNCHER_CHAIN__RPC_URL, LAUNCHER_LAUNCH__ALLOW_MISSING_TICKER, ...
            .add_source(
                config::Environment::with_prefix("LAUNCHER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Well-known deployment variables win over everything else
        if let Ok(key) = env::var("ALCHEMY_KEY") {
            app_config.chain.alchemy_key = Some(key);
        }
        if let Ok(key) = env::var("DEPLOYER_KEY") {
            app_config.signing.private_key = key;
        }
        if let Ok(key) = env::var("NEYNAR_KEY") {
            app_config.social.api_key = key;
        }
        if let Ok(uuid) = env::var("NEYNAR_UUID") {
            app_config.social.signer_uuid = uuid;
        }

        Ok(app_config)
    }

    /// Check that everything the HTTP service needs is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain.rpc_endpoint()?;
        if self.signing.private_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "Signing key not configured. Please set DEPLOYER_KEY".to_string(),
            ));
        }
        if self.social.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "Social API key not configured. Please set NEYNAR_KEY".to_string(),
            ));
        }
        Ok(())
    }
}
