use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Social graph (cast lookup / reply) operations
    #[error("Social service error: {0}")]
    Social(#[from] SocialError),

    /// Chain reads against the registry or token contracts
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// Address list signing
    #[error("Authorisation error: {0}")]
    Authorization(#[from] AuthorizationError),

    /// Launch workflow failures
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O and socket operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Errors raised while talking to the external social-graph service
#[derive(Error, Debug)]
pub enum SocialError {
    /// Network failure, timeout or 5xx from the social service
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The service reported that no such cast exists
    #[error("Cast not found: {identifier}")]
    CastNotFound { identifier: String },

    /// Required fields (author, verified addresses) were missing or unusable
    #[error("Malformed cast payload: {0}")]
    MalformedCastPayload(String),
}

/// Errors raised by read-only chain calls
#[derive(Error, Debug)]
pub enum ChainError {
    /// RPC transport failure or the node refused the call
    #[error("Chain unavailable: {0}")]
    ChainUnavailable(String),

    /// A token is registered for the cast but its interface cannot be read
    #[error("Corrupt token metadata for {token}: {reason}")]
    CorruptTokenMetadata { token: String, reason: String },

    /// The contract call executed but reverted
    #[error("Call reverted: {method} - {message}")]
    CallReverted { method: String, message: String },

    /// Return data did not decode as the expected ABI type
    #[error("Undecodable return data from {method}: {message}")]
    UndecodableResponse { method: String, message: String },
}

/// Errors raised by the address authoriser
#[derive(Error, Debug)]
pub enum AuthorizationError {
    /// Empty or unparsable address list, rejected before signing
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Signing key missing or unusable
    #[error("Signing key error: {0}")]
    KeyMisconfigured(String),

    /// The signer failed to produce a signature
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// Failures that abort a workflow request
///
/// Rejections that the workflow decides on (no addresses, no ticker, already
/// launched) are not errors; they are reported as terminal states instead.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Cast lookup failed: {0}")]
    Social(#[from] SocialError),

    #[error("Chain lookup failed: {0}")]
    Chain(#[from] ChainError),

    #[error("Signing failed: {0}")]
    Signing(#[from] AuthorizationError),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for social service operations
pub type SocialResult<T> = Result<T, SocialError>;

/// Result type for chain reads
pub type ChainResult<T> = Result<T, ChainError>;

/// Result type for address authorisation
pub type AuthorizationResult<T> = Result<T, AuthorizationError>;

// Additional From implementations for common error types
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl SocialError {
    /// Whether an external caller may reasonably retry the same request
    pub fn is_transient(&self) -> bool {
        matches!(self, SocialError::UpstreamUnavailable(_))
    }
}
