use crate::chain::TokenRegistry;
use crate::errors::{ChainError, ChainResult};
use crate::types::{CastIdentifier, TokenRecord};
use alloy::primitives::Address;
use tracing::{debug, warn};

/// Resolve the token launched for a cast, if any
///
/// Two dependent reads: the registry mapping, then `image()` and `symbol()` on
/// the mapped token. The zero address is the registry's "not launched" marker
/// and yields `Ok(None)`.
pub async fn lookup_token<R>(registry: &R, cast: &CastIdentifier) -> ChainResult<Option<TokenRecord>>
where
    R: TokenRegistry + ?Sized,
{
    let token = registry
        .cast_token(cast)
        .await
        .map_err(registry_error)?;

    if token == Address::ZERO {
        debug!("No token registered for cast {}", cast);
        return Ok(None);
    }

    let image_url = registry
        .token_image(token)
        .await
        .map_err(|e| metadata_error(token, e))?;
    let symbol = registry
        .token_symbol(token)
        .await
        .map_err(|e| metadata_error(token, e))?;

    debug!("Cast {} already launched as ${} at {}", cast, symbol, token);
    Ok(Some(TokenRecord {
        address: token,
        symbol,
        image_url,
    }))
}

// A broken registry read means the chain view is unusable, not the token
fn registry_error(err: ChainError) -> ChainError {
    match err {
        ChainError::ChainUnavailable(msg) => ChainError::ChainUnavailable(msg),
        other => ChainError::ChainUnavailable(other.to_string()),
    }
}

fn metadata_error(token: Address, err: ChainError) -> ChainError {
    match err {
        ChainError::ChainUnavailable(msg) => ChainError::ChainUnavailable(msg),
        other => {
            warn!("Token {} does not expose launcher metadata: {}", token, other);
            ChainError::CorruptTokenMetadata {
                token: token.to_string(),
                reason: other.to_string(),
            }
        }
    }
}
