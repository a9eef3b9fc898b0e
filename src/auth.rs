//! Address list authorisation
//!
//! The registry contract only accepts `launch` calls whose address list is
//! signed by a signer it trusts. The encoding below has to match the on-chain
//! verifier byte for byte:
//!
//! 1. `abi.encode(address[])` - offset word, length word, one left-padded word
//!    per address, in the order given
//! 2. `keccak256` over the encoding
//! 3. EIP-191 personal-message signature over the 32 digest bytes, i.e.
//!    `"\x19Ethereum Signed Message:\n32" || digest` is what actually gets signed
//!
//! The list is never sorted or deduplicated: reordering changes the digest.

use crate::errors::{AuthorizationError, AuthorizationResult};
use crate::types::AuthorizationProof;
use alloy::primitives::{keccak256, Address, Bytes, Signature, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use alloy::sol_types::SolValue;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Signs verified-address lists with the service's launch key
///
/// The key is parsed once and is read-only afterwards.
pub struct AddressAuthorizer {
    signer: PrivateKeySigner,
}

impl AddressAuthorizer {
    /// Parse a hex private key (with or without `0x`)
    pub fn from_private_key(private_key: &str) -> AuthorizationResult<Self> {
        let private_key = private_key.trim();
        if private_key.is_empty() {
            return Err(AuthorizationError::KeyMisconfigured(
                "no signing key configured".to_string(),
            ));
        }
        let signer = PrivateKeySigner::from_str(private_key).map_err(|e| {
            AuthorizationError::KeyMisconfigured(format!("unusable signing key: {}", e))
        })?;
        Ok(Self { signer })
    }

    /// Address the registry contract must trust for proofs to verify
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Produce a proof for `addresses`
    ///
    /// Rejects an empty list before any signing happens.
    pub fn authorize(&self, addresses: &[Address]) -> AuthorizationResult<AuthorizationProof> {
        if addresses.is_empty() {
            return Err(AuthorizationError::InvalidInput(
                "address list is empty".to_string(),
            ));
        }

        let message_hash = address_list_hash(addresses);
        let signature = self
            .signer
            .sign_message_sync(message_hash.as_slice())
            .map_err(|e| AuthorizationError::SigningFailed(e.to_string()))?;

        debug!(
            "Signed {} address(es), message hash {}",
            addresses.len(),
            message_hash
        );

        Ok(AuthorizationProof {
            message_hash,
            signature: Bytes::copy_from_slice(&signature.as_bytes()),
        })
    }

    /// Parse hex addresses, then [`authorize`](Self::authorize) them
    pub fn authorize_strings(&self, addresses: &[String]) -> AuthorizationResult<AuthorizationProof> {
        let parsed = addresses
            .iter()
            .map(|raw| {
                Address::from_str(raw.trim()).map_err(|e| {
                    AuthorizationError::InvalidInput(format!("invalid address {:?}: {}", raw, e))
                })
            })
            .collect::<AuthorizationResult<Vec<_>>>()?;
        self.authorize(&parsed)
    }
}

impl fmt::Debug for AddressAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressAuthorizer")
            .field("signer", &self.signer_address())
            .finish_non_exhaustive()
    }
}

/// Canonical `abi.encode(address[])` of the list
pub fn encode_address_list(addresses: &[Address]) -> Vec<u8> {
    (addresses.to_vec(),).abi_encode_params()
}

/// keccak256 of [`encode_address_list`]
pub fn address_list_hash(addresses: &[Address]) -> B256 {
    keccak256(encode_address_list(addresses))
}

/// Recover the signer of a proof the way the on-chain verifier does
pub fn recover_signer(proof: &AuthorizationProof) -> AuthorizationResult<Address> {
    let signature = Signature::try_from(proof.signature.as_ref())
        .map_err(|e| AuthorizationError::InvalidInput(format!("malformed signature: {}", e)))?;
    signature
        .recover_address_from_msg(proof.message_hash.as_slice())
        .map_err(|e| AuthorizationError::InvalidInput(format!("unrecoverable signature: {}", e)))
}

/// Check that `proof` covers exactly `addresses` and was made by `expected_signer`
pub fn verify_proof(
    proof: &AuthorizationProof,
    addresses: &[Address],
    expected_signer: Address,
) -> bool {
    if proof.message_hash != address_list_hash(addresses) {
        return false;
    }
    matches!(recover_signer(proof), Ok(signer) if signer == expected_signer)
}
