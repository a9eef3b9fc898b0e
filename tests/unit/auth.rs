use crate::common::{test_authorizer, ADDR_A, ADDR_B, ADDR_C, TEST_SIGNER};
use alloy::primitives::{keccak256, Address};
use cast_launcher::auth::{address_list_hash, encode_address_list, recover_signer, verify_proof};
use cast_launcher::errors::AuthorizationError;

#[test]
fn test_hash_is_keccak_of_encoding() {
    let addresses = [ADDR_A, ADDR_B];
    assert_eq!(
        address_list_hash(&addresses),
        keccak256(encode_address_list(&addresses))
    );
}

#[test]
fn test_encoding_length_grows_one_word_per_address() {
    for count in 1..=4 {
        let addresses: Vec<Address> = std::iter::repeat(ADDR_C).take(count).collect();
        assert_eq!(encode_address_list(&addresses).len(), 64 + 32 * count);
    }
}

#[test]
fn test_proof_round_trip_preserves_order() {
    let authorizer = test_authorizer();
    let proof = authorizer.authorize(&[ADDR_A, ADDR_B]).unwrap();

    assert_eq!(authorizer.signer_address(), TEST_SIGNER);
    assert_eq!(recover_signer(&proof).unwrap(), TEST_SIGNER);
    assert!(verify_proof(&proof, &[ADDR_A, ADDR_B], TEST_SIGNER));
    assert!(!verify_proof(&proof, &[ADDR_B, ADDR_A], TEST_SIGNER));
    assert!(!verify_proof(&proof, &[ADDR_A], TEST_SIGNER));
}

#[test]
fn test_single_address_list() {
    let authorizer = test_authorizer();
    let proof = authorizer.authorize(&[ADDR_C]).unwrap();
    assert!(verify_proof(&proof, &[ADDR_C], TEST_SIGNER));
}

#[test]
fn test_empty_list_never_signed() {
    let authorizer = test_authorizer();
    assert!(matches!(
        authorizer.authorize(&[]),
        Err(AuthorizationError::InvalidInput(_))
    ));
    assert!(matches!(
        authorizer.authorize_strings(&[]),
        Err(AuthorizationError::InvalidInput(_))
    ));
}

#[test]
fn test_tampered_signature_fails_verification() {
    let authorizer = test_authorizer();
    let mut proof = authorizer.authorize(&[ADDR_A, ADDR_B]).unwrap();

    let mut bytes = proof.signature.to_vec();
    bytes[10] ^= 0xff;
    proof.signature = bytes.into();

    assert!(!verify_proof(&proof, &[ADDR_A, ADDR_B], TEST_SIGNER));
}
