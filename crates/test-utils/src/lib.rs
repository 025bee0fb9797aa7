//! Deterministic signing helpers for ledger tests.
//!
//! Keys are derived from a single seed byte so tests stay reproducible
//! without a randomness source.

use alloy_primitives::{Address, B256, keccak256};
use k256::ecdsa::SigningKey;
use tally_sig::Signature;

/// Deterministic secp256k1 signing key. `seed` must be nonzero.
pub fn signing_key(seed: u8) -> SigningKey {
    assert_ne!(seed, 0, "zero is not a valid scalar seed");
    let mut bytes = [0u8; 32];
    bytes[31] = seed;
    SigningKey::from_bytes(&bytes.into()).expect("nonzero seed scalar")
}

/// Keccak address of a signing key, as the ledger derives it.
pub fn address_of(key: &SigningKey) -> Address {
    let point = key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Signs a 32-byte digest, returning the ledger's detached form with the
/// 27/28 recovery id convention off-band tooling uses.
pub fn sign_digest(key: &SigningKey, digest: B256) -> Signature {
    let (sig, recid) = key
        .sign_prehash_recoverable(digest.as_slice())
        .expect("prehash signing");
    let bytes = sig.to_bytes();
    Signature::new(
        B256::from_slice(&bytes[..32]),
        B256::from_slice(&bytes[32..]),
        recid.to_byte() + 27,
    )
}
