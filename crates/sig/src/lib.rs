//! Typed-data digest construction and detached-signature recovery.
//!
//! Everything here is pure with respect to ledger state: digests are
//! deterministic functions of a signing domain and a struct's fields, and
//! recovery maps `(digest, signature)` to the signing account. The ledger
//! layers nonce and deadline policy on top.

mod digest;
mod recover;

pub use digest::{DELEGATION_TYPEHASH, DOMAIN_TYPEHASH, PERMIT_TYPEHASH, SigningDomain};
pub use recover::{Signature, recover_signer};
