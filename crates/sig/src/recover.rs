use alloy_primitives::{Address, B256, keccak256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};

/// Detached 65-byte signature in `(r, s, v)` form.
///
/// `v` carries the recovery id, in either the bare 0/1 form or the
/// 27/28 form used by off-band signing tools; anything else fails recovery.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    r: B256,
    s: B256,
    v: u8,
}

impl Signature {
    pub fn new(r: B256, s: B256, v: u8) -> Self {
        Self { r, s, v }
    }

    pub fn r(&self) -> B256 {
        self.r
    }

    pub fn s(&self) -> B256 {
        self.s
    }

    pub fn v(&self) -> u8 {
        self.v
    }

    fn recovery_id(&self) -> Option<RecoveryId> {
        let raw = match self.v {
            0 | 1 => self.v,
            27 | 28 => self.v - 27,
            _ => return None,
        };
        RecoveryId::from_byte(raw)
    }
}

/// Recovers the account that signed `digest`.
///
/// Pure with respect to ledger state. Returns `None` for malformed scalars,
/// an unrecoverable point, an out-of-range `v`, or a recovery landing on the
/// null identity; the caller treats all of those as an invalid signature.
pub fn recover_signer(digest: B256, sig: &Signature) -> Option<Address> {
    let recid = sig.recovery_id()?;
    let ecdsa = EcdsaSignature::from_scalars(sig.r().0, sig.s().0).ok()?;
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &ecdsa, recid).ok()?;
    let addr = address_of_key(&key);
    (!addr.is_zero()).then_some(addr)
}

/// Keccak address derivation over the uncompressed public key.
fn address_of_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
