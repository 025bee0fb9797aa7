use std::fmt;

use alloy_primitives::U256;

use crate::errors::{LedgerError, LedgerResult};

type RawAmount = u128;

/// Describes a token quantity limited to 96 bits.
///
/// Balances, allowances, and checkpointed vote weights all use this width.
/// [`Amount::MAX`] doubles as the unlimited-allowance sentinel: transfers
/// authorized against it never decrement it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Amount(RawAmount);

impl Amount {
    /// Largest representable quantity, `2^96 - 1`.
    pub const MAX: Amount = Amount((1 << 96) - 1);

    pub const ZERO: Amount = Amount(0);

    /// Wraps a raw value, panicking if it exceeds 96 bits.
    ///
    /// Intended for literals and values already bounded by the width
    /// invariant; external inputs go through [`Amount::from_wide`].
    pub const fn new(v: RawAmount) -> Self {
        assert!(v >> 96 == 0, "amount exceeds 96 bits");
        Self(v)
    }

    /// Converts a wide external value, failing if it exceeds 96 bits.
    pub fn from_wide(v: U256) -> LedgerResult<Self> {
        let raw = RawAmount::try_from(v).map_err(|_| LedgerError::Overflow)?;
        if raw > Self::MAX.0 {
            return Err(LedgerError::Overflow);
        }
        Ok(Self(raw))
    }

    /// Widens back to the external representation.
    pub fn to_wide(self) -> U256 {
        U256::from(self.0)
    }

    pub const fn to_raw(self) -> RawAmount {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition staying within 96 bits.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        let sum = self.0.checked_add(rhs.0)?;
        (sum <= Self::MAX.0).then_some(Amount(sum))
    }

    /// Checked subtraction.
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(v as RawAmount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
