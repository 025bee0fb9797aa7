use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger operation failures.
///
/// Every failure aborts its whole call with no partial writes; the caller
/// decides whether to resubmit.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum LedgerError {
    /// Transfer amount exceeds the sender's balance.
    #[error("transfer amount exceeds balance")]
    InsufficientBalance,

    /// Transfer amount exceeds the spender's remaining allowance.
    #[error("transfer amount exceeds spender allowance")]
    InsufficientAllowance,

    /// Quantity does not fit the 96-bit amount width.
    #[error("amount exceeds 96 bits")]
    Overflow,

    /// Transfers to the null address are rejected.
    #[error("cannot transfer to the zero address")]
    InvalidRecipient,

    /// Signature recovery failed or yielded the null identity.
    #[error("invalid signature")]
    InvalidSignature,

    /// Recovered signer does not match the stated owner.
    #[error("unauthorized")]
    Unauthorized,

    /// Signature nonce does not match the signer's next expected nonce.
    #[error("invalid nonce")]
    InvalidNonce,

    /// Signature deadline or expiry has passed.
    #[error("signature expired")]
    SignatureExpired,

    /// Historical vote queries must target a strictly past block.
    #[error("not yet determined")]
    NotYetDetermined,
}
