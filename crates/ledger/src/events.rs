use alloy_primitives::Address;
use tally_acct_types::Amount;

/// Notifications emitted by successful state-changing calls.
///
/// Each call returns the events it produced, in emission order; delivery to
/// external indexers is the host's concern. A failed call emits nothing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LedgerEvent {
    /// Value moved between accounts.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },

    /// An allowance was set; carries the stored (possibly capped) value.
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },

    /// An account picked a new vote delegate. The zero address stands for
    /// "no delegate" on either side.
    DelegateChanged {
        delegator: Address,
        from_delegate: Address,
        to_delegate: Address,
    },

    /// A tracked delegate's checkpointed weight changed.
    DelegateVotesChanged {
        delegate: Address,
        previous_votes: Amount,
        new_votes: Amount,
    },
}
