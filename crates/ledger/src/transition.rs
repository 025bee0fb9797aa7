//! State-changing operations.
//!
//! Every operation is one atomic host call: all checks and checked
//! arithmetic complete before the first state write, so an error can never
//! leave a partial mutation behind. Successful calls return their events in
//! emission order.

use alloy_primitives::{Address, U256};
use tally_acct_types::{Amount, LedgerError, LedgerResult};
use tally_sig::{Signature, recover_signer};
use tracing::{debug, trace};

use crate::{context::CallContext, events::LedgerEvent, state::TokenLedger};

impl TokenLedger {
    /// Moves `raw_amount` from `from` to `to`, reassigning delegate weight
    /// along with the balance.
    pub fn transfer(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        raw_amount: U256,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let amount = Amount::from_wide(raw_amount)?;
        let mut events = Vec::new();
        self.transfer_tokens(ctx, from, to, amount, &mut events)?;
        Ok(events)
    }

    /// Sets `spender`'s allowance over `owner`'s balance.
    ///
    /// The wide maximum input is stored as the unlimited sentinel; any other
    /// value must fit the narrow width. The emitted approval carries the
    /// stored value.
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        raw_amount: U256,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let amount = capped_amount(raw_amount)?;
        self.allowances.insert((owner, spender), amount);
        Ok(vec![LedgerEvent::Approval {
            owner,
            spender,
            amount,
        }])
    }

    /// Moves tokens out of `from` on `spender`'s authority.
    ///
    /// An owner spending its own balance and a spender holding the
    /// unlimited sentinel both skip the allowance entirely: nothing is
    /// decremented and no approval is re-emitted.
    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        from: Address,
        to: Address,
        raw_amount: U256,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let amount = Amount::from_wide(raw_amount)?;
        let current = self.allowance(from, spender);
        let mut events = Vec::new();

        if spender == from || current == Amount::MAX {
            self.transfer_tokens(ctx, from, to, amount, &mut events)?;
            return Ok(events);
        }

        let remaining = current
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance)?;
        events.push(LedgerEvent::Approval {
            owner: from,
            spender,
            amount: remaining,
        });
        self.transfer_tokens(ctx, from, to, amount, &mut events)?;
        self.allowances.insert((from, spender), remaining);
        Ok(events)
    }

    /// Signature-authorized approval.
    ///
    /// The digest covers the raw wide `value` together with the owner's
    /// next nonce and the deadline; the stored allowance follows the same
    /// sentinel-cap rule as [`TokenLedger::approve`].
    pub fn permit(
        &mut self,
        ctx: &CallContext,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: u64,
        signature: &Signature,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let amount = capped_amount(value)?;
        let nonce = self.nonce_of(owner);
        let digest = self
            .domain()
            .permit_digest(owner, spender, value, nonce, deadline);
        let signer = recover_signer(digest, signature).ok_or(LedgerError::InvalidSignature)?;
        if signer != owner {
            return Err(LedgerError::Unauthorized);
        }
        if ctx.timestamp() > deadline {
            return Err(LedgerError::SignatureExpired);
        }

        self.nonces.insert(owner, nonce + 1);
        self.allowances.insert((owner, spender), amount);
        debug!(%owner, %spender, %amount, "permit consumed");
        Ok(vec![LedgerEvent::Approval {
            owner,
            spender,
            amount,
        }])
    }

    /// Reassigns `delegator`'s entire balance weight to `delegatee`.
    ///
    /// Delegating to the zero address stops the weight from being counted
    /// anywhere.
    pub fn delegate(
        &mut self,
        ctx: &CallContext,
        delegator: Address,
        delegatee: Address,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let mut events = Vec::new();
        self.delegate_votes(ctx, delegator, delegatee, &mut events)?;
        Ok(events)
    }

    /// Signature-authorized delegation.
    ///
    /// The stated `nonce` must equal the recovered signer's next nonce; a
    /// successful call consumes it. Failure order is observable: invalid
    /// signature, then nonce mismatch, then expiry.
    pub fn delegate_by_sig(
        &mut self,
        ctx: &CallContext,
        delegatee: Address,
        nonce: u64,
        expiry: u64,
        signature: &Signature,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let digest = self.domain().delegation_digest(delegatee, nonce, expiry);
        let signer = recover_signer(digest, signature).ok_or(LedgerError::InvalidSignature)?;
        if nonce != self.nonce_of(signer) {
            return Err(LedgerError::InvalidNonce);
        }
        if ctx.timestamp() > expiry {
            return Err(LedgerError::SignatureExpired);
        }

        let mut events = Vec::new();
        self.delegate_votes(ctx, signer, delegatee, &mut events)?;
        self.nonces.insert(signer, nonce + 1);
        Ok(events)
    }

    /// Debits `from`, credits `to`, and moves weight between their current
    /// delegates.
    fn transfer_tokens(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<LedgerEvent>,
    ) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        events.push(LedgerEvent::Transfer { from, to, amount });

        if from == to {
            // No net movement, but the balance check still applies.
            if amount > self.balance_of(from) {
                return Err(LedgerError::InsufficientBalance);
            }
            return Ok(());
        }

        let debited = self
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance)?;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.move_delegates(
            ctx,
            self.delegate_of(from),
            self.delegate_of(to),
            amount,
            events,
        )?;

        self.balances.insert(from, debited);
        self.balances.insert(to, credited);
        trace!(%from, %to, %amount, "tokens moved");
        Ok(())
    }

    /// Points `delegator` at `delegatee` and reassigns its balance weight.
    fn delegate_votes(
        &mut self,
        ctx: &CallContext,
        delegator: Address,
        delegatee: Address,
        events: &mut Vec<LedgerEvent>,
    ) -> LedgerResult<()> {
        let previous = self.delegate_of(delegator);
        let weight = self.balance_of(delegator);

        events.push(LedgerEvent::DelegateChanged {
            delegator,
            from_delegate: previous,
            to_delegate: delegatee,
        });
        self.move_delegates(ctx, previous, delegatee, weight, events)?;
        self.delegates.insert(delegator, delegatee);
        debug!(%delegator, from = %previous, to = %delegatee, "delegate changed");
        Ok(())
    }

    /// Moves `amount` of weight from `src`'s to `dst`'s checkpoint log.
    ///
    /// The zero address is untracked on either side. Both new weights are
    /// computed before either log is written.
    fn move_delegates(
        &mut self,
        ctx: &CallContext,
        src: Address,
        dst: Address,
        amount: Amount,
        events: &mut Vec<LedgerEvent>,
    ) -> LedgerResult<()> {
        if src == dst || amount.is_zero() {
            return Ok(());
        }

        let src_change = if src.is_zero() {
            None
        } else {
            let previous = self.current_votes(src);
            let new = previous
                .checked_sub(amount)
                .ok_or(LedgerError::Overflow)?;
            Some((src, previous, new))
        };
        let dst_change = if dst.is_zero() {
            None
        } else {
            let previous = self.current_votes(dst);
            let new = previous
                .checked_add(amount)
                .ok_or(LedgerError::Overflow)?;
            Some((dst, previous, new))
        };

        for (delegate, previous_votes, new_votes) in [src_change, dst_change].into_iter().flatten()
        {
            self.checkpoints
                .entry(delegate)
                .or_default()
                .record(ctx.block_number(), new_votes);
            events.push(LedgerEvent::DelegateVotesChanged {
                delegate,
                previous_votes,
                new_votes,
            });
        }
        Ok(())
    }
}

/// The stored form of a wide allowance input: the wide maximum becomes the
/// unlimited sentinel, everything else must fit the narrow width.
fn capped_amount(raw: U256) -> LedgerResult<Amount> {
    if raw == U256::MAX {
        Ok(Amount::MAX)
    } else {
        Amount::from_wide(raw)
    }
}
