use std::collections::BTreeMap;

use alloy_primitives::{Address, B256, U256};
use tally_acct_types::{Amount, LedgerError, LedgerResult};
use tally_sig::SigningDomain;

use crate::{
    checkpoint::{Checkpoint, CheckpointLog},
    context::CallContext,
    params::TokenParams,
};

/// In-memory ledger instance.
///
/// One value owns the whole state; the host serializes calls against it.
/// Accounts are implicit: any address reads as zero balance, zero allowance,
/// zero nonce, and no delegate until an operation first touches it. The
/// checkpoint logs are an audit trail for the life of the instance and only
/// ever grow.
#[derive(Clone, Debug)]
pub struct TokenLedger {
    params: TokenParams,
    domain: SigningDomain,
    total_supply: Amount,
    pub(crate) balances: BTreeMap<Address, Amount>,
    pub(crate) allowances: BTreeMap<(Address, Address), Amount>,
    pub(crate) nonces: BTreeMap<Address, u64>,
    pub(crate) delegates: BTreeMap<Address, Address>,
    pub(crate) checkpoints: BTreeMap<Address, CheckpointLog>,
}

impl TokenLedger {
    /// Creates the instance and mints the fixed supply to the genesis
    /// holder. Fails if the supply exceeds 96 bits or the holder is the
    /// null address.
    pub fn new(params: TokenParams) -> LedgerResult<Self> {
        let total_supply = Amount::from_wide(U256::from(params.total_supply))?;
        if params.genesis_holder.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        let domain = SigningDomain::new(&params.name, params.chain_id, params.verifying_contract);

        let mut balances = BTreeMap::new();
        balances.insert(params.genesis_holder, total_supply);

        Ok(Self {
            params,
            domain,
            total_supply,
            balances,
            allowances: BTreeMap::new(),
            nonces: BTreeMap::new(),
            delegates: BTreeMap::new(),
            checkpoints: BTreeMap::new(),
        })
    }

    pub fn params(&self) -> &TokenParams {
        &self.params
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    pub fn symbol(&self) -> &str {
        &self.params.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.params.decimals
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Typed-data domain separator derived at construction.
    pub fn domain_separator(&self) -> B256 {
        self.domain.separator()
    }

    pub(crate) fn domain(&self) -> &SigningDomain {
        &self.domain
    }

    pub fn balance_of(&self, account: Address) -> Amount {
        self.balances.get(&account).copied().unwrap_or(Amount::ZERO)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Next nonce a signature-authorized operation from `account` must
    /// carry.
    pub fn nonce_of(&self, account: Address) -> u64 {
        self.nonces.get(&account).copied().unwrap_or(0)
    }

    /// Current vote delegate; the zero address means votes are untracked.
    pub fn delegate_of(&self, account: Address) -> Address {
        self.delegates.get(&account).copied().unwrap_or(Address::ZERO)
    }

    /// Weight of `account` as of the latest checkpoint, zero if it was
    /// never a tracked delegate.
    pub fn current_votes(&self, account: Address) -> Amount {
        self.checkpoints
            .get(&account)
            .map_or(Amount::ZERO, |log| log.latest_votes())
    }

    /// Weight of `account` as of `block`. Only strictly historical blocks
    /// are determined.
    pub fn prior_votes(
        &self,
        ctx: &CallContext,
        account: Address,
        block: u64,
    ) -> LedgerResult<Amount> {
        if block >= ctx.block_number() {
            return Err(LedgerError::NotYetDetermined);
        }
        Ok(self
            .checkpoints
            .get(&account)
            .map_or(Amount::ZERO, |log| log.votes_at(block)))
    }

    pub fn num_checkpoints(&self, account: Address) -> usize {
        self.checkpoints.get(&account).map_or(0, |log| log.len())
    }

    pub fn checkpoint(&self, account: Address, index: usize) -> Option<Checkpoint> {
        self.checkpoints.get(&account)?.get(index)
    }
}
