//! End-to-end vote-history scenarios driven through the public surface,
//! with digests rebuilt externally the way off-band signing tooling would.

use alloy_primitives::{Address, U256};
use tally_acct_types::{Amount, LedgerError};
use tally_ledger::{CallContext, LedgerEvent, TokenLedger, TokenParams};
use tally_sig::SigningDomain;
use tally_test_utils::{address_of, sign_digest, signing_key};

const ONE: u128 = 10u128.pow(18);
const SUPPLY: u128 = 200_000_000 * ONE;

fn deployer() -> Address {
    Address::from([0x11; 20])
}

fn a1() -> Address {
    Address::from([0xa1; 20])
}

fn a2() -> Address {
    Address::from([0xa2; 20])
}

fn other0() -> Address {
    Address::from([0x50; 20])
}

fn other1() -> Address {
    Address::from([0x51; 20])
}

fn params() -> TokenParams {
    TokenParams {
        name: "Tally".to_owned(),
        symbol: "TLY".to_owned(),
        decimals: 18,
        chain_id: 31_337,
        verifying_contract: Address::from([0x77; 20]),
        total_supply: SUPPLY,
        genesis_holder: deployer(),
    }
}

fn ledger() -> TokenLedger {
    TokenLedger::new(params()).expect("genesis")
}

/// The signing domain as external tooling rebuilds it from public facts.
fn external_domain() -> SigningDomain {
    SigningDomain::new("Tally", 31_337, Address::from([0x77; 20]))
}

fn ctx(block: u64, timestamp: u64) -> CallContext {
    CallContext::new(block, timestamp)
}

fn units(n: u64) -> U256 {
    U256::from(n as u128 * ONE)
}

fn amount(n: u64) -> Amount {
    Amount::new(n as u128 * ONE)
}

#[test]
fn nested_delegation() {
    let mut ledger = ledger();
    ledger
        .transfer(&ctx(1, 1), deployer(), other0(), units(1))
        .expect("transfer");
    ledger
        .transfer(&ctx(1, 1), deployer(), other1(), units(2))
        .expect("transfer");

    assert_eq!(ledger.current_votes(other0()), Amount::ZERO);
    assert_eq!(ledger.current_votes(other1()), Amount::ZERO);

    // other0 delegates to other1.
    let events = ledger
        .delegate(&ctx(2, 2), other0(), other1())
        .expect("delegate");
    assert_eq!(
        events,
        vec![
            LedgerEvent::DelegateChanged {
                delegator: other0(),
                from_delegate: Address::ZERO,
                to_delegate: other1(),
            },
            LedgerEvent::DelegateVotesChanged {
                delegate: other1(),
                previous_votes: Amount::ZERO,
                new_votes: amount(1),
            },
        ]
    );
    assert_eq!(ledger.current_votes(other0()), Amount::ZERO);
    assert_eq!(ledger.current_votes(other1()), amount(1));

    // other1 self-delegates on top.
    ledger
        .delegate(&ctx(3, 3), other1(), other1())
        .expect("delegate");
    assert_eq!(ledger.current_votes(other1()), amount(3));

    // other1 redirects its own weight to the deployer, keeping other0's.
    let events = ledger
        .delegate(&ctx(4, 4), other1(), deployer())
        .expect("delegate");
    assert_eq!(
        events,
        vec![
            LedgerEvent::DelegateChanged {
                delegator: other1(),
                from_delegate: other1(),
                to_delegate: deployer(),
            },
            LedgerEvent::DelegateVotesChanged {
                delegate: other1(),
                previous_votes: amount(3),
                new_votes: amount(1),
            },
            LedgerEvent::DelegateVotesChanged {
                delegate: deployer(),
                previous_votes: Amount::ZERO,
                new_votes: amount(2),
            },
        ]
    );
    assert_eq!(ledger.current_votes(other1()), amount(1));
    assert_eq!(ledger.current_votes(deployer()), amount(2));
}

#[test]
fn checkpoint_count_tracks_weight_changes() {
    let mut ledger = ledger();
    let delegator = other0();
    ledger
        .transfer(&ctx(1, 1), deployer(), delegator, units(100))
        .expect("fund");
    assert_eq!(ledger.num_checkpoints(a1()), 0);

    ledger.delegate(&ctx(2, 2), delegator, a1()).expect("delegate");
    assert_eq!(ledger.num_checkpoints(a1()), 1);

    ledger
        .transfer(&ctx(3, 3), delegator, a2(), units(10))
        .expect("transfer");
    assert_eq!(ledger.num_checkpoints(a1()), 2);

    ledger
        .transfer(&ctx(4, 4), delegator, a2(), units(10))
        .expect("transfer");
    assert_eq!(ledger.num_checkpoints(a1()), 3);

    ledger
        .transfer(&ctx(5, 5), deployer(), delegator, units(20))
        .expect("transfer");
    assert_eq!(ledger.num_checkpoints(a1()), 4);

    let weights = [(2, 100), (3, 90), (4, 80), (5, 100)];
    for (i, (block, weight)) in weights.into_iter().enumerate() {
        let cp = ledger.checkpoint(a1(), i).expect("checkpoint");
        assert_eq!(cp.from_block(), block);
        assert_eq!(cp.votes(), amount(weight));
    }
}

#[test]
fn same_block_writes_leave_one_checkpoint() {
    let mut ledger = ledger();
    let delegator = other0();
    ledger
        .transfer(&ctx(1, 1), deployer(), delegator, units(100))
        .expect("fund");
    assert_eq!(ledger.num_checkpoints(a1()), 0);

    // Delegation and two transfers land in the same block.
    let block2 = ctx(2, 2);
    ledger.delegate(&block2, delegator, a1()).expect("delegate");
    ledger
        .transfer(&block2, delegator, a2(), units(10))
        .expect("transfer");
    ledger
        .transfer(&block2, delegator, a2(), units(10))
        .expect("transfer");

    assert_eq!(ledger.num_checkpoints(a1()), 1);
    let cp = ledger.checkpoint(a1(), 0).expect("checkpoint");
    assert_eq!(cp.from_block(), 2);
    assert_eq!(cp.votes(), amount(80));
    assert_eq!(ledger.checkpoint(a1(), 1), None);

    // The next block appends normally.
    ledger
        .transfer(&ctx(3, 3), deployer(), delegator, units(20))
        .expect("transfer");
    assert_eq!(ledger.num_checkpoints(a1()), 2);
    let cp = ledger.checkpoint(a1(), 1).expect("checkpoint");
    assert_eq!(cp.from_block(), 3);
    assert_eq!(cp.votes(), amount(100));
}

#[test]
fn prior_votes_reverts_for_unsettled_blocks() {
    let ledger = ledger();
    let now = ctx(100, 100);

    assert_eq!(
        ledger.prior_votes(&now, a1(), 100).unwrap_err(),
        LedgerError::NotYetDetermined
    );
    assert_eq!(
        ledger.prior_votes(&now, a1(), 50_000_000_000).unwrap_err(),
        LedgerError::NotYetDetermined
    );
}

#[test]
fn prior_votes_without_checkpoints_is_zero() {
    let ledger = ledger();
    let now = ctx(100, 100);
    assert_eq!(ledger.prior_votes(&now, a1(), 0), Ok(Amount::ZERO));
}

#[test]
fn prior_votes_tracks_checkpoint_history() {
    let mut ledger = ledger();

    // Weight history for a1: full supply from block 2, minus 10 at block 4,
    // minus another 10 at block 6, restored at block 8.
    ledger.delegate(&ctx(2, 2), deployer(), a1()).expect("delegate");
    ledger
        .transfer(&ctx(4, 4), deployer(), a2(), units(10))
        .expect("transfer");
    ledger
        .transfer(&ctx(6, 6), deployer(), a2(), units(10))
        .expect("transfer");
    ledger
        .transfer(&ctx(8, 8), a2(), deployer(), units(20))
        .expect("transfer");

    let now = ctx(10, 10);
    let supply = Amount::new(SUPPLY);

    assert_eq!(ledger.prior_votes(&now, a1(), 1), Ok(Amount::ZERO));
    assert_eq!(ledger.prior_votes(&now, a1(), 2), Ok(supply));
    assert_eq!(ledger.prior_votes(&now, a1(), 3), Ok(supply));
    assert_eq!(
        ledger.prior_votes(&now, a1(), 4),
        Ok(Amount::new(SUPPLY - 10 * ONE))
    );
    assert_eq!(
        ledger.prior_votes(&now, a1(), 5),
        Ok(Amount::new(SUPPLY - 10 * ONE))
    );
    assert_eq!(
        ledger.prior_votes(&now, a1(), 6),
        Ok(Amount::new(SUPPLY - 20 * ONE))
    );
    assert_eq!(
        ledger.prior_votes(&now, a1(), 7),
        Ok(Amount::new(SUPPLY - 20 * ONE))
    );
    assert_eq!(ledger.prior_votes(&now, a1(), 8), Ok(supply));
    assert_eq!(ledger.prior_votes(&now, a1(), 9), Ok(supply));
}

#[test]
fn delegate_by_sig_on_behalf_of_signatory() {
    let mut ledger = ledger();
    let key = signing_key(7);
    let signer = address_of(&key);

    // The signer holds the whole supply.
    ledger
        .transfer(&ctx(1, 1), deployer(), signer, U256::from(SUPPLY))
        .expect("fund signer");

    let expiry = 10_000_000_000;
    let digest = external_domain().delegation_digest(signer, 0, expiry);
    let sig = sign_digest(&key, digest);

    let events = ledger
        .delegate_by_sig(&ctx(2, 2), signer, 0, expiry, &sig)
        .expect("delegate by sig");

    assert_eq!(
        events,
        vec![
            LedgerEvent::DelegateChanged {
                delegator: signer,
                from_delegate: Address::ZERO,
                to_delegate: signer,
            },
            LedgerEvent::DelegateVotesChanged {
                delegate: signer,
                previous_votes: Amount::ZERO,
                new_votes: Amount::new(SUPPLY),
            },
        ]
    );
    assert_eq!(ledger.current_votes(signer), Amount::new(SUPPLY));
    assert_eq!(ledger.nonce_of(signer), 1);
}

#[test]
fn permit_then_spend_roundtrip() {
    let mut ledger = ledger();
    let key = signing_key(9);
    let owner = address_of(&key);
    let spender = other1();

    ledger
        .transfer(&ctx(1, 1), deployer(), owner, units(10))
        .expect("fund owner");

    let deadline = 10_000_000_000;
    let digest = external_domain().permit_digest(owner, spender, units(10), 0, deadline);
    let sig = sign_digest(&key, digest);

    // The externally rebuilt domain is byte-identical to the instance's.
    assert_eq!(external_domain().separator(), ledger.domain_separator());

    ledger
        .permit(&ctx(2, 2), owner, spender, units(10), deadline, &sig)
        .expect("permit");
    assert_eq!(ledger.nonce_of(owner), 1);

    ledger
        .transfer_from(&ctx(2, 2), spender, owner, a2(), units(10))
        .expect("spend");
    assert_eq!(ledger.balance_of(a2()), amount(10));
    assert_eq!(ledger.balance_of(owner), Amount::ZERO);
}
