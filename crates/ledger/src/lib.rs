//! Transferable-value ledger with historical voting-weight checkpoints.
//!
//! Each account holds a 96-bit balance and may delegate its full balance
//! weight to another account. Tracked delegates accumulate weight in an
//! append-only checkpoint log, so the weight of any delegate can be queried
//! both currently and as of any strictly past block. Transfers, approvals,
//! and delegation can be authorized directly by the account owner or by a
//! detached typed-data signature (`permit`, `delegate_by_sig`).
//!
//! The host environment serializes all calls, supplies the block index and
//! timestamp per call, and consumes the events each successful call returns.
//! Every operation is atomic: a failed call leaves no partial writes.

mod checkpoint;
mod context;
mod events;
mod params;
mod state;
mod transition;

pub use checkpoint::{Checkpoint, CheckpointLog};
pub use context::CallContext;
pub use events::LedgerEvent;
pub use params::TokenParams;
pub use state::TokenLedger;
