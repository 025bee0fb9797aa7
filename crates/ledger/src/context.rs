/// Host-supplied execution context for one call.
///
/// The host serializes every call into a strict total order and hands the
/// ledger these values; both are monotonic across calls, and many
/// consecutive calls may share one block number.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CallContext {
    block_number: u64,
    timestamp: u64,
}

impl CallContext {
    pub fn new(block_number: u64, timestamp: u64) -> Self {
        Self {
            block_number,
            timestamp,
        }
    }

    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
