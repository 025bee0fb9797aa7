use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

fn default_decimals() -> u8 {
    18
}

/// Genesis configuration for one ledger instance.
///
/// `name`, `chain_id`, and `verifying_contract` are bound into the
/// typed-data signing domain, so signatures produced for this instance are
/// not replayable against any other deployment. The whole supply is minted
/// to `genesis_holder` at construction and stays fixed for the life of the
/// instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenParams {
    /// Human-readable token name, also part of the signing domain.
    pub name: String,

    /// Ticker-style symbol.
    pub symbol: String,

    /// Display decimals. Defaults to 18.
    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Chain this instance is deployed on.
    pub chain_id: u64,

    /// Identity of this instance within the chain.
    pub verifying_contract: Address,

    /// Fixed total supply in base units.
    pub total_supply: u128,

    /// Account holding the whole supply at genesis.
    pub genesis_holder: Address,
}

impl TokenParams {
    /// Deserializes from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serializes to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
