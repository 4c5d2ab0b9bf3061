use serde::{Deserialize, Serialize};

use std::time::Duration;

use crate::{amount::AmountPolicy, primitives::Address};

#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementConfig {
    #[serde(default)]
    pub amount_policy: AmountPolicy,
    #[serde(default = "default_custody_address")]
    pub custody_address: Address,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_confirmation_timeout")]
    pub confirmation_timeout: Duration,
    #[serde(default = "default_asset_symbol")]
    pub asset_symbol: String,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            amount_policy: AmountPolicy::default(),
            custody_address: default_custody_address(),
            confirmation_timeout: default_confirmation_timeout(),
            asset_symbol: default_asset_symbol(),
        }
    }
}

fn default_custody_address() -> Address {
    Address::from("")
}

fn default_confirmation_timeout() -> Duration {
    Duration::from_secs(90)
}

fn default_asset_symbol() -> String {
    "SOL".to_string()
}
