use serde::{Deserialize, Serialize};

use crate::{scoring::ScoreClientConfig, settlement::SettlementConfig, wallet_gateway::RemoteWalletConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settlement: SettlementConfig,
    #[serde(default)]
    pub wallet: RemoteWalletConfig,
    #[serde(default)]
    pub scoring: ScoreClientConfig,
}
