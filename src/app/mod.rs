mod config;
pub mod error;

use std::sync::Arc;

use crate::{
    auth::AuthContext,
    primitives::Identity,
    scoring::{ScoreClient, ScoreService, StandingRecord},
    settlement::SettlementOrchestrator,
    wallet_gateway::RemoteWalletGateway,
};
pub use config::*;
use error::ApplicationError;

/// Wires the wallet bridge and scoring service into a settlement dialog.
pub struct SettlementApp {
    orchestrator: SettlementOrchestrator,
    scores: Arc<ScoreClient>,
}

impl SettlementApp {
    pub fn new(config: AppConfig, auth: AuthContext) -> Result<Self, ApplicationError> {
        if config.settlement.custody_address.as_str().trim().is_empty() {
            return Err(ApplicationError::MissingCustodyAddress);
        }
        let wallet = Arc::new(RemoteWalletGateway::new(config.wallet)?);
        let scores = Arc::new(ScoreClient::new(config.scoring)?);
        let orchestrator =
            SettlementOrchestrator::new(config.settlement, wallet, scores.clone(), auth);
        Ok(Self {
            orchestrator,
            scores,
        })
    }

    pub fn orchestrator(&self) -> &SettlementOrchestrator {
        &self.orchestrator
    }

    pub async fn lookup_standing(
        &self,
        identity: &Identity,
    ) -> Result<Option<StandingRecord>, ApplicationError> {
        Ok(self.scores.fetch_standing(identity).await?)
    }
}
