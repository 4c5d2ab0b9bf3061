mod client;
mod config;
pub mod error;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{points::PointsLedger, primitives::Identity};
pub use client::ScoreClient;
pub use config::ScoreClientConfig;
use error::ScoreServiceError;

/// A user's reward points as reported by the scoring service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRecord {
    pub identity: Identity,
    pub points: i64,
    pub display_name: String,
}

#[async_trait]
pub trait ScoreService: Send + Sync + 'static {
    async fn rankings(&self) -> Result<Vec<StandingRecord>, ScoreServiceError>;

    /// `Ok(None)` means the service answered but does not rank `identity` yet.
    async fn fetch_standing(
        &self,
        identity: &Identity,
    ) -> Result<Option<StandingRecord>, ScoreServiceError> {
        let rankings = self.rankings().await?;
        Ok(PointsLedger::reconcile(identity, rankings))
    }
}
