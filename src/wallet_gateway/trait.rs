use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::*;
use crate::primitives::{Address, Amount, Identity, TransactionHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationOutcome {
    Confirmed,
    Failed,
    TimedOut,
}

/// An externally owned wallet. Key material never leaves it; the orchestrator only
/// asks it to sign and submit.
#[async_trait]
pub trait WalletGateway: Send + Sync + 'static {
    async fn public_identity(&self) -> Result<Identity, WalletGatewayError>;

    async fn submit_signed_transfer(
        &self,
        amount: &Amount,
        destination: &Address,
    ) -> Result<TransactionHandle, WalletGatewayError>;

    async fn await_confirmation(
        &self,
        handle: &TransactionHandle,
    ) -> Result<ConfirmationOutcome, WalletGatewayError>;
}
