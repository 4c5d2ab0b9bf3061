use thiserror::Error;

use crate::{scoring::error::ScoreServiceError, wallet_gateway::WalletGatewayError};

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("ApplicationError - WalletGateway: {0}")]
    WalletGateway(#[from] WalletGatewayError),
    #[error("ApplicationError - ScoreService: {0}")]
    ScoreService(#[from] ScoreServiceError),
    #[error("ApplicationError - MissingCustodyAddress: settlement.custody_address is not set")]
    MissingCustodyAddress,
}
