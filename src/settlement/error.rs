use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::{fmt, time::Duration};

use crate::{
    amount::error::AmountError, primitives::TransactionHandle,
    scoring::error::ScoreServiceError, wallet_gateway::WalletGatewayError,
};

/// What the user gets told when an attempt ends in the error dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidAmount,
    Unauthenticated,
    WalletUnavailable,
    UserRejected,
    SubmissionFailed,
    TimedOut,
    ScoringUnavailable,
}

impl ErrorKind {
    /// The transfer may or may not have reached the ledger. The user has to check the
    /// ledger before trying again.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::SubmissionFailed | Self::TimedOut)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidAmount => "the amount is not valid",
            Self::Unauthenticated => "no user is logged in",
            Self::WalletUnavailable => "the wallet is not connected",
            Self::UserRejected => "the transfer was rejected in the wallet",
            Self::SubmissionFailed => "the transfer could not be confirmed",
            Self::TimedOut => "the ledger did not confirm the transfer in time",
            Self::ScoringUnavailable => "points could not be loaded",
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("SettlementError - Amount: {0}")]
    Amount(#[from] AmountError),
    #[error("SettlementError - Unauthenticated")]
    Unauthenticated,
    #[error("SettlementError - WalletGateway: {0}")]
    WalletGateway(#[from] WalletGatewayError),
    #[error("SettlementError - ConfirmationWait: {0}")]
    ConfirmationWait(WalletGatewayError),
    #[error("SettlementError - ConfirmationFailed: {0}")]
    ConfirmationFailed(TransactionHandle),
    #[error("SettlementError - ConfirmationTimedOut: {0:?}")]
    ConfirmationTimedOut(Duration),
    #[error("SettlementError - ScoreService: {0}")]
    ScoreService(#[from] ScoreServiceError),
}

impl SettlementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Amount(_) => ErrorKind::InvalidAmount,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::WalletGateway(WalletGatewayError::Unavailable(_)) => {
                ErrorKind::WalletUnavailable
            }
            Self::WalletGateway(WalletGatewayError::UserRejected) => ErrorKind::UserRejected,
            Self::WalletGateway(_) => ErrorKind::SubmissionFailed,
            Self::ConfirmationWait(_) => ErrorKind::SubmissionFailed,
            Self::ConfirmationFailed(_) => ErrorKind::SubmissionFailed,
            Self::ConfirmationTimedOut(_) => ErrorKind::TimedOut,
            Self::ScoreService(_) => ErrorKind::ScoringUnavailable,
        }
    }
}
