use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletGatewayError {
    #[error("WalletGatewayError - Unavailable: {0}")]
    Unavailable(String),
    #[error("WalletGatewayError - UserRejected")]
    UserRejected,
    #[error("WalletGatewayError - SubmissionFailed: {0}")]
    SubmissionFailed(String),
    #[error("WalletGatewayError - RemoteCallFailure: {0}")]
    RemoteCallFailure(String),
    #[error("WalletGatewayError - CouldNotBuildClient: {0}")]
    CouldNotBuildClient(#[from] reqwest::Error),
}
