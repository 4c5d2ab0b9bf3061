use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreServiceError {
    #[error("ScoreServiceError - CouldNotBuildClient: {0}")]
    CouldNotBuildClient(reqwest::Error),
    #[error("ScoreServiceError - Transport: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error("ScoreServiceError - UnexpectedStatus: {0}")]
    UnexpectedStatus(reqwest::StatusCode),
    #[error("ScoreServiceError - CouldNotReadResponseBody: {0}")]
    CouldNotReadResponseBody(reqwest::Error),
    #[error("ScoreServiceError - InvalidResponse: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("ScoreServiceError - InvalidRecord: {0}")]
    InvalidRecord(String),
}
