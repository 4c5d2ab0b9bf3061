use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("AuthError - UnknownProvider: {0}")]
    UnknownProvider(String),
    #[error("AuthError - EmptyCredential")]
    EmptyCredential,
}
