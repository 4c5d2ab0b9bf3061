mod attempt;
mod config;
pub mod error;
mod orchestrator;

pub use attempt::{DialogSnapshot, DialogState, NewSettlementAttempt, SettlementAttempt};
pub use config::SettlementConfig;
pub use error::{ErrorKind, SettlementError};
pub use orchestrator::SettlementOrchestrator;
