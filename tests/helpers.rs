#![allow(dead_code)]

use async_trait::async_trait;
use tokio::sync::Notify;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use settler::{
    auth::{AuthContext, LoginProvider, Session},
    primitives::*,
    scoring::{error::ScoreServiceError, ScoreService, StandingRecord},
    settlement::{SettlementConfig, SettlementOrchestrator},
    wallet_gateway::{ConfirmationOutcome, WalletGateway, WalletGatewayError},
};

pub const CUSTODY: &str = "Cust0dyVau1t1111111111111111111111111111111";
pub const WALLET_KEY: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

/// Shared record of every external call, in the order they happened.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, call: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(call))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Submit {
    Accept,
    Reject,
    Fail,
}

pub struct ScriptedWallet {
    log: CallLog,
    identity: Mutex<Option<Identity>>,
    submit: Mutex<Submit>,
    outcome: Mutex<Result<ConfirmationOutcome, String>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedWallet {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            identity: Mutex::new(Some(Identity::from(WALLET_KEY))),
            submit: Mutex::new(Submit::Accept),
            outcome: Mutex::new(Ok(ConfirmationOutcome::Confirmed)),
            gate: Mutex::new(None),
        }
    }

    pub fn disconnect(&self) {
        *self.identity.lock().unwrap() = None;
    }

    pub fn set_submit(&self, submit: Submit) {
        *self.submit.lock().unwrap() = submit;
    }

    pub fn set_outcome(&self, outcome: ConfirmationOutcome) {
        *self.outcome.lock().unwrap() = Ok(outcome);
    }

    /// The connection drops while waiting for the ledger.
    pub fn lose_connection_after_submit(&self) {
        *self.outcome.lock().unwrap() = Err("connection closed".to_string());
    }

    /// Confirmation waits until the returned gate is notified.
    pub fn hold_confirmation(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl WalletGateway for ScriptedWallet {
    async fn public_identity(&self) -> Result<Identity, WalletGatewayError> {
        self.log.push("public_identity");
        self.identity
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| WalletGatewayError::Unavailable("not connected".to_string()))
    }

    async fn submit_signed_transfer(
        &self,
        amount: &Amount,
        destination: &Address,
    ) -> Result<TransactionHandle, WalletGatewayError> {
        self.log.push(format!("submit {amount} {destination}"));
        let submit = *self.submit.lock().unwrap();
        match submit {
            Submit::Accept => Ok(TransactionHandle::from("5igNatur3")),
            Submit::Reject => Err(WalletGatewayError::UserRejected),
            Submit::Fail => Err(WalletGatewayError::SubmissionFailed(
                "node unreachable".to_string(),
            )),
        }
    }

    async fn await_confirmation(
        &self,
        handle: &TransactionHandle,
    ) -> Result<ConfirmationOutcome, WalletGatewayError> {
        self.log.push(format!("await_confirmation {handle}"));
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.log.push(format!("confirmation_done {handle}"));
        self.outcome
            .lock()
            .unwrap()
            .clone()
            .map_err(WalletGatewayError::Unavailable)
    }
}

pub struct ScriptedScores {
    log: CallLog,
    rankings: Mutex<Option<Vec<StandingRecord>>>,
}

impl ScriptedScores {
    pub fn new(log: CallLog, rankings: Vec<StandingRecord>) -> Self {
        Self {
            log,
            rankings: Mutex::new(Some(rankings)),
        }
    }

    pub fn unavailable(log: CallLog) -> Self {
        Self {
            log,
            rankings: Mutex::new(None),
        }
    }

    pub fn set_rankings(&self, rankings: Vec<StandingRecord>) {
        *self.rankings.lock().unwrap() = Some(rankings);
    }
}

#[async_trait]
impl ScoreService for ScriptedScores {
    async fn rankings(&self) -> Result<Vec<StandingRecord>, ScoreServiceError> {
        self.log.push("rankings");
        self.rankings
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ScoreServiceError::InvalidRecord("service unavailable".to_string()))
    }
}

pub fn record(identity: &str, points: i64) -> StandingRecord {
    StandingRecord {
        identity: Identity::from(identity),
        points,
        display_name: Identity::from(identity).abbreviated(),
    }
}

pub fn signed_in(identity: &str) -> AuthContext {
    AuthContext::with_session(Session {
        identity: Identity::from(identity),
        provider: LoginProvider::Wallet,
    })
}

pub fn settlement_config() -> SettlementConfig {
    SettlementConfig {
        custody_address: Address::from(CUSTODY),
        confirmation_timeout: Duration::from_secs(5),
        ..SettlementConfig::default()
    }
}

pub fn orchestrator(
    wallet: &Arc<ScriptedWallet>,
    scores: &Arc<ScriptedScores>,
    auth: AuthContext,
) -> SettlementOrchestrator {
    orchestrator_with_config(settlement_config(), wallet, scores, auth)
}

pub fn orchestrator_with_config(
    config: SettlementConfig,
    wallet: &Arc<ScriptedWallet>,
    scores: &Arc<ScriptedScores>,
    auth: AuthContext,
) -> SettlementOrchestrator {
    SettlementOrchestrator::new(config, wallet.clone(), scores.clone(), auth)
}
