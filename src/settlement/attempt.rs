use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::error::{ErrorKind, SettlementError};
use crate::{
    primitives::*, scoring::StandingRecord, wallet_gateway::ConfirmationOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    None,
    Confirm,
    Loading,
    DepositResult,
    WithdrawResult,
    Error,
}

impl DialogState {
    /// An attempt is in flight and a new one must not start.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Confirm | Self::Loading)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::DepositResult | Self::WithdrawResult | Self::Error
        )
    }

    fn result_for(action: ActionKind) -> Self {
        match action {
            ActionKind::Deposit => Self::DepositResult,
            ActionKind::Withdraw => Self::WithdrawResult,
        }
    }
}

/// Proof that the ledger confirmed a submitted transfer. Result states can only be
/// entered with one of these.
#[derive(Debug)]
pub struct ConfirmedTransfer {
    handle: TransactionHandle,
}

impl ConfirmedTransfer {
    pub(super) fn from_outcome(
        handle: TransactionHandle,
        outcome: ConfirmationOutcome,
        timeout: std::time::Duration,
    ) -> Result<Self, SettlementError> {
        match outcome {
            ConfirmationOutcome::Confirmed => Ok(Self { handle }),
            ConfirmationOutcome::Failed => Err(SettlementError::ConfirmationFailed(handle)),
            ConfirmationOutcome::TimedOut => Err(SettlementError::ConfirmationTimedOut(timeout)),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) enum StandingLookup {
    Found(StandingRecord),
    NotFound,
    Unavailable,
}

/// Everything the background part of an attempt needs, frozen when the user confirms.
#[derive(Debug, Clone)]
pub(super) struct SettlementRequest {
    pub attempt_id: AttemptId,
    pub action: ActionKind,
    pub amount: Amount,
    pub identity: Identity,
}

#[derive(Builder, Clone, Debug)]
pub struct NewSettlementAttempt {
    action: ActionKind,
    #[builder(default)]
    amount: Option<Amount>,
    #[builder(default)]
    identity: Option<Identity>,
}

impl NewSettlementAttempt {
    pub fn builder() -> NewSettlementAttemptBuilder {
        NewSettlementAttemptBuilder::default()
    }
}

#[derive(Debug, Clone)]
pub struct SettlementAttempt {
    id: AttemptId,
    action: ActionKind,
    amount: Option<Amount>,
    identity: Option<Identity>,
    state: DialogState,
    error: Option<ErrorKind>,
    transaction: Option<TransactionHandle>,
    standing: Option<StandingRecord>,
    scoring_degraded: bool,
    created_at: DateTime<Utc>,
}

impl From<NewSettlementAttempt> for SettlementAttempt {
    fn from(new: NewSettlementAttempt) -> Self {
        Self {
            id: AttemptId::new(),
            action: new.action,
            amount: new.amount,
            identity: new.identity,
            state: DialogState::None,
            error: None,
            transaction: None,
            standing: None,
            scoring_degraded: false,
            created_at: Utc::now(),
        }
    }
}

impl SettlementAttempt {
    pub fn id(&self) -> AttemptId {
        self.id
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(super) fn ask_for_confirmation(&mut self) {
        if self.state == DialogState::None && self.amount.is_some() && self.identity.is_some() {
            self.state = DialogState::Confirm;
        }
    }

    /// Moves to `Loading` and freezes the amount. `None` unless the attempt is waiting
    /// for confirmation.
    pub(super) fn begin_loading(&mut self) -> Option<SettlementRequest> {
        if self.state != DialogState::Confirm {
            return None;
        }
        let request = SettlementRequest {
            attempt_id: self.id,
            action: self.action,
            amount: self.amount?,
            identity: self.identity.clone()?,
        };
        self.state = DialogState::Loading;
        Some(request)
    }

    pub(super) fn complete(&mut self, transfer: ConfirmedTransfer, standing: StandingLookup) {
        if self.state != DialogState::Loading {
            return;
        }
        self.state = DialogState::result_for(self.action);
        self.transaction = Some(transfer.handle);
        match standing {
            StandingLookup::Found(record) => self.standing = Some(record),
            StandingLookup::NotFound => self.standing = None,
            StandingLookup::Unavailable => {
                self.standing = None;
                self.scoring_degraded = true;
            }
        }
    }

    pub(super) fn fail(&mut self, kind: ErrorKind) {
        self.state = DialogState::Error;
        self.error = Some(kind);
    }

    pub fn snapshot(&self) -> DialogSnapshot {
        DialogSnapshot {
            attempt_id: Some(self.id),
            state: self.state,
            action: Some(self.action),
            amount: self.amount,
            error: self.error,
            transaction: self.transaction.clone(),
            standing: self.standing.clone(),
            scoring_degraded: self.scoring_degraded,
        }
    }
}

/// What the rendering layer needs to draw the current dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogSnapshot {
    pub attempt_id: Option<AttemptId>,
    pub state: DialogState,
    pub action: Option<ActionKind>,
    pub amount: Option<Amount>,
    pub error: Option<ErrorKind>,
    pub transaction: Option<TransactionHandle>,
    pub standing: Option<StandingRecord>,
    pub scoring_degraded: bool,
}

impl DialogSnapshot {
    pub fn closed() -> Self {
        Self {
            attempt_id: None,
            state: DialogState::None,
            action: None,
            amount: None,
            error: None,
            transaction: None,
            standing: None,
            scoring_degraded: false,
        }
    }

    pub fn points(&self) -> Option<i64> {
        self.standing.as_ref().map(|record| record.points)
    }
}
