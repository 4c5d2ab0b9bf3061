use tokio::sync::{watch, Mutex};
use tracing::instrument;

use std::sync::Arc;

use super::{attempt::*, config::SettlementConfig, error::SettlementError};
use crate::{
    amount,
    auth::AuthContext,
    points::PointsLedger,
    primitives::*,
    scoring::{ScoreService, StandingRecord},
    wallet_gateway::WalletGateway,
};

#[derive(Default)]
struct Dialog {
    attempt: Option<SettlementAttempt>,
    ledger: PointsLedger,
}

impl Dialog {
    fn state(&self) -> DialogState {
        self.attempt
            .as_ref()
            .map(|attempt| attempt.state())
            .unwrap_or(DialogState::None)
    }

    fn snapshot(&self) -> DialogSnapshot {
        self.attempt
            .as_ref()
            .map(SettlementAttempt::snapshot)
            .unwrap_or_else(DialogSnapshot::closed)
    }
}

struct Settlement {
    transfer: ConfirmedTransfer,
    standing: StandingLookup,
}

/// Drives one deposit/withdraw dialog.
///
/// Cloning is cheap and every clone drives the same dialog, so `confirm` can be
/// spawned while the rendering side keeps calling `dismiss` or `snapshot`.
#[derive(Clone)]
pub struct SettlementOrchestrator {
    dialog: Arc<Mutex<Dialog>>,
    snapshots: Arc<watch::Sender<DialogSnapshot>>,
    wallet: Arc<dyn WalletGateway>,
    scores: Arc<dyn ScoreService>,
    auth: AuthContext,
    config: SettlementConfig,
}

impl SettlementOrchestrator {
    pub fn new(
        config: SettlementConfig,
        wallet: Arc<dyn WalletGateway>,
        scores: Arc<dyn ScoreService>,
        auth: AuthContext,
    ) -> Self {
        let (snapshots, _) = watch::channel(DialogSnapshot::closed());
        Self {
            dialog: Arc::new(Mutex::new(Dialog::default())),
            snapshots: Arc::new(snapshots),
            wallet,
            scores,
            auth,
            config,
        }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> DialogSnapshot {
        self.dialog.lock().await.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<DialogSnapshot> {
        self.snapshots.subscribe()
    }

    /// Standing of the logged in user as of the last confirmed transfer.
    pub async fn standing(&self) -> Option<StandingRecord> {
        let identity = self.auth.identity()?;
        self.dialog
            .lock()
            .await
            .ledger
            .standing_for(&identity)
            .cloned()
    }

    /// Starts a new attempt from the action button. Ignored while another attempt is
    /// waiting for confirmation or loading.
    #[instrument(name = "settlement.invoke", skip(self, amount_text), fields(attempt_id, state))]
    pub async fn invoke(&self, action: ActionKind, amount_text: &str) -> DialogSnapshot {
        let mut dialog = self.dialog.lock().await;
        if dialog.state().is_busy() {
            tracing::debug!(state = ?dialog.state(), "attempt already in flight, ignoring invoke");
            return dialog.snapshot();
        }

        let identity = self.auth.identity();
        let amount = match &identity {
            Some(_) => amount::validate(amount_text, &self.config.amount_policy)
                .map_err(SettlementError::from),
            None => Err(SettlementError::Unauthenticated),
        };
        let new_attempt = NewSettlementAttempt::builder()
            .action(action)
            .amount(amount.as_ref().ok().copied())
            .identity(identity)
            .build()
            .expect("Couldn't build settlement attempt");
        let mut attempt = SettlementAttempt::from(new_attempt);
        match amount {
            Ok(_) => attempt.ask_for_confirmation(),
            Err(e) => {
                tracing::warn!(error = %e, "settlement attempt rejected");
                attempt.fail(e.kind());
            }
        }

        let span = tracing::Span::current();
        span.record("attempt_id", tracing::field::display(attempt.id()));
        span.record("state", tracing::field::debug(attempt.state()));

        dialog.attempt = Some(attempt);
        self.publish(&dialog)
    }

    /// The user confirmed. Submits the transfer and resolves the attempt.
    ///
    /// Runs to completion even if the dialog is dismissed in the meantime. The outcome
    /// of an attempt that is no longer the live one is dropped.
    #[instrument(
        name = "settlement.confirm",
        skip(self),
        fields(attempt_id, state, error, error.level, error.message)
    )]
    pub async fn confirm(&self) -> DialogSnapshot {
        let request = {
            let mut dialog = self.dialog.lock().await;
            let request = dialog.attempt.as_mut().and_then(|a| a.begin_loading());
            let Some(request) = request else {
                return dialog.snapshot();
            };
            self.publish(&dialog);
            request
        };
        tracing::Span::current().record(
            "attempt_id",
            tracing::field::display(request.attempt_id),
        );

        let result = self.settle(&request).await;

        let mut dialog = self.dialog.lock().await;
        let Dialog { attempt, ledger } = &mut *dialog;
        let live = attempt
            .as_mut()
            .filter(|a| a.id() == request.attempt_id && a.state() == DialogState::Loading);
        let Some(attempt) = live else {
            tracing::debug!(
                attempt_id = %request.attempt_id,
                "attempt was superseded, discarding its outcome"
            );
            return dialog.snapshot();
        };
        match result {
            Ok(Settlement { transfer, standing }) => {
                match &standing {
                    StandingLookup::Found(record) => {
                        ledger.apply(&request.identity, Some(record.clone()))
                    }
                    StandingLookup::NotFound => ledger.apply(&request.identity, None),
                    StandingLookup::Unavailable => (),
                }
                attempt.complete(transfer, standing);
            }
            Err(e) => {
                crate::tracing::insert_error_fields(tracing::Level::WARN, &e);
                attempt.fail(e.kind());
            }
        }
        tracing::Span::current().record("state", tracing::field::debug(attempt.state()));
        self.publish(&dialog)
    }

    /// Closes whatever dialog is open and forgets the attempt.
    #[instrument(name = "settlement.dismiss", skip(self))]
    pub async fn dismiss(&self) -> DialogSnapshot {
        let mut dialog = self.dialog.lock().await;
        if let Some(attempt) = dialog.attempt.take() {
            if attempt.state() == DialogState::Loading {
                tracing::info!(
                    attempt_id = %attempt.id(),
                    "dismissed while loading, transfer keeps running in the background"
                );
            }
        }
        self.publish(&dialog)
    }

    /// Ends the session. Any open dialog is closed and the previous user's standing is
    /// forgotten.
    #[instrument(name = "settlement.sign_out", skip(self))]
    pub async fn sign_out(&self) -> DialogSnapshot {
        let mut dialog = self.dialog.lock().await;
        self.auth.sign_out();
        dialog.attempt = None;
        dialog.ledger.clear();
        self.publish(&dialog)
    }

    #[instrument(
        name = "settlement.settle",
        skip(self, request),
        fields(
            attempt_id = %request.attempt_id,
            action = %request.action,
            amount = %request.amount,
            transaction
        ),
        err
    )]
    async fn settle(&self, request: &SettlementRequest) -> Result<Settlement, SettlementError> {
        let wallet_identity = self.wallet.public_identity().await?;
        let destination = match request.action {
            ActionKind::Deposit => self.config.custody_address.clone(),
            ActionKind::Withdraw => Address::from(wallet_identity),
        };

        let handle = self
            .wallet
            .submit_signed_transfer(&request.amount, &destination)
            .await?;
        tracing::Span::current().record("transaction", handle.as_str());

        let timeout = self.config.confirmation_timeout;
        let outcome = tokio::time::timeout(timeout, self.wallet.await_confirmation(&handle))
            .await
            .map_err(|_| SettlementError::ConfirmationTimedOut(timeout))?
            .map_err(SettlementError::ConfirmationWait)?;
        let transfer = ConfirmedTransfer::from_outcome(handle, outcome, timeout)?;

        // Only after confirmation, an earlier read could return the old standing.
        let standing = match self.scores.fetch_standing(&request.identity).await {
            Ok(Some(record)) => StandingLookup::Found(record),
            Ok(None) => StandingLookup::NotFound,
            Err(e) => {
                tracing::warn!(error = %e, "could not load standing after confirmed transfer");
                StandingLookup::Unavailable
            }
        };

        Ok(Settlement { transfer, standing })
    }

    fn publish(&self, dialog: &Dialog) -> DialogSnapshot {
        let snapshot = dialog.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}
