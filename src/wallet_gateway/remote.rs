use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use std::time::Duration;

use super::{error::*, r#trait::*};
use crate::primitives::{Address, Amount, Identity, TransactionHandle};

const API_KEY_HEADER: &str = "x-api-key";

#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteWalletConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    #[serde(default = "default_poll_interval")]
    pub poll_interval: Duration,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for RemoteWalletConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
            api_key: None,
        }
    }
}

fn default_url() -> String {
    "http://localhost:8899".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(500)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityResponse {
    public_key: String,
}

#[derive(Debug, Serialize)]
struct TransferRequest<'a> {
    amount: &'a Amount,
    destination: &'a Address,
}

#[derive(Debug, Deserialize)]
struct TransferResponse {
    signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransferStatus {
    Pending,
    Confirmed,
    Failed,
    Expired,
}

#[derive(Debug, Deserialize)]
struct TransferStatusResponse {
    status: TransferStatus,
}

/// Talks to a wallet bridge that holds the user's signing session.
pub struct RemoteWalletGateway {
    client: reqwest::Client,
    config: RemoteWalletConfig,
}

impl RemoteWalletGateway {
    pub fn new(config: RemoteWalletConfig) -> Result<Self, WalletGatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) if !key.is_empty() => request.header(API_KEY_HEADER, key),
            _ => request,
        }
    }

    async fn transfer_status(
        &self,
        handle: &TransactionHandle,
    ) -> Result<TransferStatus, WalletGatewayError> {
        let url = self.url(&format!("/v1/transfers/{handle}"));
        let resp = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| WalletGatewayError::RemoteCallFailure(e.to_string()))?;
        let status = resp
            .json::<TransferStatusResponse>()
            .await
            .map_err(|e| WalletGatewayError::RemoteCallFailure(e.to_string()))?;
        Ok(status.status)
    }
}

#[async_trait]
impl WalletGateway for RemoteWalletGateway {
    #[instrument(name = "wallet.public_identity", skip(self), err)]
    async fn public_identity(&self) -> Result<Identity, WalletGatewayError> {
        let resp = self
            .authorize(self.client.get(self.url("/v1/identity")))
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| WalletGatewayError::Unavailable(e.to_string()))?;
        let identity = resp
            .json::<IdentityResponse>()
            .await
            .map_err(|e| WalletGatewayError::Unavailable(e.to_string()))?;
        if identity.public_key.is_empty() {
            return Err(WalletGatewayError::Unavailable(
                "wallet is not connected".to_string(),
            ));
        }
        Ok(Identity::from(identity.public_key))
    }

    // Submission goes out exactly once. A retry could double spend.
    #[instrument(name = "wallet.submit_signed_transfer", skip(self), err)]
    async fn submit_signed_transfer(
        &self,
        amount: &Amount,
        destination: &Address,
    ) -> Result<TransactionHandle, WalletGatewayError> {
        let resp = self
            .authorize(self.client.post(self.url("/v1/transfers")))
            .json(&TransferRequest {
                amount,
                destination,
            })
            .send()
            .await
            .map_err(|e| WalletGatewayError::SubmissionFailed(e.to_string()))?;
        match resp.status() {
            StatusCode::FORBIDDEN => return Err(WalletGatewayError::UserRejected),
            status if !status.is_success() => {
                return Err(WalletGatewayError::SubmissionFailed(format!(
                    "wallet bridge responded with {status}"
                )))
            }
            _ => (),
        }
        let transfer = resp
            .json::<TransferResponse>()
            .await
            .map_err(|e| WalletGatewayError::SubmissionFailed(e.to_string()))?;
        Ok(TransactionHandle::from(transfer.signature))
    }

    #[instrument(name = "wallet.await_confirmation", skip(self), err)]
    async fn await_confirmation(
        &self,
        handle: &TransactionHandle,
    ) -> Result<ConfirmationOutcome, WalletGatewayError> {
        loop {
            match self.transfer_status(handle).await {
                Ok(TransferStatus::Confirmed) => return Ok(ConfirmationOutcome::Confirmed),
                Ok(TransferStatus::Failed) => return Ok(ConfirmationOutcome::Failed),
                Ok(TransferStatus::Expired) => return Ok(ConfirmationOutcome::TimedOut),
                Ok(TransferStatus::Pending) => (),
                Err(e) => tracing::warn!(error = %e, "transfer status poll failed"),
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
