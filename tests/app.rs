use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use std::time::Duration;

use settler::{
    app::{error::ApplicationError, AppConfig, SettlementApp},
    auth::{self, AuthContext},
    primitives::*,
    scoring::ScoreClientConfig,
    settlement::{DialogState, SettlementConfig},
    wallet_gateway::RemoteWalletConfig,
};

const KEY: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

fn app_config(wallet: &MockServer, scores: &MockServer) -> AppConfig {
    AppConfig {
        settlement: SettlementConfig {
            custody_address: Address::from("custody"),
            confirmation_timeout: Duration::from_secs(5),
            ..SettlementConfig::default()
        },
        wallet: RemoteWalletConfig {
            url: wallet.uri(),
            poll_interval: Duration::from_millis(10),
            ..RemoteWalletConfig::default()
        },
        scoring: ScoreClientConfig {
            url: scores.uri(),
            number_of_retries: 0,
            ..ScoreClientConfig::default()
        },
    }
}

async fn mount_wallet(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/identity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "publicKey": KEY })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/transfers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "signature": "5ig" })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/transfers/5ig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "confirmed" })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn deposit_end_to_end() -> anyhow::Result<()> {
    let wallet = MockServer::start().await;
    let scores = MockServer::start().await;
    mount_wallet(&wallet).await;
    Mock::given(method("GET"))
        .and(path("/api/rankings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rankings": [
                { "identity": "4Nd1..DB4T", "points": 7, "displayName": "decoy" },
                { "identity": KEY, "points": 120, "displayName": "alice" }
            ]
        })))
        .mount(&scores)
        .await;

    let session = auth::handle_login("wallet", KEY)?;
    let app = SettlementApp::new(
        app_config(&wallet, &scores),
        AuthContext::with_session(session),
    )?;
    let orchestrator = app.orchestrator();

    let snapshot = orchestrator.invoke(ActionKind::Deposit, "0.005").await;
    assert_eq!(snapshot.state, DialogState::Confirm);

    let snapshot = orchestrator.confirm().await;
    assert_eq!(snapshot.state, DialogState::DepositResult);
    assert_eq!(snapshot.transaction, Some(TransactionHandle::from("5ig")));
    assert_eq!(snapshot.points(), Some(120));
    assert_eq!(
        orchestrator.standing().await.map(|record| record.points),
        Some(120)
    );
    Ok(())
}

#[tokio::test]
async fn lookup_standing_without_settling() -> anyhow::Result<()> {
    let wallet = MockServer::start().await;
    let scores = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rankings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rankings": [{ "identity": KEY, "points": 40, "displayName": "alice" }]
        })))
        .mount(&scores)
        .await;

    let app = SettlementApp::new(app_config(&wallet, &scores), AuthContext::default())?;

    let record = app.lookup_standing(&Identity::from(KEY)).await?;
    assert_eq!(record.map(|record| record.points), Some(40));
    assert!(app
        .lookup_standing(&Identity::from("someone-else"))
        .await?
        .is_none());
    Ok(())
}

#[tokio::test]
async fn custody_address_is_required() -> anyhow::Result<()> {
    let wallet = MockServer::start().await;
    let scores = MockServer::start().await;
    let mut config = app_config(&wallet, &scores);
    config.settlement.custody_address = Address::from("  ");

    let result = SettlementApp::new(config, AuthContext::default());
    assert!(matches!(result, Err(ApplicationError::MissingCustodyAddress)));
    Ok(())
}
