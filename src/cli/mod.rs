mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use url::Url;

use std::path::PathBuf;

use crate::{
    app::SettlementApp,
    auth::{self, AuthContext},
    primitives::{ActionKind, Identity},
    settlement::{DialogSnapshot, DialogState},
};
use config::*;

#[derive(Parser)]
#[clap(version, long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[clap(
        short,
        long,
        env = "SETTLER_CONFIG",
        default_value = "settler.yml",
        value_name = "FILE",
        global = true
    )]
    config: PathBuf,
    /// Login provider of the session (telegram or wallet)
    #[clap(long, env = "SETTLER_LOGIN_PROVIDER", default_value = "wallet", global = true)]
    login_provider: String,
    #[clap(long, env = "SETTLER_CREDENTIAL", default_value = "", global = true)]
    credential: String,
    #[clap(long, env = "SETTLER_WALLET_API_KEY", default_value = "", hide_env_values = true)]
    wallet_api_key: String,
    #[clap(long, action, value_parser, env = "SETTLER_SCORING_URL", global = true)]
    scoring_url: Option<Url>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Moves funds from the wallet into the custody position
    Deposit {
        #[clap(short, long)]
        amount: String,
        /// Skips the confirmation prompt
        #[clap(short, long)]
        yes: bool,
    },
    /// Moves funds out of the custody position
    Withdraw {
        #[clap(short, long)]
        amount: String,
        #[clap(short, long)]
        yes: bool,
    },
    /// Prints the reward standing of the logged in user
    Standing,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_path(
        cli.config,
        EnvOverride {
            wallet_api_key: cli.wallet_api_key,
            scoring_url: cli.scoring_url,
        },
    )?;
    crate::tracing::init_tracer(config.tracing.clone())?;

    let session =
        auth::handle_login(&cli.login_provider, &cli.credential).context("Couldn't log in")?;
    let identity = session.identity.clone();
    let app = SettlementApp::new(config.app, AuthContext::with_session(session))?;

    let result = match cli.command {
        Command::Deposit { amount, yes } => settle(&app, ActionKind::Deposit, amount, yes).await,
        Command::Withdraw { amount, yes } => {
            settle(&app, ActionKind::Withdraw, amount, yes).await
        }
        Command::Standing => standing(&app, &identity).await,
    };
    crate::tracing::shutdown_tracer();
    result
}

async fn standing(app: &SettlementApp, identity: &Identity) -> anyhow::Result<()> {
    match app.lookup_standing(identity).await? {
        Some(record) => println!("{} - {} points", record.display_name, record.points),
        None => println!("{} has no points yet", identity.abbreviated()),
    }
    Ok(())
}

async fn settle(
    app: &SettlementApp,
    action: ActionKind,
    amount: String,
    yes: bool,
) -> anyhow::Result<()> {
    let orchestrator = app.orchestrator();
    let asset = orchestrator.config().asset_symbol.clone();

    let snapshot = orchestrator.invoke(action, &amount).await;
    if snapshot.state == DialogState::Confirm && !yes {
        let question = format!(
            "You are about to {} {} {}. Continue? [y/N] ",
            action, amount, asset
        );
        if !prompt(&question).await? {
            orchestrator.dismiss().await;
            println!("Cancelled");
            return Ok(());
        }
    }

    let snapshot = match snapshot.state {
        DialogState::Confirm => orchestrator.confirm().await,
        _ => snapshot,
    };
    let rendered = render(&snapshot, &asset);
    orchestrator.dismiss().await;
    rendered
}

fn render(snapshot: &DialogSnapshot, asset: &str) -> anyhow::Result<()> {
    match snapshot.state {
        DialogState::DepositResult | DialogState::WithdrawResult => {
            let amount = snapshot
                .amount
                .map(|amount| amount.to_string())
                .unwrap_or_default();
            if snapshot.state == DialogState::DepositResult {
                println!("Deposit of {amount} {asset} has been completed.");
            } else {
                println!("Withdrawal of {amount} {asset} has been completed.");
            }
            if let Some(tx) = &snapshot.transaction {
                println!("Transaction: {tx}");
            }
            match (snapshot.points(), snapshot.scoring_degraded) {
                (Some(points), _) => println!("Points: {points}"),
                (None, true) => println!("Points are currently unavailable."),
                (None, false) => (),
            }
            Ok(())
        }
        DialogState::Error => {
            let kind = snapshot
                .error
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            eprintln!("Transaction Failed: {kind}");
            if snapshot.error.map(|kind| kind.is_ambiguous()).unwrap_or(false) {
                eprintln!(
                    "The transfer may still reach the ledger. Check the ledger before retrying."
                );
            }
            Err(anyhow::anyhow!("settlement failed: {kind}"))
        }
        state => Err(anyhow::anyhow!(
            "settlement ended in unexpected state {state:?}"
        )),
    }
}

async fn prompt(question: &str) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;
    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
