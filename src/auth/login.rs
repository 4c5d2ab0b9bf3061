use serde::{Deserialize, Serialize};

use std::{fmt, str::FromStr};

use super::{error::AuthError, Session};
use crate::primitives::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginProvider {
    Telegram,
    Wallet,
}

impl FromStr for LoginProvider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "telegram" => Ok(Self::Telegram),
            "wallet" => Ok(Self::Wallet),
            other => Err(AuthError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for LoginProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telegram => write!(f, "telegram"),
            Self::Wallet => write!(f, "wallet"),
        }
    }
}

/// Dispatches a login to its provider. Fails synchronously and never retries.
pub fn handle_login(provider: &str, credential: &str) -> Result<Session, AuthError> {
    let provider = provider.parse::<LoginProvider>()?;
    let credential = credential.trim();
    if credential.is_empty() {
        return Err(AuthError::EmptyCredential);
    }
    let session = match provider {
        LoginProvider::Telegram => telegram_login(credential),
        LoginProvider::Wallet => wallet_login(credential),
    };
    tracing::info!(%provider, identity = %session.identity, "login accepted");
    Ok(session)
}

fn telegram_login(credential: &str) -> Session {
    Session {
        identity: Identity::from(credential),
        provider: LoginProvider::Telegram,
    }
}

// The wallet's public key is the identity.
fn wallet_login(credential: &str) -> Session {
    Session {
        identity: Identity::from(credential),
        provider: LoginProvider::Wallet,
    }
}
