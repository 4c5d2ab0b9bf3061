use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

use std::path::Path;

use crate::{app::AppConfig, tracing::TracingConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

pub struct EnvOverride {
    pub wallet_api_key: String,
    pub scoring_url: Option<Url>,
}

impl Config {
    pub fn from_path(
        path: impl AsRef<Path>,
        EnvOverride {
            wallet_api_key,
            scoring_url,
        }: EnvOverride,
    ) -> anyhow::Result<Self> {
        let config_file = std::fs::read_to_string(path).context("Couldn't read config file")?;
        let mut config: Config =
            serde_yaml::from_str(&config_file).context("Couldn't parse config file")?;

        if !wallet_api_key.is_empty() {
            config.app.wallet.api_key = Some(wallet_api_key);
        }
        if let Some(url) = scoring_url {
            config.app.scoring.url = url.to_string();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use std::{io::Write, time::Duration};

    use super::*;

    fn no_override() -> EnvOverride {
        EnvOverride {
            wallet_api_key: String::new(),
            scoring_url: None,
        }
    }

    #[test]
    fn parses_settlement_section() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(
            file,
            r#"
app:
  settlement:
    amount_policy:
      max_amount: "0.5"
    custody_address: "Vau1tAddr3ss"
    confirmation_timeout: 30
  wallet:
    url: "http://wallet:9000"
    poll_interval: 250
  scoring:
    url: "http://scores:8000"
    number_of_retries: 0
"#
        )?;
        let config = Config::from_path(file.path(), no_override())?;
        let settlement = &config.app.settlement;
        assert_eq!(settlement.amount_policy.max_amount, dec!(0.5));
        assert_eq!(settlement.custody_address.as_str(), "Vau1tAddr3ss");
        assert_eq!(settlement.confirmation_timeout, Duration::from_secs(30));
        assert_eq!(settlement.asset_symbol, "SOL");
        assert_eq!(config.app.wallet.url, "http://wallet:9000");
        assert_eq!(config.app.wallet.poll_interval, Duration::from_millis(250));
        assert_eq!(config.app.wallet.timeout, Duration::from_secs(120));
        assert_eq!(config.app.scoring.number_of_retries, 0);
        assert!(config.app.wallet.api_key.is_none());
        Ok(())
    }

    #[test]
    fn empty_file_gives_defaults() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "{{}}")?;
        let config = Config::from_path(file.path(), no_override())?;
        assert_eq!(config.app.settlement.amount_policy.max_amount, dec!(0.01));
        assert_eq!(
            config.app.settlement.confirmation_timeout,
            Duration::from_secs(90)
        );
        assert_eq!(config.app.scoring.url, "http://localhost:8000");
        Ok(())
    }

    #[test]
    fn env_overrides_win() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "app:\n  scoring:\n    url: \"http://scores:8000\"")?;
        let config = Config::from_path(
            file.path(),
            EnvOverride {
                wallet_api_key: "secret".to_string(),
                scoring_url: Some(Url::parse("http://other:8001")?),
            },
        )?;
        assert_eq!(config.app.wallet.api_key.as_deref(), Some("secret"));
        assert_eq!(config.app.scoring.url, "http://other:8001/");
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_path("/does/not/exist.yml", no_override()).is_err());
    }
}
