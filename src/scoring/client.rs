use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::instrument;

use super::{config::*, error::*, ScoreService, StandingRecord};
use crate::primitives::Identity;

#[derive(Debug, Deserialize)]
struct RankingsResponse {
    rankings: Vec<RankingEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankingEntry {
    identity: String,
    points: i64,
    #[serde(alias = "name")]
    display_name: String,
}

impl TryFrom<RankingEntry> for StandingRecord {
    type Error = ScoreServiceError;

    fn try_from(entry: RankingEntry) -> Result<Self, Self::Error> {
        if entry.identity.trim().is_empty() {
            return Err(ScoreServiceError::InvalidRecord(format!(
                "ranking entry '{}' has no identity",
                entry.display_name
            )));
        }
        Ok(Self {
            identity: Identity::from(entry.identity),
            points: entry.points,
            display_name: entry.display_name,
        })
    }
}

#[derive(Clone)]
pub struct ScoreClient {
    client: ClientWithMiddleware,
    config: ScoreClientConfig,
}

impl ScoreClient {
    pub fn new(config: ScoreClientConfig) -> Result<Self, ScoreServiceError> {
        let min_retry_interval = std::time::Duration::from_millis(200);
        let max_retry_interval = std::time::Duration::from_secs(5);
        let retry_policy = reqwest_retry::policies::ExponentialBackoff::builder()
            .retry_bounds(min_retry_interval, max_retry_interval)
            .build_with_max_retries(config.number_of_retries);
        let client = reqwest_middleware::ClientBuilder::new(
            reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(ScoreServiceError::CouldNotBuildClient)?,
        )
        .with(reqwest_retry::RetryTransientMiddleware::new_with_policy(
            retry_policy,
        ))
        .build();
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ScoreService for ScoreClient {
    #[instrument(name = "scoring.rankings", skip(self), fields(n_rankings), err)]
    async fn rankings(&self) -> Result<Vec<StandingRecord>, ScoreServiceError> {
        let url = format!(
            "{}{}",
            self.config.url.trim_end_matches('/'),
            "/api/rankings"
        );
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ScoreServiceError::UnexpectedStatus(resp.status()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(ScoreServiceError::CouldNotReadResponseBody)?;
        let rankings = serde_json::from_slice::<RankingsResponse>(&body)?
            .rankings
            .into_iter()
            .map(StandingRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::Span::current().record("n_rankings", rankings.len());
        Ok(rankings)
    }
}
