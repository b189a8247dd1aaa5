use std::time::{Duration, Instant};

use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::config::store::StoreSettings;
use crate::models::error::StoreError;
use crate::models::score::{
    AirtableRecords, LeaderboardEntry, ScoreRecord, UpsertRequest, SCORE_FIELD, USERNAME_FIELD,
};

/// Thin client over one Airtable table.
#[derive(Clone)]
pub struct AirtableClient {
    table_url: Url,
    api_key: SecretString,
    view_id: Option<String>,
    client: Client,
}

impl AirtableClient {
    pub fn new(settings: &StoreSettings) -> Result<Self, StoreError> {
        let table_url = Url::parse(&settings.table_url())?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            table_url,
            api_key: settings.api_key.clone(),
            view_id: settings.view_id.clone(),
            client,
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    /// Write a score, merging on the user id so a user keeps a single row.
    /// Returns Airtable's response body untouched.
    pub async fn upsert_score(&self, record: &ScoreRecord) -> Result<Value, StoreError> {
        tracing::info!("Sending PATCH to {}", self.table_url);

        let response = self
            .client
            .patch(self.table_url.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&UpsertRequest::merge_on_user_id(record))
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Read username and score of every row in the configured view, in the
    /// view's order. A single malformed row fails the whole read.
    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let view_id = self.view_id.as_deref().ok_or(StoreError::MissingView)?;

        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("fields[]", USERNAME_FIELD)
            .append_pair("fields[]", SCORE_FIELD)
            .append_pair("view", view_id);

        let fetch_time = Instant::now();
        let response = self
            .client
            .get(url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body = response.bytes().await?;
        let page: AirtableRecords =
            serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        tracing::info!(
            "Fetched {} records from Airtable in {}ms",
            page.records.len(),
            fetch_time.elapsed().as_millis()
        );
        if page.offset.is_some() {
            tracing::debug!("Airtable has more records than the first page, ignoring the rest");
        }

        page.records
            .iter()
            .map(|record| LeaderboardEntry::try_from(record).map_err(StoreError::Decode))
            .collect()
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    tracing::error!("Airtable returned error {}: {}", status, body);
    Err(StoreError::Status { status, body })
}
