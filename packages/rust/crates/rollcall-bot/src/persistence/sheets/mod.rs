//! Google Sheets sink: one `values:append` call per attendance row.

mod credentials;
mod token;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use rollcall_core::{AttendanceRecord, PersistenceSink};

use crate::config::SheetsConfig;

pub use credentials::ServiceAccountCredentials;
use token::TokenProvider;

const SHEETS_HTTP_TIMEOUT_SECS: u64 = 30;

/// Appends rows to a spreadsheet with service-account credentials.
pub struct GoogleSheetsSink {
    spreadsheet_id: String,
    range: String,
    api_base_url: String,
    client: reqwest::Client,
    tokens: TokenProvider,
}

impl GoogleSheetsSink {
    /// Load credentials and prepare the HTTP client.
    ///
    /// # Errors
    ///
    /// Fails when the credentials file is missing or invalid, or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &SheetsConfig) -> Result<Self> {
        let credentials = ServiceAccountCredentials::load(&config.credentials_path)?;
        Self::new(config, &credentials)
    }

    /// Build with already-loaded credentials.
    ///
    /// # Errors
    ///
    /// Fails when the private key is not RSA PEM or the HTTP client cannot be built.
    pub fn new(config: &SheetsConfig, credentials: &ServiceAccountCredentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SHEETS_HTTP_TIMEOUT_SECS))
            .build()
            .context("failed to build Google Sheets HTTP client")?;
        let tokens = TokenProvider::new(credentials, client.clone())?;
        Ok(Self {
            spreadsheet_id: config.spreadsheet_id.clone(),
            range: config.range.clone(),
            api_base_url: config.api_base_url.clone(),
            client,
            tokens,
        })
    }

    fn append_url(&self) -> Result<Url> {
        let append_segment = format!("{}:append", self.range);
        let mut url = Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid Sheets API base url `{}`", self.api_base_url))?;
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Sheets API base url cannot carry a path"))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                append_segment.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");
        Ok(url)
    }
}

impl std::fmt::Debug for GoogleSheetsSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsSink")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PersistenceSink for GoogleSheetsSink {
    async fn append_record(&self, record: &AttendanceRecord) -> anyhow::Result<()> {
        let token = self.tokens.access_token().await?;
        let url = self.append_url()?;
        let body = serde_json::json!({ "values": [record.to_row()] });
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .context("Google Sheets append request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Google Sheets append returned {status}: {body}");
        }
        tracing::debug!(
            batch = %record.window,
            member = %record.member,
            status = %record.status,
            "attendance row appended"
        );
        Ok(())
    }
}
