use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The parts of a Google service-account key file the sink needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountCredentials {
    /// Read and parse a service-account JSON key file.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing, unreadable, or not a service-account key.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read credentials file {}", path.display()))?;
        Self::parse(&raw)
            .with_context(|| format!("invalid credentials file {}", path.display()))
    }

    /// Parse service-account JSON.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or an empty `client_email`/`private_key`.
    pub fn parse(raw: &str) -> Result<Self> {
        let credentials: Self =
            serde_json::from_str(raw).context("service account JSON is malformed")?;
        if credentials.client_email.trim().is_empty() {
            anyhow::bail!("service account `client_email` is empty");
        }
        if credentials.private_key.trim().is_empty() {
            anyhow::bail!("service account `private_key` is empty");
        }
        Ok(credentials)
    }
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}
