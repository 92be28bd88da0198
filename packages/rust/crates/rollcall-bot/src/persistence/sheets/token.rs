//! OAuth2 JWT-bearer flow for service accounts.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::credentials::ServiceAccountCredentials;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);
const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Exchanges signed assertions for access tokens, cached until shortly before expiry.
pub(super) struct TokenProvider {
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub(super) fn new(
        credentials: &ServiceAccountCredentials,
        client: reqwest::Client,
    ) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .context("service account private_key is not a valid RSA PEM key")?;
        Ok(Self {
            client_email: credentials.client_email.clone(),
            token_uri: credentials.token_uri.clone(),
            encoding_key,
            client,
            cached: Mutex::new(None),
        })
    }

    pub(super) async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref()
            && Instant::now() < token.refresh_at
        {
            return Ok(token.token.clone());
        }

        let response = self.exchange_assertion().await?;
        let lifetime = Duration::from_secs(response.expires_in);
        *cached = Some(CachedToken {
            token: response.access_token.clone(),
            refresh_at: Instant::now() + lifetime.saturating_sub(REFRESH_MARGIN),
        });
        tracing::debug!(
            expires_in_secs = response.expires_in,
            "Google access token refreshed"
        );
        Ok(response.access_token)
    }

    fn sign_assertion(&self) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .context("failed to sign service account assertion")
    }

    async fn exchange_assertion(&self) -> Result<TokenResponse> {
        let assertion = self.sign_assertion()?;
        let response = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("Google token request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Google token endpoint returned {status}: {body}");
        }
        response
            .json::<TokenResponse>()
            .await
            .context("Google token response is malformed")
    }
}
