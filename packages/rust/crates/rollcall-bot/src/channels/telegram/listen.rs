use std::time::Duration;

use reqwest::StatusCode;
use rollcall_core::InboundEvent;
use tokio::sync::mpsc;

use super::TelegramChannel;
use super::constants::{
    TELEGRAM_HEALTH_PROBE_TIMEOUT_SECS, TELEGRAM_POLL_CONFLICT_RETRY_SECS,
    TELEGRAM_POLL_DEFAULT_RATE_LIMIT_RETRY_SECS,
    TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS, TELEGRAM_POLL_RETRY_SECS, TELEGRAM_POLL_TIMEOUT_SECS,
};
use super::error::telegram_api_error_retry_after_secs;

enum PollFailure {
    Fatal(String),
    Conflict(String),
    RateLimited { retry_after_secs: u64, description: String },
    Transient(String),
}

impl TelegramChannel {
    /// Long-poll `getUpdates` and forward parsed events until the receiver is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error only for unrecoverable API failures (401/403: bad token or
    /// bot blocked). Transport errors, conflicts and rate limits are retried.
    pub async fn listen(&self, tx: mpsc::Sender<InboundEvent>) -> anyhow::Result<()> {
        let mut offset: i64 = 0;
        tracing::info!("Telegram channel listening for updates...");
        loop {
            let body = serde_json::json!({
                "offset": offset,
                "timeout": TELEGRAM_POLL_TIMEOUT_SECS,
                "allowed_updates": ["message", "callback_query"]
            });
            let response = match self
                .client
                .post(self.api_url("getUpdates"))
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(error) => {
                    tracing::warn!(error = %error, "Telegram poll error");
                    tokio::time::sleep(Duration::from_secs(TELEGRAM_POLL_RETRY_SECS)).await;
                    continue;
                }
            };

            let http_status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            let data = serde_json::from_str::<serde_json::Value>(&body_text).ok();

            if let Some(failure) = classify_poll_failure(http_status, data.as_ref(), &body_text) {
                match failure {
                    PollFailure::Fatal(message) => anyhow::bail!(message),
                    PollFailure::Conflict(description) => {
                        tracing::warn!(
                            "Telegram polling conflict (409): {description}. \
Ensure only one process is using this bot token."
                        );
                        tokio::time::sleep(Duration::from_secs(TELEGRAM_POLL_CONFLICT_RETRY_SECS))
                            .await;
                    }
                    PollFailure::RateLimited {
                        retry_after_secs,
                        description,
                    } => {
                        tracing::warn!(
                            retry_after_secs,
                            "Telegram getUpdates rate limited (429): {description}"
                        );
                        tokio::time::sleep(Duration::from_secs(retry_after_secs)).await;
                    }
                    PollFailure::Transient(description) => {
                        tracing::warn!(
                            status = %http_status,
                            "Telegram getUpdates error: {description}"
                        );
                        tokio::time::sleep(Duration::from_secs(TELEGRAM_POLL_RETRY_SECS)).await;
                    }
                }
                continue;
            }

            let Some(results) = data
                .as_ref()
                .and_then(|data| data.get("result"))
                .and_then(serde_json::Value::as_array)
            else {
                continue;
            };
            for update in results {
                if let Some(update_id) = update.get("update_id").and_then(serde_json::Value::as_i64)
                {
                    offset = update_id + 1;
                }
                let Some(event) = self.parse_update(update) else {
                    continue;
                };
                if tx.send(event).await.is_err() {
                    tracing::info!("inbound receiver dropped; Telegram listener stopping");
                    return Ok(());
                }
            }
        }
    }

    /// `getMe` reachability check: API reachable and the token accepted.
    pub async fn health_probe(&self) -> bool {
        let response = match tokio::time::timeout(
            Duration::from_secs(TELEGRAM_HEALTH_PROBE_TIMEOUT_SECS),
            self.client.get(self.api_url("getMe")).send(),
        )
        .await
        {
            Ok(Ok(response)) if response.status().is_success() => response,
            Ok(Ok(response)) => {
                tracing::debug!(status = %response.status(), "Telegram getMe rejected");
                return false;
            }
            Ok(Err(error)) => {
                tracing::debug!(error = %error, "Telegram getMe request failed");
                return false;
            }
            Err(_) => return false,
        };
        response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|data| data.get("ok").and_then(serde_json::Value::as_bool))
            .unwrap_or(false)
    }
}

fn classify_poll_failure(
    http_status: StatusCode,
    data: Option<&serde_json::Value>,
    body_text: &str,
) -> Option<PollFailure> {
    let ok = data
        .and_then(|data| data.get("ok"))
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(true);
    if http_status.is_success() && ok {
        if data.is_none() {
            return Some(PollFailure::Transient(format!(
                "unparseable getUpdates response: {body_text}"
            )));
        }
        return None;
    }

    let error_code = data
        .and_then(|data| data.get("error_code"))
        .and_then(serde_json::Value::as_i64)
        .or_else(|| (!http_status.is_success()).then_some(i64::from(http_status.as_u16())))
        .unwrap_or_default();
    let description = data
        .and_then(|data| data.get("description"))
        .and_then(serde_json::Value::as_str)
        .filter(|description| !description.is_empty())
        .unwrap_or(body_text)
        .to_string();

    Some(match error_code {
        401 | 403 => PollFailure::Fatal(format!(
            "Telegram getUpdates API error (code={error_code}): {description}"
        )),
        409 => PollFailure::Conflict(description),
        429 => PollFailure::RateLimited {
            retry_after_secs: data
                .and_then(telegram_api_error_retry_after_secs)
                .unwrap_or(TELEGRAM_POLL_DEFAULT_RATE_LIMIT_RETRY_SECS)
                .clamp(1, TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS),
            description,
        },
        _ => PollFailure::Transient(description),
    })
}
