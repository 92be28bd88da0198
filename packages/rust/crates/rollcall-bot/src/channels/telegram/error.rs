use std::time::Duration;

use reqwest::StatusCode;

use super::constants::{
    TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS, TELEGRAM_SEND_RETRY_BASE_MS,
    TELEGRAM_SEND_RETRY_MAX_MS,
};

#[derive(Debug)]
pub(super) struct TelegramApiError {
    pub(super) status: Option<StatusCode>,
    pub(super) error_code: Option<i64>,
    pub(super) retry_after_secs: Option<u64>,
    pub(super) body: String,
}

impl TelegramApiError {
    pub(super) fn from_reqwest(err: &reqwest::Error) -> Self {
        let body = if err.is_timeout() {
            format!("timed out: {err}")
        } else {
            err.to_string()
        };
        Self {
            status: None,
            error_code: None,
            retry_after_secs: None,
            body,
        }
    }

    /// Telegram rejects edits that would leave the message unchanged.
    pub(super) fn is_message_not_modified(&self) -> bool {
        let is_bad_request =
            self.status == Some(StatusCode::BAD_REQUEST) || self.error_code == Some(400);
        is_bad_request
            && self
                .body
                .to_ascii_lowercase()
                .contains("message is not modified")
    }

    pub(super) fn should_retry_send(&self) -> bool {
        let retryable_status = match self.status {
            Some(status) => {
                status == StatusCode::TOO_MANY_REQUESTS
                    || status == StatusCode::REQUEST_TIMEOUT
                    || status.is_server_error()
            }
            None => true,
        };
        let retryable_code =
            matches!(self.error_code, Some(429)) || self.error_code.is_some_and(|code| code >= 500);
        retryable_status || retryable_code
    }

    pub(super) fn retry_delay(&self, attempt: usize) -> Duration {
        if let Some(retry_after_secs) = self.retry_after_secs {
            return Duration::from_secs(
                retry_after_secs.min(TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS),
            );
        }
        let shift = u32::try_from(attempt.min(10)).unwrap_or(10);
        let backoff_ms = TELEGRAM_SEND_RETRY_BASE_MS
            .saturating_mul(1_u64 << shift)
            .min(TELEGRAM_SEND_RETRY_MAX_MS);
        Duration::from_millis(backoff_ms)
    }
}

impl std::fmt::Display for TelegramApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(status) = self.status {
            write!(f, "status={status}, ")?;
        }
        if let Some(code) = self.error_code {
            write!(f, "error_code={code}, ")?;
        }
        if let Some(retry_after_secs) = self.retry_after_secs {
            write!(f, "retry_after={retry_after_secs}s, ")?;
        }
        if self.status.is_some() || self.error_code.is_some() || self.retry_after_secs.is_some() {
            write!(f, "body={}", self.body)
        } else {
            write!(f, "{}", self.body)
        }
    }
}

impl std::error::Error for TelegramApiError {}

pub(super) fn telegram_api_error_retry_after_secs(data: &serde_json::Value) -> Option<u64> {
    data.get("parameters")
        .and_then(|v| v.get("retry_after"))
        .and_then(serde_json::Value::as_u64)
}

pub(super) fn telegram_api_error_code(data: &serde_json::Value) -> Option<i64> {
    data.get("error_code").and_then(serde_json::Value::as_i64)
}

pub(super) fn telegram_api_error_description<'a>(
    data: &'a serde_json::Value,
    fallback: &'a str,
) -> &'a str {
    data.get("description")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}
