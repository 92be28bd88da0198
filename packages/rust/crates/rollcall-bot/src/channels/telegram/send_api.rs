use super::TelegramChannel;
use super::constants::TELEGRAM_SEND_MAX_RETRIES;
use super::error::{
    TelegramApiError, telegram_api_error_code, telegram_api_error_description,
    telegram_api_error_retry_after_secs,
};

impl TelegramChannel {
    /// Call a Bot API method, retrying transient failures.
    pub(super) async fn send_api_request_with_retry(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<(), TelegramApiError> {
        let mut attempt = 0;
        loop {
            match self.send_api_request_once(method, body).await {
                Ok(()) => return Ok(()),
                Err(error) if attempt < TELEGRAM_SEND_MAX_RETRIES && error.should_retry_send() => {
                    let delay = error.retry_delay(attempt);
                    tracing::warn!(
                        attempt,
                        max_retries = TELEGRAM_SEND_MAX_RETRIES,
                        delay_ms = delay.as_millis(),
                        method,
                        error = %error,
                        "Telegram API transient failure; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn send_api_request_once(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<(), TelegramApiError> {
        let response = self
            .client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|error| TelegramApiError::from_reqwest(&error))?;
        Self::validate_telegram_response(response).await
    }

    async fn validate_telegram_response(response: reqwest::Response) -> Result<(), TelegramApiError> {
        let status = response.status();
        let body_text = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<serde_json::Value>(&body_text).ok();

        if !status.is_success() {
            return Err(TelegramApiError {
                status: Some(status),
                error_code: parsed.as_ref().and_then(telegram_api_error_code),
                retry_after_secs: parsed
                    .as_ref()
                    .and_then(telegram_api_error_retry_after_secs),
                body: parsed.as_ref().map_or_else(
                    || body_text.clone(),
                    |data| telegram_api_error_description(data, body_text.as_str()).to_string(),
                ),
            });
        }

        let Some(data) = parsed else {
            return Err(TelegramApiError {
                status: None,
                error_code: None,
                retry_after_secs: None,
                body: format!("failed to parse Telegram success response: {body_text}"),
            });
        };

        let ok = data
            .get("ok")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true);
        if !ok {
            return Err(TelegramApiError {
                status: Some(status),
                error_code: telegram_api_error_code(&data),
                retry_after_secs: telegram_api_error_retry_after_secs(&data),
                body: telegram_api_error_description(&data, body_text.as_str()).to_string(),
            });
        }

        Ok(())
    }

    /// Edits that change nothing are treated as delivered.
    pub(super) async fn send_edit_request(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<(), TelegramApiError> {
        match self.send_api_request_with_retry(method, body).await {
            Err(error) if error.is_message_not_modified() => {
                tracing::debug!(method, "Telegram edit skipped: message is not modified");
                Ok(())
            }
            other => other,
        }
    }
}
