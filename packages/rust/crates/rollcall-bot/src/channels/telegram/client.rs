use std::time::Duration;

use super::constants::{
    TELEGRAM_HTTP_CONNECT_TIMEOUT_SECS, TELEGRAM_HTTP_REQUEST_MARGIN_SECS,
    TELEGRAM_POLL_TIMEOUT_SECS,
};

const USER_AGENT: &str = concat!("rollcall-bot/", env!("CARGO_PKG_VERSION"));

/// Shared client for polling and sends.
///
/// The request timeout outlives the `getUpdates` long-poll window so an idle
/// poll ends on Telegram's side, not as a client timeout.
pub(super) fn build_telegram_http_client() -> reqwest::Client {
    let request_timeout =
        Duration::from_secs(TELEGRAM_POLL_TIMEOUT_SECS + TELEGRAM_HTTP_REQUEST_MARGIN_SECS);
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(TELEGRAM_HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(request_timeout)
        .build()
        .unwrap_or_else(|error| {
            tracing::warn!(
                error = %error,
                "Telegram HTTP client builder rejected settings; using reqwest defaults"
            );
            reqwest::Client::new()
        })
}
