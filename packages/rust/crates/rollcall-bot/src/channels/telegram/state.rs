use super::client::build_telegram_http_client;

/// Telegram channel: long-polls the Bot API and implements the notification sink.
pub struct TelegramChannel {
    pub(super) bot_token: String,
    pub(super) api_base_url: String,
    pub(super) client: reqwest::Client,
}

impl TelegramChannel {
    /// Channel against `api_base_url` (`https://api.telegram.org`, a self-hosted
    /// Bot API server, or a test mock).
    #[must_use]
    pub fn new_with_base_url(bot_token: String, api_base_url: String) -> Self {
        Self {
            bot_token,
            api_base_url,
            client: build_telegram_http_client(),
        }
    }

    pub(super) fn api_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_base_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

impl std::fmt::Debug for TelegramChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramChannel")
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}
