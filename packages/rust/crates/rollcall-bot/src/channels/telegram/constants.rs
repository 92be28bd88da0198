pub(super) const TELEGRAM_POLL_TIMEOUT_SECS: u64 = 25;
pub(super) const TELEGRAM_POLL_RETRY_SECS: u64 = 5;
pub(super) const TELEGRAM_POLL_CONFLICT_RETRY_SECS: u64 = 2;
pub(super) const TELEGRAM_POLL_DEFAULT_RATE_LIMIT_RETRY_SECS: u64 = 1;
pub(super) const TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS: u64 = 60;
pub(super) const TELEGRAM_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub(super) const TELEGRAM_HTTP_REQUEST_MARGIN_SECS: u64 = 5;
pub(super) const TELEGRAM_HEALTH_PROBE_TIMEOUT_SECS: u64 = 5;
pub(super) const TELEGRAM_SEND_MAX_RETRIES: usize = 2;
pub(super) const TELEGRAM_SEND_RETRY_BASE_MS: u64 = 200;
pub(super) const TELEGRAM_SEND_RETRY_MAX_MS: u64 = 2_000;
