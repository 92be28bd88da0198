//! Resolved bot configuration: settings + environment, validated.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use rollcall_core::{
    BatchWindow, ButtonPayload, EngineVariant, Roster, Schedule, parse_time_of_day,
};

use super::settings::{RuntimeSettings, absolutize, load_runtime_settings, project_root};

const DEFAULT_INBOUND_QUEUE_CAPACITY: usize = 100;
const DEFAULT_CREDENTIALS_PATH: &str = "creds.json";
const DEFAULT_SHEET_RANGE: &str = "Sheet1";
const TELEGRAM_DEFAULT_API_BASE: &str = "https://api.telegram.org";
const SHEETS_DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
const TELEGRAM_CALLBACK_DATA_MAX_BYTES: usize = 64;

/// Where finalized rows go when a spreadsheet is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub credentials_path: PathBuf,
    pub range: String,
    pub api_base_url: String,
}

/// Everything the runtime needs, immutable after startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: Option<String>,
    pub variant: EngineVariant,
    pub inbound_queue_capacity: usize,
    pub telegram_api_base_url: String,
    pub sheets: Option<SheetsConfig>,
    pub timezone: Option<Tz>,
    pub schedule: Schedule,
    pub roster: Roster,
}

impl BotConfig {
    /// Resolve from merged settings files and process environment.
    pub fn from_env() -> Result<Self> {
        let settings = load_runtime_settings();
        Self::from_lookup(|name| std::env::var(name).ok(), &settings, &project_root())
    }

    #[doc(hidden)]
    pub fn from_lookup_for_test<F>(
        lookup: F,
        settings: &RuntimeSettings,
        root: &Path,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(lookup, settings, root)
    }

    fn from_lookup<F>(lookup: F, settings: &RuntimeSettings, root: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bot_token = non_empty("ROLLCALL_TELEGRAM_BOT_TOKEN")
            .or_else(|| non_empty("BOT_TOKEN"))
            .or_else(|| {
                settings
                    .telegram
                    .bot_token
                    .clone()
                    .filter(|token| !token.trim().is_empty())
            });

        let variant = resolve_variant(
            non_empty("ROLLCALL_VARIANT"),
            settings.telegram.variant.as_deref(),
        );

        let inbound_queue_capacity = resolve_usize(
            non_empty("ROLLCALL_TELEGRAM_INBOUND_QUEUE_CAPACITY"),
            "ROLLCALL_TELEGRAM_INBOUND_QUEUE_CAPACITY",
            settings.telegram.inbound_queue_capacity,
            DEFAULT_INBOUND_QUEUE_CAPACITY,
        );

        let telegram_api_base_url = non_empty("ROLLCALL_TELEGRAM_API_BASE_URL")
            .or_else(|| settings.telegram.api_base_url.clone())
            .unwrap_or_else(|| TELEGRAM_DEFAULT_API_BASE.to_string());

        let sheets = non_empty("ROLLCALL_SHEETS_SPREADSHEET_ID")
            .or_else(|| {
                settings
                    .sheets
                    .spreadsheet_id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
            })
            .map(|spreadsheet_id| {
                let credentials = non_empty("ROLLCALL_SHEETS_CREDENTIALS")
                    .or_else(|| settings.sheets.credentials_path.clone())
                    .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_string());
                SheetsConfig {
                    spreadsheet_id,
                    credentials_path: absolutize(root, PathBuf::from(credentials)),
                    range: settings
                        .sheets
                        .range
                        .clone()
                        .unwrap_or_else(|| DEFAULT_SHEET_RANGE.to_string()),
                    api_base_url: settings
                        .sheets
                        .api_base_url
                        .clone()
                        .unwrap_or_else(|| SHEETS_DEFAULT_API_BASE.to_string()),
                }
            });

        let timezone = non_empty("ROLLCALL_TIMEZONE")
            .or_else(|| settings.schedule.timezone.clone())
            .map(|raw| {
                raw.trim()
                    .parse::<Tz>()
                    .map_err(|error| anyhow::anyhow!("unknown timezone `{raw}`: {error}"))
            })
            .transpose()?;

        let schedule = build_schedule(settings)?;
        let roster = Roster::new(settings.rosters.clone().unwrap_or_default());
        roster
            .validate_against(&schedule)
            .context("invalid rosters configuration")?;
        warn_on_suspicious_config(&schedule, &roster);

        Ok(Self {
            bot_token,
            variant,
            inbound_queue_capacity,
            telegram_api_base_url,
            sheets,
            timezone,
            schedule,
            roster,
        })
    }

    /// Apply CLI overrides.
    #[must_use]
    pub fn with_overrides(mut self, variant: Option<EngineVariant>, bot_token: Option<String>) -> Self {
        if let Some(variant) = variant {
            self.variant = variant;
        }
        if let Some(token) = bot_token.filter(|token| !token.trim().is_empty()) {
            self.bot_token = Some(token);
        }
        self
    }

    /// Bot token, required to talk to Telegram.
    pub fn require_bot_token(&self) -> Result<&str> {
        self.bot_token.as_deref().context(
            "Telegram bot token missing: set ROLLCALL_TELEGRAM_BOT_TOKEN (or BOT_TOKEN), \
             telegram.bot_token in settings, or pass --bot-token",
        )
    }
}

fn build_schedule(settings: &RuntimeSettings) -> Result<Schedule> {
    let batches = settings.schedule.batches.clone().unwrap_or_default();
    let mut windows = Vec::with_capacity(batches.len());
    for batch in batches {
        let start = parse_time_of_day(&batch.name, &batch.start)?;
        let end = parse_time_of_day(&batch.name, &batch.end)?;
        windows.push(BatchWindow::new(batch.name, start, end));
    }
    Schedule::new(windows).context("invalid schedule.batches configuration")
}

fn warn_on_suspicious_config(schedule: &Schedule, roster: &Roster) {
    if schedule.windows().is_empty() {
        tracing::warn!("no batches configured; every message will get the no-active-batch reply");
    }
    for window in schedule.windows() {
        if window.is_inverted() {
            tracing::warn!(
                batch = %window.name,
                range = %window.time_range_label(),
                "batch ends before it starts and will never be active"
            );
        }
        let members = roster.members(&window.name);
        if members.is_empty() {
            tracing::warn!(batch = %window.name, "batch has no roster members");
        }
        for member in members {
            let payload = ButtonPayload::Toggle(member.clone()).encode();
            if payload.len() > TELEGRAM_CALLBACK_DATA_MAX_BYTES {
                tracing::warn!(
                    batch = %window.name,
                    member = %member,
                    bytes = payload.len(),
                    "member name exceeds Telegram callback data limit; its toggle button will be rejected"
                );
            }
        }
    }
    for (first, second) in schedule.overlaps() {
        tracing::warn!(
            first = %first,
            second = %second,
            "batch windows overlap; the first declared batch wins"
        );
    }
    for (batch, key) in roster.collisions() {
        tracing::warn!(
            batch = %batch,
            key = %key,
            "roster members share a normalized name; only the first is addressable"
        );
    }
}

fn resolve_variant(env_value: Option<String>, setting_value: Option<&str>) -> EngineVariant {
    if let Some(raw) = env_value {
        match raw.parse() {
            Ok(variant) => return variant,
            Err(_) => tracing::warn!(
                value = %raw,
                "invalid ROLLCALL_VARIANT; using configured/default variant"
            ),
        }
    }
    let Some(raw) = setting_value else {
        return EngineVariant::default();
    };
    match raw.parse() {
        Ok(variant) => variant,
        Err(_) => {
            tracing::warn!(
                value = %raw,
                "invalid telegram.variant in settings; using default variant"
            );
            EngineVariant::default()
        }
    }
}

fn resolve_usize(
    env_value: Option<String>,
    name: &str,
    setting_value: Option<usize>,
    default: usize,
) -> usize {
    if let Some(raw) = env_value {
        match raw.parse::<usize>() {
            Ok(value) if value > 0 => return value,
            _ => tracing::warn!(
                env_var = %name,
                value = %raw,
                "invalid runtime config env value; using settings/default"
            ),
        }
    }
    match setting_value {
        Some(value) if value > 0 => value,
        Some(value) => {
            tracing::warn!(
                setting = %name,
                value,
                default,
                "invalid runtime config settings value; using default"
            );
            default
        }
        None => default,
    }
}
