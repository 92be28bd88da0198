//! Telegram attendance bot: polls the Bot API, drives the rollcall engine, and
//! appends finalized rows to Google Sheets (or stdout when no sheet is set).

#![allow(missing_docs)]

mod channels;
mod clock;
mod config;
mod persistence;
mod runtime;
mod status;

pub use channels::{TelegramChannel, inline_keyboard_markup};
pub use clock::BatchClock;
pub use config::{
    BatchSettings, BotConfig, RuntimeSettings, ScheduleSettings, SheetsConfig, SheetsSettings,
    TelegramSettings, load_runtime_settings, load_runtime_settings_from_paths,
    runtime_settings_paths, set_config_home_override,
};
pub use persistence::{ConsoleSink, GoogleSheetsSink, ServiceAccountCredentials, build_persistence};
pub use runtime::{drain_inbound_events, run_polling};
pub use status::render_status;
