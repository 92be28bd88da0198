//! Config namespace: settings files and the resolved bot configuration.

mod bot;
mod settings;

pub use bot::{BotConfig, SheetsConfig};
pub use settings::{
    BatchSettings, RuntimeSettings, ScheduleSettings, SheetsSettings, TelegramSettings,
    load_runtime_settings, load_runtime_settings_from_paths, runtime_settings_paths,
    set_config_home_override,
};
