//! Runtime settings loader for rollcall-bot.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/rollcall/settings.yaml`
//!
//! Merge precedence is user over system. `schedule.batches` and `rosters` are
//! replaced wholesale, never merged entry by entry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "rollcall/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub sheets: SheetsSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
    pub rosters: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramSettings {
    pub bot_token: Option<String>,
    pub variant: Option<String>,
    pub inbound_queue_capacity: Option<usize>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetsSettings {
    pub spreadsheet_id: Option<String>,
    pub credentials_path: Option<String>,
    pub range: Option<String>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleSettings {
    pub timezone: Option<String>,
    pub batches: Option<Vec<BatchSettings>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    pub name: String,
    pub start: String,
    pub end: String,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            telegram: self.telegram.merge(overlay.telegram),
            sheets: self.sheets.merge(overlay.sheets),
            schedule: self.schedule.merge(overlay.schedule),
            rosters: overlay.rosters.or(self.rosters),
        }
    }
}

impl TelegramSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            bot_token: overlay.bot_token.or(self.bot_token),
            variant: overlay.variant.or(self.variant),
            inbound_queue_capacity: overlay
                .inbound_queue_capacity
                .or(self.inbound_queue_capacity),
            api_base_url: overlay.api_base_url.or(self.api_base_url),
        }
    }
}

impl SheetsSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            spreadsheet_id: overlay.spreadsheet_id.or(self.spreadsheet_id),
            credentials_path: overlay.credentials_path.or(self.credentials_path),
            range: overlay.range.or(self.range),
            api_base_url: overlay.api_base_url.or(self.api_base_url),
        }
    }
}

impl ScheduleSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            timezone: overlay.timezone.or(self.timezone),
            batches: overlay.batches.or(self.batches),
        }
    }
}

/// Load merged runtime settings (user overrides system).
pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RuntimeSettings {
    if !path.exists() {
        return RuntimeSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RuntimeSettings::default();
        }
    };
    match serde_yaml::from_str::<RuntimeSettings>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RuntimeSettings::default()
        }
    }
}

pub(crate) fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map_or_else(
            || std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            PathBuf::from,
        )
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

pub(crate) fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
