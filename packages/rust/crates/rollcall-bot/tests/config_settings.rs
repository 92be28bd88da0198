#![allow(missing_docs, clippy::expect_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rollcall_bot::{BotConfig, RuntimeSettings, load_runtime_settings_from_paths};
use rollcall_core::EngineVariant;
use tempfile::TempDir;

fn write_file(path: PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write yaml");
}

const SYSTEM_YAML: &str = r#"
telegram:
  variant: buttons
  inbound_queue_capacity: 100
sheets:
  credentials_path: creds.json
  range: Sheet1
schedule:
  batches:
    - name: Morning
      start: "09:00"
      end: "10:00"
    - name: Evening Batch 1
      start: "17:00"
      end: "20:00"
rosters:
  Morning: [Rahul, Neha, Amit]
  Evening Batch 1: [Rahul, Sana, Vikram]
"#;

fn settings_with_user(user_yaml: Option<&str>) -> (TempDir, RuntimeSettings) {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("packages/conf/settings.yaml");
    let user = tmp.path().join(".config/rollcall/settings.yaml");
    write_file(system.clone(), SYSTEM_YAML);
    if let Some(user_yaml) = user_yaml {
        write_file(user.clone(), user_yaml);
    }
    let settings = load_runtime_settings_from_paths(&system, &user);
    (tmp, settings)
}

fn resolve(
    env: &[(&str, &str)],
    settings: &RuntimeSettings,
    root: &Path,
) -> anyhow::Result<BotConfig> {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    BotConfig::from_lookup_for_test(|name| env.get(name).cloned(), settings, root)
}

#[test]
fn merge_user_overrides_system() {
    let (_tmp, settings) = settings_with_user(Some(
        r#"
telegram:
  variant: text
sheets:
  spreadsheet_id: sheet-123
"#,
    ));

    assert_eq!(settings.telegram.variant.as_deref(), Some("text"));
    assert_eq!(settings.telegram.inbound_queue_capacity, Some(100));
    assert_eq!(settings.sheets.spreadsheet_id.as_deref(), Some("sheet-123"));
    assert_eq!(settings.sheets.range.as_deref(), Some("Sheet1"));
    assert_eq!(
        settings.schedule.batches.as_ref().map(Vec::len),
        Some(2),
        "batches survive when the user file omits them"
    );
}

#[test]
fn user_batches_and_rosters_replace_system_wholesale() {
    let (_tmp, settings) = settings_with_user(Some(
        r#"
schedule:
  batches:
    - name: Weekend
      start: "10:00"
      end: "12:00"
rosters:
  Weekend: [Priya]
"#,
    ));

    let batches = settings.schedule.batches.expect("batches");
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].name, "Weekend");
    let rosters = settings.rosters.expect("rosters");
    assert_eq!(rosters.len(), 1);
    assert_eq!(rosters["Weekend"], vec!["Priya".to_string()]);
}

#[test]
fn malformed_user_yaml_is_ignored() {
    let (_tmp, settings) = settings_with_user(Some("telegram: [not, a, map"));
    assert_eq!(settings.telegram.variant.as_deref(), Some("buttons"));
}

#[test]
fn missing_files_yield_empty_settings() {
    let tmp = TempDir::new().expect("tempdir");
    let settings = load_runtime_settings_from_paths(
        &tmp.path().join("missing/system.yaml"),
        &tmp.path().join("missing/user.yaml"),
    );
    assert!(settings.schedule.batches.is_none());
    assert!(settings.rosters.is_none());
}

#[test]
fn bot_config_resolves_schedule_roster_and_defaults() {
    let (tmp, settings) = settings_with_user(None);
    let config = resolve(&[], &settings, tmp.path()).expect("config");

    assert_eq!(config.variant, EngineVariant::Buttons);
    assert_eq!(config.inbound_queue_capacity, 100);
    assert_eq!(config.telegram_api_base_url, "https://api.telegram.org");
    assert!(config.bot_token.is_none());
    assert!(config.require_bot_token().is_err());
    assert!(config.sheets.is_none(), "no spreadsheet id means console output");
    assert!(config.timezone.is_none());
    assert_eq!(config.schedule.windows().len(), 2);
    assert_eq!(
        config.roster.members("Evening Batch 1"),
        ["Rahul".to_string(), "Sana".to_string(), "Vikram".to_string()]
    );
}

#[test]
fn env_overrides_settings() {
    let (tmp, settings) = settings_with_user(Some(
        r#"
telegram:
  bot_token: from-settings
sheets:
  spreadsheet_id: from-settings
"#,
    ));
    let config = resolve(
        &[
            ("ROLLCALL_TELEGRAM_BOT_TOKEN", "from-env"),
            ("ROLLCALL_VARIANT", "text"),
            ("ROLLCALL_TELEGRAM_INBOUND_QUEUE_CAPACITY", "8"),
            ("ROLLCALL_SHEETS_SPREADSHEET_ID", "sheet-env"),
            ("ROLLCALL_SHEETS_CREDENTIALS", "/etc/rollcall/creds.json"),
            ("ROLLCALL_TIMEZONE", "Asia/Kolkata"),
        ],
        &settings,
        tmp.path(),
    )
    .expect("config");

    assert_eq!(config.require_bot_token().expect("token"), "from-env");
    assert_eq!(config.variant, EngineVariant::Text);
    assert_eq!(config.inbound_queue_capacity, 8);
    assert_eq!(config.timezone, Some(chrono_tz::Asia::Kolkata));
    let sheets = config.sheets.expect("sheets");
    assert_eq!(sheets.spreadsheet_id, "sheet-env");
    assert_eq!(sheets.credentials_path, PathBuf::from("/etc/rollcall/creds.json"));
    assert_eq!(sheets.range, "Sheet1");
    assert_eq!(sheets.api_base_url, "https://sheets.googleapis.com");
}

#[test]
fn legacy_bot_token_env_and_relative_credentials() {
    let (tmp, settings) = settings_with_user(Some("sheets:\n  spreadsheet_id: abc\n"));
    let config = resolve(&[("BOT_TOKEN", "legacy")], &settings, tmp.path()).expect("config");

    assert_eq!(config.bot_token.as_deref(), Some("legacy"));
    let sheets = config.sheets.expect("sheets");
    assert_eq!(sheets.credentials_path, tmp.path().join("creds.json"));
}

#[test]
fn invalid_env_values_fall_back_to_settings() {
    let (tmp, settings) = settings_with_user(None);
    let config = resolve(
        &[
            ("ROLLCALL_VARIANT", "carrier-pigeon"),
            ("ROLLCALL_TELEGRAM_INBOUND_QUEUE_CAPACITY", "0"),
        ],
        &settings,
        tmp.path(),
    )
    .expect("config");

    assert_eq!(config.variant, EngineVariant::Buttons);
    assert_eq!(config.inbound_queue_capacity, 100);
}

#[test]
fn cli_overrides_win() {
    let (tmp, settings) = settings_with_user(None);
    let config = resolve(&[("BOT_TOKEN", "env")], &settings, tmp.path())
        .expect("config")
        .with_overrides(Some(EngineVariant::Text), Some("cli".to_string()));

    assert_eq!(config.variant, EngineVariant::Text);
    assert_eq!(config.bot_token.as_deref(), Some("cli"));
}

#[test]
fn unknown_timezone_is_rejected() {
    let (tmp, settings) = settings_with_user(None);
    let error = resolve(&[("ROLLCALL_TIMEZONE", "Mars/Olympus")], &settings, tmp.path())
        .expect_err("bad timezone");
    assert!(error.to_string().contains("Mars/Olympus"));
}

#[test]
fn malformed_batch_time_is_rejected() {
    let (tmp, settings) = settings_with_user(Some(
        r#"
schedule:
  batches:
    - name: Morning
      start: "9 o'clock"
      end: "10:00"
"#,
    ));
    let error = resolve(&[], &settings, tmp.path()).expect_err("bad time");
    assert!(format!("{error:#}").contains("Morning"));
}

#[test]
fn roster_for_unknown_batch_is_rejected() {
    let (tmp, settings) = settings_with_user(Some(
        r#"
rosters:
  Night Owls: [Kiran]
"#,
    ));
    let error = resolve(&[], &settings, tmp.path()).expect_err("unknown roster batch");
    assert!(format!("{error:#}").contains("Night Owls"));
}
