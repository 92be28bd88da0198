#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod support;

use rollcall_core::{BatchWindow, ConfigError, Roster, Schedule, normalize_member};

use support::{hm, roster, schedule};

#[test]
fn resolves_window_strictly_inside() {
    let schedule = schedule();
    assert_eq!(
        schedule.resolve(hm(9, 30)).map(|w| w.name.as_str()),
        Some("Morning")
    );
    assert_eq!(
        schedule.resolve(hm(18, 0)).map(|w| w.name.as_str()),
        Some("Evening Batch 1")
    );
    assert_eq!(
        schedule.resolve(hm(22, 59)).map(|w| w.name.as_str()),
        Some("Evening Batch 2")
    );
}

#[test]
fn outside_every_window_resolves_to_none() {
    let schedule = schedule();
    assert!(schedule.resolve(hm(8, 59)).is_none());
    assert!(schedule.resolve(hm(12, 0)).is_none());
    assert!(schedule.resolve(hm(23, 1)).is_none());
}

#[test]
fn bounds_are_inclusive_and_first_declared_wins_on_shared_boundary() {
    let schedule = schedule();
    assert_eq!(
        schedule.resolve(hm(10, 0)).map(|w| w.name.as_str()),
        Some("Morning")
    );
    assert_eq!(
        schedule.resolve(hm(20, 0)).map(|w| w.name.as_str()),
        Some("Evening Batch 1")
    );
    assert_eq!(
        schedule.overlaps(),
        vec![("Evening Batch 1", "Evening Batch 2")]
    );
}

#[test]
fn overlapping_declaration_order_decides() {
    let schedule = Schedule::new(vec![
        BatchWindow::new("Wide", hm(8, 0), hm(12, 0)),
        BatchWindow::new("Narrow", hm(9, 0), hm(10, 0)),
    ])
    .expect("valid schedule");
    assert_eq!(
        schedule.resolve(hm(9, 30)).map(|w| w.name.as_str()),
        Some("Wide")
    );
}

#[test]
fn duplicate_and_empty_batch_names_are_rejected() {
    let duplicate = Schedule::new(vec![
        BatchWindow::new("Morning", hm(6, 0), hm(7, 0)),
        BatchWindow::new("Morning", hm(9, 0), hm(10, 0)),
    ]);
    assert_eq!(
        duplicate.unwrap_err(),
        ConfigError::DuplicateBatch("Morning".to_string())
    );

    let empty = Schedule::new(vec![BatchWindow::new("  ", hm(6, 0), hm(7, 0))]);
    assert_eq!(empty.unwrap_err(), ConfigError::EmptyBatchName);
}

#[test]
fn roster_for_unknown_batch_is_rejected() {
    assert_eq!(roster().validate_against(&schedule()), Ok(()));

    let stray = Roster::new([("Night".to_string(), vec!["Rahul".to_string()])]);
    assert_eq!(
        stray.validate_against(&schedule()),
        Err(ConfigError::UnknownRosterBatch("Night".to_string()))
    );
}

#[test]
fn normalization_is_idempotent_and_case_whitespace_insensitive() {
    for raw in ["Rahul", "  neha ", "AMIT\t", " Vikram Singh ", "ZOË", ""] {
        let once = normalize_member(raw);
        assert_eq!(normalize_member(&once), once);
        assert_eq!(normalize_member(&raw.to_uppercase()), once);
        assert_eq!(normalize_member(&format!("  {raw}\n")), once);
    }
}
