//! Human-readable schedule overview for the `status` command.

use std::fmt::Write as _;

use chrono::NaiveTime;
use rollcall_core::{Roster, Schedule};

/// Describe which batch is active at `at` and list every configured batch.
#[must_use]
pub fn render_status(schedule: &Schedule, roster: &Roster, at: NaiveTime) -> String {
    let clock = at.format("%H:%M");
    let mut out = match schedule.resolve(at) {
        Some(window) => format!(
            "Active batch at {clock}: {} ({})\n",
            window.name,
            window.time_range_label()
        ),
        None => format!("No active batch at {clock}.\n"),
    };

    if schedule.windows().is_empty() {
        out.push_str("No batches configured.\n");
        return out;
    }

    out.push_str("Batches:\n");
    let active = schedule.resolve(at).map(|window| window.name.as_str());
    for window in schedule.windows() {
        let marker = if active == Some(window.name.as_str()) {
            '*'
        } else {
            ' '
        };
        let members = roster.members(&window.name);
        let _ = write!(
            out,
            "{marker} {} {} ({} members)",
            window.name,
            window.time_range_label(),
            members.len()
        );
        if window.is_inverted() {
            out.push_str(" [never active: ends before it starts]");
        }
        if !members.is_empty() {
            let _ = write!(out, ": {}", members.join(", "));
        }
        out.push('\n');
    }
    out
}
