//! rollcall-core: batch schedule, roster and attendance session engine.
//!
//! An operator marks members absent for the batch that is currently running,
//! either with `@ Name AP` text commands or by tapping toggle buttons, then
//! finalizes the batch. Finalizing writes one present/absent record per roster
//! member through a [`PersistenceSink`]. Chat replies go through a
//! [`NotificationSink`]. Both sinks are provided by the host (see `rollcall-bot`).

mod engine;
mod error;
mod layout;
mod record;
mod roster;
mod schedule;
mod session;
mod sink;

pub use engine::{
    AttendanceEngine, EngineVariant, InboundEvent, Notice, Summary, TextCommand,
    parse_text_command,
};
pub use error::ConfigError;
pub use layout::{ButtonPayload, CONFIRM_LABEL, ControlButton, ControlLayout, build_toggle_layout};
pub use record::{AttendanceRecord, AttendanceStatus};
pub use roster::{Roster, normalize_member};
pub use schedule::{BatchWindow, Schedule, parse_time_of_day};
pub use session::Session;
pub use sink::{NotificationSink, PersistenceSink};
