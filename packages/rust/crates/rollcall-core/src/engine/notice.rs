//! Operator-facing replies.

use std::fmt;

use super::EngineVariant;

/// Finalize counts for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Batch name.
    pub window: String,
    /// `roster size - absent`, floored at zero.
    pub present: usize,
    /// Size of the absent set.
    pub absent: usize,
}

impl Summary {
    /// Counts for a roster of `roster_size` with `absent` marks.
    #[must_use]
    pub fn new(window: &str, roster_size: usize, absent: usize) -> Self {
        Self {
            window: window.to_string(),
            present: roster_size.saturating_sub(absent),
            absent,
        }
    }
}

/// Every message the engine can send. `Display` renders the chat text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No configured batch covers the current time.
    NoActiveWindow,
    /// A button was tapped while no session is open.
    NoOpenSession,
    /// A new batch session was opened.
    BatchStarted {
        /// Batch name.
        window: String,
        /// `HH:MM–HH:MM`.
        range: String,
        /// Which instructions to show.
        variant: EngineVariant,
    },
    /// Member added to the absent set.
    MarkedAbsent {
        /// Display name.
        member: String,
    },
    /// Name is not on the active batch roster.
    MemberNotFound {
        /// Name as typed.
        name: String,
    },
    /// Member was already marked absent.
    DuplicateAbsenceMark {
        /// Display name.
        member: String,
    },
    /// `@ … AP` without a name.
    MalformedCommand,
    /// Generic usage hint.
    UsageHint,
    /// Attendance saved.
    Summary(Summary),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveWindow => write!(
                f,
                "⏰ No active batch right now.\nAttendance can only be marked during batch time."
            ),
            Self::NoOpenSession => write!(f, "⏰ No active batch."),
            Self::BatchStarted {
                window,
                range,
                variant: EngineVariant::Text,
            } => write!(
                f,
                "🤖 {window} started ({range})\n\
                 Everyone is PRESENT by default.\n\
                 Send absentees like: @ Rahul AP\n\
                 Type 'done' when finished."
            ),
            Self::BatchStarted {
                window,
                range,
                variant: EngineVariant::Buttons,
            } => write!(
                f,
                "🕒 {window} started ({range})\n\
                 Everyone is PRESENT by default.\n\
                 Tap names to mark ABSENT:"
            ),
            Self::MarkedAbsent { member } => write!(f, "✅ {member} marked absent."),
            Self::MemberNotFound { name } => write!(f, "⚠️ '{name}' not found in this batch."),
            Self::DuplicateAbsenceMark { member } => {
                write!(f, "⚠️ {member} already marked absent.")
            }
            Self::MalformedCommand => write!(f, "⚠️ Format error. Use: @ Name AP"),
            Self::UsageHint => write!(f, "ℹ️ Send absentees like '@ Name AP' or type 'done'."),
            Self::Summary(summary) => write!(
                f,
                "📊 Attendance saved for {}\nPresent: {}\nAbsent: {}",
                summary.window, summary.present, summary.absent
            ),
        }
    }
}
