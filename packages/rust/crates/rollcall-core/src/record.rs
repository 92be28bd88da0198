//! Attendance records emitted at finalize time.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

/// Per-member outcome for one finalized batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    /// Not marked absent.
    Present,
    /// Marked absent.
    Absent,
}

impl AttendanceStatus {
    /// Spreadsheet cell value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row: `(date, batch, member, status, time)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    /// Finalize date.
    pub date: NaiveDate,
    /// Batch name.
    pub window: String,
    /// Member display name as configured.
    pub member: String,
    /// Present or absent.
    pub status: AttendanceStatus,
    /// Finalize time of day.
    pub time: NaiveTime,
}

impl AttendanceRecord {
    /// Cells in sheet column order: `YYYY-MM-DD`, batch, member, status, `HH:MM`.
    #[must_use]
    pub fn to_row(&self) -> [String; 5] {
        [
            self.date.format("%Y-%m-%d").to_string(),
            self.window.clone(),
            self.member.clone(),
            self.status.as_str().to_string(),
            self.time.format("%H:%M").to_string(),
        ]
    }
}
