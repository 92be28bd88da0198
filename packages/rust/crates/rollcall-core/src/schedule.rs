//! Batch schedule: named time-of-day windows resolved against wall-clock time.

use std::collections::HashSet;

use chrono::NaiveTime;

use crate::ConfigError;

/// One named batch window. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchWindow {
    /// Unique batch name (e.g. "Morning").
    pub name: String,
    /// First instant of the window.
    pub start: NaiveTime,
    /// Last instant of the window.
    pub end: NaiveTime,
}

impl BatchWindow {
    /// Build a window from already-parsed bounds.
    #[must_use]
    pub fn new(name: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Whether `now` falls inside `[start, end]`.
    ///
    /// Windows do not wrap past midnight: an inverted window never matches.
    #[must_use]
    pub fn contains(&self, now: NaiveTime) -> bool {
        self.start <= now && now <= self.end
    }

    /// True when `end` precedes `start`.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// `HH:MM–HH:MM` label used in chat replies.
    #[must_use]
    pub fn time_range_label(&self) -> String {
        format!(
            "{}–{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }

    fn overlaps(&self, other: &Self) -> bool {
        !self.is_inverted()
            && !other.is_inverted()
            && self.start <= other.end
            && other.start <= self.end
    }
}

/// Ordered batch table. Resolution is first-declared-match.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    windows: Vec<BatchWindow>,
}

impl Schedule {
    /// Validate and build a schedule, preserving declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBatchName`] or [`ConfigError::DuplicateBatch`].
    pub fn new(windows: Vec<BatchWindow>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(windows.len());
        for window in &windows {
            if window.name.trim().is_empty() {
                return Err(ConfigError::EmptyBatchName);
            }
            if !seen.insert(window.name.as_str()) {
                return Err(ConfigError::DuplicateBatch(window.name.clone()));
            }
        }
        Ok(Self { windows })
    }

    /// Active window at `now`, if any. When windows overlap, the one declared first wins.
    #[must_use]
    pub fn resolve(&self, now: NaiveTime) -> Option<&BatchWindow> {
        self.windows.iter().find(|window| window.contains(now))
    }

    /// Window by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BatchWindow> {
        self.windows.iter().find(|window| window.name == name)
    }

    /// All windows in declaration order.
    #[must_use]
    pub fn windows(&self) -> &[BatchWindow] {
        &self.windows
    }

    /// Pairs of window names whose ranges intersect (including shared boundaries).
    #[must_use]
    pub fn overlaps(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (index, first) in self.windows.iter().enumerate() {
            for second in &self.windows[index + 1..] {
                if first.overlaps(second) {
                    pairs.push((first.name.as_str(), second.name.as_str()));
                }
            }
        }
        pairs
    }
}

/// Parse a configured `HH:MM` (or `HH:MM:SS`) value for `batch`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTime`] when neither format matches.
pub fn parse_time_of_day(batch: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ConfigError::InvalidTime {
            batch: batch.to_string(),
            value: value.to_string(),
        })
}
