//! Static roster: batch name to ordered member display names.

use std::collections::HashMap;

use crate::{ConfigError, Schedule};

/// Canonical member identity: trimmed and lower-cased.
#[must_use]
pub fn normalize_member(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Read-only member lists per batch.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: HashMap<String, Vec<String>>,
}

impl Roster {
    /// Build a roster from `(batch, members)` pairs. Member order is kept.
    pub fn new<I, M>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, M)>,
        M: IntoIterator<Item = String>,
    {
        Self {
            members: entries
                .into_iter()
                .map(|(batch, members)| (batch, members.into_iter().collect()))
                .collect(),
        }
    }

    /// Members of `batch` in declared order; empty for unknown batches.
    #[must_use]
    pub fn members(&self, batch: &str) -> &[String] {
        self.members.get(batch).map_or(&[], Vec::as_slice)
    }

    /// Display name of the first member of `batch` whose normalized form is `key`.
    #[must_use]
    pub fn lookup(&self, batch: &str, key: &str) -> Option<&str> {
        self.members(batch)
            .iter()
            .find(|member| normalize_member(member) == key)
            .map(String::as_str)
    }

    /// `(batch, key)` pairs where two members of one batch normalize to the same key.
    #[must_use]
    pub fn collisions(&self) -> Vec<(String, String)> {
        let mut found = Vec::new();
        for (batch, members) in &self.members {
            let mut keys: Vec<String> = members.iter().map(|m| normalize_member(m)).collect();
            keys.sort();
            for pair in keys.windows(2) {
                if pair[0] == pair[1] && !found.contains(&(batch.clone(), pair[0].clone())) {
                    found.push((batch.clone(), pair[0].clone()));
                }
            }
        }
        found.sort();
        found
    }

    /// Every roster must belong to a scheduled batch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRosterBatch`] for the first (alphabetical) stray roster.
    pub fn validate_against(&self, schedule: &Schedule) -> Result<(), ConfigError> {
        let mut batches: Vec<&String> = self.members.keys().collect();
        batches.sort();
        match batches.into_iter().find(|batch| schedule.get(batch).is_none()) {
            Some(batch) => Err(ConfigError::UnknownRosterBatch(batch.clone())),
            None => Ok(()),
        }
    }
}
