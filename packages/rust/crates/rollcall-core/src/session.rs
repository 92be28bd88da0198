//! Mutable attendance session for the batch currently open for marking.

use std::collections::BTreeSet;

/// The single open session. `active_window == None` means closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active_window: Option<String>,
    absent_keys: BTreeSet<String>,
    pending_selection: BTreeSet<String>,
}

impl Session {
    /// Batch currently open for marking.
    #[must_use]
    pub fn active_window(&self) -> Option<&str> {
        self.active_window.as_deref()
    }

    /// Normalized keys marked absent.
    #[must_use]
    pub fn absent_keys(&self) -> &BTreeSet<String> {
        &self.absent_keys
    }

    /// Normalized keys toggled on the button layout but not yet confirmed.
    #[must_use]
    pub fn pending_selection(&self) -> &BTreeSet<String> {
        &self.pending_selection
    }

    /// Open `window`, discarding any unfinalized marks.
    pub fn open(&mut self, window: &str) {
        self.active_window = Some(window.to_string());
        self.absent_keys.clear();
        self.pending_selection.clear();
    }

    /// Close the session and clear every mark.
    pub fn close(&mut self) {
        self.active_window = None;
        self.absent_keys.clear();
        self.pending_selection.clear();
    }

    /// Add `key` to the absent set. Returns `false` if it was already there.
    pub fn mark_absent(&mut self, key: String) -> bool {
        self.absent_keys.insert(key)
    }

    /// Flip `key` in the pending selection. Returns the new membership.
    pub fn toggle_pending(&mut self, key: String) -> bool {
        if self.pending_selection.remove(&key) {
            false
        } else {
            self.pending_selection.insert(key);
            true
        }
    }

    /// Replace the absent set with the pending selection.
    pub fn commit_pending(&mut self) {
        self.absent_keys.clone_from(&self.pending_selection);
    }
}
