//! Interactive toggle layout for the button variant.

use std::collections::BTreeSet;

use crate::normalize_member;

const TOGGLE_PREFIX: &str = "TOGGLE:";
const CONFIRM_PAYLOAD: &str = "CONFIRM";
const BUTTONS_PER_ROW: usize = 2;

/// Label of the trailing confirm button.
pub const CONFIRM_LABEL: &str = "✅ CONFIRM";

/// Data carried by a button tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonPayload {
    /// Flip one member in the pending selection.
    Toggle(String),
    /// Commit the selection and finalize.
    Confirm,
}

impl ButtonPayload {
    /// Wire form: `TOGGLE:<name>` or `CONFIRM`.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Toggle(name) => format!("{TOGGLE_PREFIX}{name}"),
            Self::Confirm => CONFIRM_PAYLOAD.to_string(),
        }
    }

    /// Parse the wire form; anything else is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(name) = raw.strip_prefix(TOGGLE_PREFIX) {
            return Some(Self::Toggle(name.to_string()));
        }
        (raw == CONFIRM_PAYLOAD).then_some(Self::Confirm)
    }
}

/// One tappable button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlButton {
    /// Visible text.
    pub label: String,
    /// Data sent back on tap.
    pub payload: ButtonPayload,
}

/// Rows of buttons attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlLayout {
    /// Rows, top to bottom.
    pub rows: Vec<Vec<ControlButton>>,
}

/// Two toggles per row (✅ selected, ❌ not), then a single confirm row.
#[must_use]
pub fn build_toggle_layout(members: &[String], selected: &BTreeSet<String>) -> ControlLayout {
    let mut rows: Vec<Vec<ControlButton>> = members
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| {
            chunk
                .iter()
                .map(|name| {
                    let mark = if selected.contains(&normalize_member(name)) {
                        "✅"
                    } else {
                        "❌"
                    };
                    ControlButton {
                        label: format!("{name} {mark}"),
                        payload: ButtonPayload::Toggle(name.clone()),
                    }
                })
                .collect()
        })
        .collect();
    rows.push(vec![ControlButton {
        label: CONFIRM_LABEL.to_string(),
        payload: ButtonPayload::Confirm,
    }]);
    ControlLayout { rows }
}
