//! Attendance engine: interprets inbound chat events against the open session.
//!
//! Two front-ends share one session model:
//! - **Text**: `@ Name AP` marks absences, `done` finalizes.
//! - **Buttons**: one toggle per member plus CONFIRM; `done` still finalizes from
//!   the absent set, bypassing any pending toggle selection.
//!
//! Events must be delivered one at a time (`&mut self`); the host serializes them.

mod buttons;
mod command;
mod notice;
mod text;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::{
    AttendanceRecord, AttendanceStatus, BatchWindow, NotificationSink, PersistenceSink, Roster,
    Schedule, Session, build_toggle_layout, normalize_member,
};

pub use command::{TextCommand, parse_text_command};
pub use notice::{Notice, Summary};

/// Which operator front-end the engine drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineVariant {
    /// Plain-text commands only.
    Text,
    /// Inline toggle buttons with a text `done` fallback.
    #[default]
    Buttons,
}

impl Display for EngineVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Text => "text",
            Self::Buttons => "buttons",
        };
        write!(f, "{value}")
    }
}

impl FromStr for EngineVariant {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "buttons" | "button" | "inline" => Ok(Self::Buttons),
            _ => Err("invalid engine variant (expected `text` or `buttons`)"),
        }
    }
}

/// One event delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A text message.
    Text {
        /// Chat to reply to.
        chat_id: String,
        /// Raw message text.
        text: String,
    },
    /// A tap on an inline button.
    ButtonTap {
        /// Chat holding the tapped message.
        chat_id: String,
        /// Message carrying the layout.
        message_id: i64,
        /// Platform id used to acknowledge the tap.
        callback_id: String,
        /// Encoded [`crate::ButtonPayload`].
        payload: String,
    },
}

/// Session-owning attendance state machine.
#[derive(Debug)]
pub struct AttendanceEngine {
    schedule: Schedule,
    roster: Roster,
    variant: EngineVariant,
    session: Session,
}

impl AttendanceEngine {
    /// New engine with a closed session.
    #[must_use]
    pub fn new(schedule: Schedule, roster: Roster, variant: EngineVariant) -> Self {
        Self {
            schedule,
            roster,
            variant,
            session: Session::default(),
        }
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Configured front-end.
    #[must_use]
    pub fn variant(&self) -> EngineVariant {
        self.variant
    }

    /// Batch table.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Member lists.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Process one event at wall-clock `now`.
    ///
    /// # Errors
    ///
    /// Any notification or persistence failure is returned unchanged. A failure
    /// mid-finalize leaves earlier records written and the session as it was
    /// before the failing call.
    pub async fn handle(
        &mut self,
        event: &InboundEvent,
        now: NaiveDateTime,
        notifier: &dyn NotificationSink,
        persistence: &dyn PersistenceSink,
    ) -> anyhow::Result<()> {
        match event {
            InboundEvent::Text { chat_id, text } => match self.variant {
                EngineVariant::Text => {
                    self.handle_text_command(chat_id, text, now, notifier, persistence)
                        .await
                }
                EngineVariant::Buttons => {
                    self.handle_button_text(chat_id, text, now, notifier, persistence)
                        .await
                }
            },
            InboundEvent::ButtonTap {
                chat_id,
                message_id,
                callback_id,
                payload,
            } => {
                if self.variant == EngineVariant::Text {
                    tracing::debug!(payload = %payload, "button tap ignored in text variant");
                    return Ok(());
                }
                self.handle_tap(
                    chat_id,
                    *message_id,
                    callback_id,
                    payload,
                    now,
                    notifier,
                    persistence,
                )
                .await
            }
        }
    }

    /// Resolve the active window; open a fresh session if it changed.
    ///
    /// Returns `None` when the event was fully consumed (no active window, or the
    /// event opened a new session).
    async fn ensure_session(
        &mut self,
        chat_id: &str,
        now: NaiveDateTime,
        notifier: &dyn NotificationSink,
    ) -> anyhow::Result<Option<BatchWindow>> {
        let Some(window) = self.schedule.resolve(now.time()).cloned() else {
            tracing::debug!(time = %now.time(), "no batch window covers current time");
            notifier
                .send_text(chat_id, &Notice::NoActiveWindow.to_string())
                .await?;
            return Ok(None);
        };

        if self.session.active_window() == Some(window.name.as_str()) {
            return Ok(Some(window));
        }

        if let Some(previous) = self.session.active_window() {
            tracing::warn!(
                previous = %previous,
                discarded_absent = self.session.absent_keys().len(),
                discarded_pending = self.session.pending_selection().len(),
                "unfinalized batch session superseded"
            );
        }
        self.session.open(&window.name);
        tracing::info!(
            batch = %window.name,
            variant = %self.variant,
            members = self.roster.members(&window.name).len(),
            "batch session opened"
        );

        let started = Notice::BatchStarted {
            window: window.name.clone(),
            range: window.time_range_label(),
            variant: self.variant,
        }
        .to_string();
        match self.variant {
            EngineVariant::Text => notifier.send_text(chat_id, &started).await?,
            EngineVariant::Buttons => {
                let layout = build_toggle_layout(
                    self.roster.members(&window.name),
                    self.session.pending_selection(),
                );
                notifier.send_with_layout(chat_id, &started, &layout).await?;
            }
        }
        Ok(None)
    }

    fn summary(&self, window: &str) -> Summary {
        Summary::new(
            window,
            self.roster.members(window).len(),
            self.session.absent_keys().len(),
        )
    }

    /// One record per roster member, absent iff its normalized key is in the absent set.
    fn attendance_records(&self, window: &str, now: NaiveDateTime) -> Vec<AttendanceRecord> {
        let absent = self.session.absent_keys();
        self.roster
            .members(window)
            .iter()
            .map(|member| AttendanceRecord {
                date: now.date(),
                window: window.to_string(),
                member: member.clone(),
                status: if absent.contains(&normalize_member(member)) {
                    AttendanceStatus::Absent
                } else {
                    AttendanceStatus::Present
                },
                time: now.time(),
            })
            .collect()
    }

    async fn persist(
        &self,
        window: &str,
        now: NaiveDateTime,
        persistence: &dyn PersistenceSink,
    ) -> anyhow::Result<()> {
        let records = self.attendance_records(window, now);
        for record in &records {
            persistence.append_record(record).await?;
        }
        tracing::info!(batch = %window, records = records.len(), "attendance persisted");
        Ok(())
    }

    fn close_session(&mut self, summary: &Summary) {
        self.session.close();
        tracing::info!(
            batch = %summary.window,
            present = summary.present,
            absent = summary.absent,
            "batch session finalized"
        );
    }
}
