//! Button front-end: toggle selection, CONFIRM, and the text `done` fallback.

use chrono::NaiveDateTime;

use super::{AttendanceEngine, Notice, TextCommand, parse_text_command};
use crate::{ButtonPayload, NotificationSink, PersistenceSink, build_toggle_layout, normalize_member};

impl AttendanceEngine {
    pub(super) async fn handle_button_text(
        &mut self,
        chat_id: &str,
        text: &str,
        now: NaiveDateTime,
        notifier: &dyn NotificationSink,
        persistence: &dyn PersistenceSink,
    ) -> anyhow::Result<()> {
        let Some(window) = self.ensure_session(chat_id, now, notifier).await? else {
            return Ok(());
        };

        if parse_text_command(text) != TextCommand::Done {
            tracing::debug!(batch = %window.name, "text ignored while button layout is active");
            return Ok(());
        }

        // Finalizes from the absent set; the pending toggle selection is not consulted.
        let summary = self.summary(&window.name);
        self.persist(&window.name, now, persistence).await?;
        notifier
            .send_text(chat_id, &Notice::Summary(summary.clone()).to_string())
            .await?;
        self.close_session(&summary);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) async fn handle_tap(
        &mut self,
        chat_id: &str,
        message_id: i64,
        callback_id: &str,
        payload: &str,
        now: NaiveDateTime,
        notifier: &dyn NotificationSink,
        persistence: &dyn PersistenceSink,
    ) -> anyhow::Result<()> {
        notifier.acknowledge(callback_id).await?;

        // Taps act on the open session even after its window has ended.
        let Some(window) = self.session.active_window().map(str::to_string) else {
            return notifier
                .edit_message_text(chat_id, message_id, &Notice::NoOpenSession.to_string())
                .await;
        };

        match ButtonPayload::parse(payload) {
            Some(ButtonPayload::Toggle(name)) => {
                let selected = self.session.toggle_pending(normalize_member(&name));
                tracing::debug!(
                    batch = %window,
                    member = %name,
                    selected,
                    pending = self.session.pending_selection().len(),
                    "absence toggle"
                );
                let layout = build_toggle_layout(
                    self.roster.members(&window),
                    self.session.pending_selection(),
                );
                notifier
                    .edit_control_layout(chat_id, message_id, &layout)
                    .await
            }
            Some(ButtonPayload::Confirm) => {
                self.session.commit_pending();
                let summary = self.summary(&window);
                self.persist(&window, now, persistence).await?;
                notifier
                    .edit_message_text(
                        chat_id,
                        message_id,
                        &Notice::Summary(summary.clone()).to_string(),
                    )
                    .await?;
                self.close_session(&summary);
                Ok(())
            }
            None => {
                tracing::warn!(payload = %payload, "unrecognized button payload ignored");
                Ok(())
            }
        }
    }
}
