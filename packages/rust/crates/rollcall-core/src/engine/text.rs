//! Text front-end: `@ Name AP` marks, `done` finalizes.

use chrono::NaiveDateTime;

use super::{AttendanceEngine, Notice, TextCommand, parse_text_command};
use crate::{NotificationSink, PersistenceSink, normalize_member};

impl AttendanceEngine {
    pub(super) async fn handle_text_command(
        &mut self,
        chat_id: &str,
        text: &str,
        now: NaiveDateTime,
        notifier: &dyn NotificationSink,
        persistence: &dyn PersistenceSink,
    ) -> anyhow::Result<()> {
        // The message that opens a session is consumed by the opening itself.
        let Some(window) = self.ensure_session(chat_id, now, notifier).await? else {
            return Ok(());
        };

        let notice = match parse_text_command(text) {
            TextCommand::Done => {
                let summary = self.summary(&window.name);
                notifier
                    .send_text(chat_id, &Notice::Summary(summary.clone()).to_string())
                    .await?;
                self.persist(&window.name, now, persistence).await?;
                self.close_session(&summary);
                return Ok(());
            }
            TextCommand::MarkAbsent(name_part) => self.mark_absent(&window.name, name_part),
            TextCommand::Malformed => Notice::MalformedCommand,
            TextCommand::Other => Notice::UsageHint,
        };
        notifier.send_text(chat_id, &notice.to_string()).await
    }

    fn mark_absent(&mut self, window: &str, name_part: String) -> Notice {
        let key = normalize_member(&name_part);
        let Some(member) = self.roster.lookup(window, &key).map(str::to_string) else {
            tracing::debug!(batch = %window, name = %name_part, "absence mark for unknown member");
            return Notice::MemberNotFound { name: name_part };
        };
        if !self.session.mark_absent(key) {
            return Notice::DuplicateAbsenceMark { member };
        }
        tracing::debug!(
            batch = %window,
            member = %member,
            absent = self.session.absent_keys().len(),
            "member marked absent"
        );
        Notice::MarkedAbsent { member }
    }
}
