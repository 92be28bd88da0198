//! Outbound seams: chat notifications and attendance persistence.

use async_trait::async_trait;

use crate::{AttendanceRecord, ControlLayout};

/// Chat-side effects. Implementations are fire-and-forget; errors propagate to the caller.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Reply with plain text.
    async fn send_text(&self, chat_id: &str, text: &str) -> anyhow::Result<()>;

    /// Reply with text and an interactive button layout.
    async fn send_with_layout(
        &self,
        chat_id: &str,
        text: &str,
        layout: &ControlLayout,
    ) -> anyhow::Result<()>;

    /// Replace the button layout of an existing message in place.
    async fn edit_control_layout(
        &self,
        chat_id: &str,
        message_id: i64,
        layout: &ControlLayout,
    ) -> anyhow::Result<()>;

    /// Replace the text of an existing message (drops its layout).
    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: i64,
        text: &str,
    ) -> anyhow::Result<()>;

    /// Acknowledge a button tap so the client stops its progress indicator.
    async fn acknowledge(&self, _callback_id: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Append-only attendance store (one call per roster member per finalize).
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    /// Append one record. No retry is attempted by the engine.
    async fn append_record(&self, record: &AttendanceRecord) -> anyhow::Result<()>;
}
