use async_trait::async_trait;
use rollcall_core::{ControlLayout, NotificationSink};

use super::TelegramChannel;
use super::keyboard::inline_keyboard_markup;

#[async_trait]
impl NotificationSink for TelegramChannel {
    async fn send_text(&self, chat_id: &str, text: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        self.send_api_request_with_retry("sendMessage", &body)
            .await
            .map_err(|error| anyhow::anyhow!("Telegram sendMessage failed: {error}"))
    }

    async fn send_with_layout(
        &self,
        chat_id: &str,
        text: &str,
        layout: &ControlLayout,
    ) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "reply_markup": inline_keyboard_markup(layout),
        });
        self.send_api_request_with_retry("sendMessage", &body)
            .await
            .map_err(|error| anyhow::anyhow!("Telegram sendMessage (inline keyboard) failed: {error}"))
    }

    async fn edit_control_layout(
        &self,
        chat_id: &str,
        message_id: i64,
        layout: &ControlLayout,
    ) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "reply_markup": inline_keyboard_markup(layout),
        });
        self.send_edit_request("editMessageReplyMarkup", &body)
            .await
            .map_err(|error| anyhow::anyhow!("Telegram editMessageReplyMarkup failed: {error}"))
    }

    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: i64,
        text: &str,
    ) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
        });
        self.send_edit_request("editMessageText", &body)
            .await
            .map_err(|error| anyhow::anyhow!("Telegram editMessageText failed: {error}"))
    }

    async fn acknowledge(&self, callback_id: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({ "callback_query_id": callback_id });
        self.send_api_request_with_retry("answerCallbackQuery", &body)
            .await
            .map_err(|error| anyhow::anyhow!("Telegram answerCallbackQuery failed: {error}"))
    }
}
