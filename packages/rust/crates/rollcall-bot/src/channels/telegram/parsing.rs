use rollcall_core::InboundEvent;

use super::TelegramChannel;

impl TelegramChannel {
    /// Parse a Telegram update into an engine event (None for unsupported updates).
    ///
    /// Text messages and callback queries are kept; bot commands (`/start`, ...),
    /// media and service messages are dropped.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn parse_update(&self, update: &serde_json::Value) -> Option<InboundEvent> {
        if let Some(query) = update.get("callback_query") {
            return parse_callback_query(query);
        }

        let message = update.get("message")?;
        let text = message.get("text").and_then(serde_json::Value::as_str)?;
        let chat_id = message
            .get("chat")
            .and_then(|chat| chat.get("id"))
            .and_then(serde_json::Value::as_i64)?;

        if is_bot_command(message, text) {
            tracing::debug!(chat_id, "telegram bot command ignored");
            return None;
        }

        Some(InboundEvent::Text {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        })
    }
}

fn parse_callback_query(query: &serde_json::Value) -> Option<InboundEvent> {
    let callback_id = query.get("id").and_then(serde_json::Value::as_str)?;
    let payload = query.get("data").and_then(serde_json::Value::as_str)?;
    let message = query.get("message")?;
    let chat_id = message
        .get("chat")
        .and_then(|chat| chat.get("id"))
        .and_then(serde_json::Value::as_i64)?;
    let message_id = message
        .get("message_id")
        .and_then(serde_json::Value::as_i64)?;

    Some(InboundEvent::ButtonTap {
        chat_id: chat_id.to_string(),
        message_id,
        callback_id: callback_id.to_string(),
        payload: payload.to_string(),
    })
}

fn is_bot_command(message: &serde_json::Value, text: &str) -> bool {
    if text.starts_with('/') {
        return true;
    }
    message
        .get("entities")
        .and_then(serde_json::Value::as_array)
        .is_some_and(|entities| {
            entities.iter().any(|entity| {
                entity.get("type").and_then(serde_json::Value::as_str) == Some("bot_command")
                    && entity.get("offset").and_then(serde_json::Value::as_u64) == Some(0)
            })
        })
}
