use rollcall_core::ControlLayout;

/// `reply_markup` JSON for an inline keyboard.
#[must_use]
pub fn inline_keyboard_markup(layout: &ControlLayout) -> serde_json::Value {
    let rows: Vec<Vec<serde_json::Value>> = layout
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| {
                    serde_json::json!({
                        "text": button.label,
                        "callback_data": button.payload.encode(),
                    })
                })
                .collect()
        })
        .collect();
    serde_json::json!({ "inline_keyboard": rows })
}
