//! Text command parsing for the `@ Name AP` / `done` protocol.

/// What an operator's text message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand {
    /// `done` (any case, surrounding whitespace ignored): finalize the batch.
    Done,
    /// `@<name>ap`: mark `<name>` absent. Holds the raw (trimmed) name part.
    MarkAbsent(String),
    /// `@` … `ap` with nothing in between.
    Malformed,
    /// Anything else.
    Other,
}

/// Classify one text message.
///
/// The absence marker is the first `ap` substring (ASCII case-insensitive) anywhere
/// after the leading `@`, so a name that itself contains `ap` is cut short there.
#[must_use]
pub fn parse_text_command(text: &str) -> TextCommand {
    let text = text.trim();
    if text.to_lowercase() == "done" {
        return TextCommand::Done;
    }
    if !text.starts_with('@') {
        return TextCommand::Other;
    }
    let Some(marker) = find_absent_marker(text) else {
        return TextCommand::Other;
    };
    let name_part = text['@'.len_utf8()..marker].trim();
    if name_part.is_empty() {
        TextCommand::Malformed
    } else {
        TextCommand::MarkAbsent(name_part.to_string())
    }
}

fn find_absent_marker(text: &str) -> Option<usize> {
    text.char_indices()
        .skip(1)
        .map(|(index, _)| index)
        .find(|&index| {
            text.get(index..index + 2)
                .is_some_and(|pair| pair.eq_ignore_ascii_case("ap"))
        })
}
