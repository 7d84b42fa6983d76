//! Stream announcement formatting.

/// Suffix marking a stream as hidden.
const HIDDEN_SUFFIX: char = '_';

/// Discord underline delimiter.
const UNDERLINE: &str = "__";

/// Returns whether a stream should be announced.
///
/// Names ending in `_` are hidden test/private streams.
pub fn should_announce(stream_name: &str) -> bool {
    !stream_name.is_empty() && !stream_name.ends_with(HIDDEN_SUFFIX)
}

/// Escapes `__` so the name cannot close the surrounding underline markup.
///
/// Line breaks are flattened to spaces to keep the message on one line.
/// A trailing `\` is left as-is and will escape the closing delimiter
/// (`a\` renders as `__a\__`); this is a known edge.
pub fn escape_markup(stream_name: &str) -> String {
    stream_name
        .replace(UNDERLINE, "\\__")
        .replace(['\r', '\n'], " ")
}

/// Query-escapes a name for use as the last URL path segment.
pub fn escape_url(stream_name: &str) -> String {
    urlencoding::encode(stream_name).replace("%20", "+")
}

/// Builds the announcement message for a started stream.
///
/// `base_url` is expected to end in `/`.
pub fn format_announcement(stream_name: &str, base_url: &str) -> String {
    format!(
        "Stream {}{}{} has started. {}{}",
        UNDERLINE,
        escape_markup(stream_name),
        UNDERLINE,
        base_url,
        escape_url(stream_name)
    )
}
