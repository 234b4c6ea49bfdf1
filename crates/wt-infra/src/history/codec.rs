use chrono::{Local, NaiveDateTime, TimeZone};
use wt_core::ClipboardItem;

/// Local-time layout of the timestamp field.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SEPARATOR: char = '|';

/// Suffix of the timestamp field on records whose content is escaped.
/// Unmarked records carry their content verbatim, as legacy stores do.
pub const ESCAPED_MARKER: char = '~';

/// Encode one history record as a single line (without the trailing newline).
///
/// Content that would break the one-record-per-line layout is escaped and
/// the record marked; anything else is written in the legacy form.
pub fn encode_line(item: &ClipboardItem) -> String {
    let timestamp = format_timestamp(item.timestamp_ms);
    if needs_escape(&item.content) {
        format!(
            "{timestamp}{ESCAPED_MARKER}{SEPARATOR}{}",
            escape_content(&item.content)
        )
    } else {
        format!("{timestamp}{SEPARATOR}{}", item.content)
    }
}

/// Decode one line. `None` when the separator is missing or the timestamp
/// field parses neither as a local datetime nor as raw milliseconds.
pub fn decode_line(line: &str) -> Option<ClipboardItem> {
    let (timestamp, content) = line.split_once(SEPARATOR)?;
    match timestamp.strip_suffix(ESCAPED_MARKER) {
        Some(timestamp) => Some(ClipboardItem::new(
            unescape_content(content),
            parse_timestamp(timestamp)?,
        )),
        None => Some(ClipboardItem::new(content, parse_timestamp(timestamp)?)),
    }
}

fn needs_escape(content: &str) -> bool {
    content.contains(['\\', '\n', '\r'])
}

fn format_timestamp(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).earliest() {
        Some(dt) => dt.format(DATETIME_FORMAT).to_string(),
        // out of chrono's range; the legacy raw form still round-trips
        None => timestamp_ms.to_string(),
    }
}

fn parse_timestamp(field: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(field, DATETIME_FORMAT)
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|dt| dt.timestamp_millis())
        .or_else(|| field.parse::<i64>().ok())
}

pub fn escape_content(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_content`]. Unknown backslash sequences are kept as is.
pub fn unescape_content(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            _ => {
                out.push('\\');
                continue;
            }
        }
        chars.next();
    }
    out
}
