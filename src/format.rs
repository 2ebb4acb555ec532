//! Human-readable renderings of card JSON
//!
//! The API responses are untyped, so every accessor here tolerates missing,
//! null, or empty fields and falls back to a placeholder.

use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

/// Non-empty string field of a JSON object
fn text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// First non-empty string among several keys
fn first_text<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| text(value, key))
}

/// Whether a JSON field is present and truthy
fn truthy(value: &Value, key: &str) -> bool {
    match value.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Format a byte count with binary units, one decimal place
#[must_use]
pub fn human_readable_bytes(num: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    #[allow(clippy::cast_precision_loss)]
    let mut size = num as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1}PB")
}

/// Normalise an ISO 8601 timestamp to RFC 3339 with an explicit offset
///
/// Missing values become `n/a`; unparsable values are returned unchanged.
#[must_use]
pub fn format_datetime(value: Option<&str>) -> String {
    match value {
        None | Some("") => "n/a".to_string(),
        Some(raw) => DateTime::parse_from_rfc3339(raw).map_or_else(
            |_| raw.to_string(),
            |parsed| parsed.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        ),
    }
}

/// Comma-separated labels, with colours in parentheses
#[must_use]
pub fn format_labels(labels: &[Value]) -> String {
    let parts: Vec<String> = labels
        .iter()
        .map(|label| {
            let name = first_text(label, &["name", "id"]).unwrap_or("<label>");
            match text(label, "color") {
                Some(color) => format!("{name} ({color})"),
                None => name.to_string(),
            }
        })
        .collect();
    if parts.is_empty() {
        "<none>".to_string()
    } else {
        parts.join(", ")
    }
}

/// Comma-separated members, with `@username` when not already in the name
#[must_use]
pub fn format_members(members: &[Value]) -> String {
    let parts: Vec<String> = members
        .iter()
        .map(|member| {
            let name = first_text(member, &["fullName", "username", "id"]).unwrap_or("<member>");
            match text(member, "username") {
                Some(username) if !name.contains(username) => format!("{name} (@{username})"),
                _ => name.to_string(),
            }
        })
        .collect();
    if parts.is_empty() {
        "<none>".to_string()
    } else {
        parts.join(", ")
    }
}

/// One-line digest of a card's badges, empty when nothing is notable
#[must_use]
pub fn summarize_badges(badges: &Value) -> String {
    let mut pieces = Vec::new();
    if truthy(badges, "due") {
        pieces.push(format!("due {}", format_datetime(text(badges, "due"))));
    }
    if truthy(badges, "dueComplete") {
        pieces.push("completed".to_string());
    }
    if truthy(badges, "subscribed") {
        pieces.push("subscribed".to_string());
    }
    if truthy(badges, "attachments") {
        pieces.push(format!("{} attachments", scalar(&badges["attachments"])));
    }
    if truthy(badges, "checkItems") {
        let checked = badges.get("checkItemsChecked").map_or_else(|| "0".to_string(), scalar);
        pieces.push(format!("{checked}/{} checklist items", scalar(&badges["checkItems"])));
    }
    if truthy(badges, "votes") {
        pieces.push(format!("votes: {}", scalar(&badges["votes"])));
    }
    pieces.join(", ")
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Confirmation printed after a card is created
#[must_use]
pub fn created_summary(card: &Value, board: &Value, list: &Value) -> String {
    let field = |value: &Value, key: &str| value.get(key).map_or_else(|| "None".to_string(), scalar);
    [
        "Created Trello card:".to_string(),
        format!("- Name: {}", field(card, "name")),
        format!("- Board: {} ({})", field(board, "name"), field(board, "shortLink")),
        format!("- List: {}", field(list, "name")),
        format!("- URL: {}", field(card, "shortUrl")),
        format!("- ID: {}", field(card, "id")),
    ]
    .join("\n")
}

/// Markdown digest of a card, its attachments, and its comments
#[must_use]
pub fn markdown_summary(card: &Value) -> String {
    let mut lines = Vec::new();

    let title = text(card, "name").unwrap_or("<unnamed card>");
    lines.push(format!("## Trello card: {title}"));
    if let Some(url) = first_text(card, &["shortUrl", "url"]) {
        lines.push(format!("[Open in Trello]({url})"));
    }
    lines.push(String::new());

    lines.push(format!(
        "- Short link: {}",
        card.get("shortLink").map_or_else(|| "<n/a>".to_string(), scalar)
    ));
    lines.push(format!("- Due: {}", format_datetime(text(card, "due"))));
    lines.push(format!("- Members: {}", format_members(array(card, "members"))));
    lines.push(format!("- Labels: {}", format_labels(array(card, "labels"))));
    if let Some(badges) = card.get("badges") {
        let badges = summarize_badges(badges);
        if !badges.is_empty() {
            lines.push(format!("- Badges: {badges}"));
        }
    }
    if let Some(activity) = text(card, "dateLastActivity") {
        lines.push(format!("- Last activity: {}", format_datetime(Some(activity))));
    }
    lines.push(String::new());

    lines.push("### Description".to_string());
    match text(card, "desc").map(str::trim).filter(|d| !d.is_empty()) {
        Some(desc) => lines.push(indent(desc, "  ")),
        None => lines.push("<no description>".to_string()),
    }
    lines.push(String::new());

    lines.push("### Attachments".to_string());
    let attachments = array(card, "attachments");
    if attachments.is_empty() {
        lines.push("<no attachments>".to_string());
    }
    for attachment in attachments {
        lines.push(attachment_line(attachment));
    }
    lines.push(String::new());

    lines.push("### Comments".to_string());
    let actions = array(card, "actions");
    if actions.is_empty() {
        lines.push("<no comments>".to_string());
    }
    for action in actions {
        if let Some(line) = comment_line(action) {
            lines.push(line);
        }
    }

    lines.join("\n")
}

fn attachment_line(attachment: &Value) -> String {
    let name = text(attachment, "name").unwrap_or("Attachment");
    let mut meta = Vec::new();
    if let Some(size) = attachment.get("bytes").and_then(Value::as_u64) {
        meta.push(human_readable_bytes(size));
    }
    if let Some(mime) = text(attachment, "mimeType") {
        meta.push(mime.to_string());
    }
    if truthy(attachment, "isUpload") {
        meta.push("uploaded".to_string());
    }
    let meta = if meta.is_empty() {
        String::new()
    } else {
        format!(" ({})", meta.join(", "))
    };

    match first_text(attachment, &["url", "downloadUrl"]) {
        Some(url) => format!("- [{name}]({url}){meta}"),
        None => format!("- {name}{meta}"),
    }
}

fn comment_line(action: &Value) -> Option<String> {
    let data = action.get("data").unwrap_or(&Value::Null);
    let body = first_text(data, &["text", "comment", "desc"])?;
    let author = action.get("memberCreator").unwrap_or(&Value::Null);
    let author = first_text(author, &["fullName", "username", "id"]).unwrap_or("Unknown");
    let date = format_datetime(text(action, "date"));
    Some(format!("- {date} by {author}: {body}"))
}
