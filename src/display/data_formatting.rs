use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde_json::{Map, Value};

use crate::types::{AuditAction, AuditLogEntry};

/// Format a deadline as a calendar date in the given time zone.
///
/// ```
/// use jiff::tz::TimeZone;
/// use shopfloor::display::format_deadline;
///
/// let ts = "2024-05-01T20:00:00Z".parse().unwrap();
/// assert_eq!(format_deadline(ts, &TimeZone::UTC), "2024-05-01");
/// assert_eq!(format_deadline(ts, &TimeZone::fixed(jiff::tz::offset(7))), "2024-05-02");
/// ```
pub fn format_deadline(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone()).strftime("%Y-%m-%d").to_string()
}

/// Format a timestamp with minutes, for audit log entries.
pub fn format_timestamp(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone()).strftime("%Y-%m-%d %H:%M").to_string()
}

/// Group digits in threes with commas.
///
/// ```
/// use shopfloor::display::format_number;
///
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Usernames mentioned as `@name` in a note, first occurrence order.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut mentions: Vec<String> = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let at_boundary = prev.is_none_or(char::is_whitespace);
        prev = Some(c);
        if c != '@' || !at_boundary {
            continue;
        }
        let begin = start + c.len_utf8();
        let mut end = begin;
        while let Some(&(idx, next)) = chars.peek() {
            if !is_mention_char(next) {
                break;
            }
            end = idx + next.len_utf8();
            prev = Some(next);
            chars.next();
        }
        let name = text[begin..end].trim_end_matches('.');
        if !name.is_empty() && !mentions.iter().any(|m| m == name) {
            mentions.push(name.to_string());
        }
    }

    mentions
}

fn is_mention_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// One field that changed between an audit entry's old and new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub old: String,
    pub new: String,
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "(none)".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Fields whose values differ, over the union of both key sets.
pub fn audit_changes(
    old: Option<&Map<String, Value>>,
    new: Option<&Map<String, Value>>,
) -> Vec<FieldChange> {
    let empty = Map::new();
    let old = old.unwrap_or(&empty);
    let new = new.unwrap_or(&empty);

    let mut keys: Vec<&String> = new.keys().collect();
    keys.extend(old.keys().filter(|k| !new.contains_key(*k)));

    keys.into_iter()
        .filter(|key| old.get(*key) != new.get(*key))
        .map(|key| FieldChange {
            field: key.clone(),
            old: render_value(old.get(key)),
            new: render_value(new.get(key)),
        })
        .collect()
}

/// Plain-text lines describing what an audit entry did.
pub fn describe_audit_entry(entry: &AuditLogEntry) -> Vec<String> {
    match entry.action {
        AuditAction::Custom => vec![entry.note.clone()],
        AuditAction::Create => vec!["created work order".to_string()],
        AuditAction::Delete => vec!["deleted work order".to_string()],
        AuditAction::Update => {
            let mut lines: Vec<String> =
                audit_changes(entry.old_values.as_ref(), entry.new_values.as_ref())
                    .into_iter()
                    .map(|c| format!("{}: {} → {}", c.field, c.old, c.new))
                    .collect();
            if !entry.note.trim().is_empty() {
                lines.push(entry.note.clone());
            }
            if lines.is_empty() {
                lines.push("no field changes".to_string());
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(12345), "12,345");
    }

    #[test]
    fn test_extract_mentions() {
        assert_eq!(
            extract_mentions("@budi please check, cc @sari. thanks @budi"),
            vec!["budi", "sari"]
        );
        assert!(extract_mentions("mail me at ops@example.com").is_empty());
        assert!(extract_mentions("@ alone").is_empty());
    }

    #[test]
    fn test_audit_changes_union_of_keys() {
        let old = map(json!({"status": "pending", "quantity": 0, "note": "x"}));
        let new = map(json!({"status": "in_progress", "quantity": 0, "operator_id": 4}));
        let changes = audit_changes(Some(&old), Some(&new));
        let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains(&"status"));
        assert!(fields.contains(&"operator_id"));
        assert!(fields.contains(&"note"));

        let status = changes.iter().find(|c| c.field == "status").unwrap();
        assert_eq!(status.old, "pending");
        assert_eq!(status.new, "in_progress");
        let operator = changes.iter().find(|c| c.field == "operator_id").unwrap();
        assert_eq!(operator.old, "(none)");
        assert_eq!(operator.new, "4");
    }

    #[test]
    fn test_describe_custom_entry_uses_note() {
        let entry = AuditLogEntry {
            id: 1,
            user: crate::types::AuditUser {
                id: 2,
                username: "budi".to_string(),
                role: "operator".to_string(),
            },
            action: AuditAction::Custom,
            old_values: None,
            new_values: None,
            note: "line 2 jammed".to_string(),
            created_at: "2024-05-01T00:00:00Z".parse().unwrap(),
        };
        assert_eq!(describe_audit_entry(&entry), vec!["line 2 jammed"]);
    }
}
