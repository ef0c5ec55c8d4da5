use serde_json::json;

use super::{CommandOutput, Connection};
use crate::api::WorkOrderApi;
use crate::display::{extract_mentions, highlight_mentions};
use crate::error::{Result, ShopfloorError};

/// Add a note to a work order's activity log
pub async fn cmd_note(id: u64, text: &str, output_json: bool) -> Result<()> {
    let note = text.trim();
    if note.is_empty() {
        return Err(ShopfloorError::Validation("note cannot be empty".to_string()));
    }

    let (conn, _session) = Connection::logged_in()?;
    let entry = conn.api.add_note(id, note).await?;
    let mentions = extract_mentions(note);

    CommandOutput::new(json!({
        "id": id,
        "log": entry,
        "mentions": mentions,
    }))
    .with_text(format!("Added note: {}", highlight_mentions(note)))
    .print(output_json)
}
