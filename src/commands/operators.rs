use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{CommandOutput, Connection};
use crate::api::WorkOrderApi;
use crate::console::filter_operators;
use crate::error::Result;

#[derive(Tabled)]
struct OperatorRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Username")]
    username: String,
}

/// List operators, optionally narrowed by a fuzzy search term
pub async fn cmd_operators(search: Option<&str>, output_json: bool) -> Result<()> {
    let (conn, _session) = Connection::logged_in()?;
    let operators = conn.api.get_operators().await?;
    let matched = filter_operators(&operators, search.unwrap_or(""));

    let text = if matched.is_empty() {
        "No operators found".to_string()
    } else {
        let rows: Vec<OperatorRow> = matched
            .iter()
            .map(|op| OperatorRow {
                id: op.id,
                username: op.username.clone(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        table.to_string()
    };

    CommandOutput::new(json!({ "operators": matched }))
        .with_text(text)
        .print(output_json)
}
