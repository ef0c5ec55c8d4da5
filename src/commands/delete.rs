use serde_json::json;
use tracing::info;

use super::interactive::{confirm, is_stdin_tty};
use super::{CommandOutput, Connection};
use crate::api::WorkOrderApi;
use crate::console::DeleteConfirmation;
use crate::console::actions::{RecordAction, require};
use crate::error::{Result, ShopfloorError};

/// Delete a work order after confirming with its number
///
/// # Arguments
/// * `id` - The work order id
/// * `yes` - Skip confirmation prompt
/// * `output_json` - If true, output result as JSON
pub async fn cmd_delete(id: u64, yes: bool, output_json: bool) -> Result<()> {
    let (conn, session) = Connection::logged_in()?;
    require(session.role(), RecordAction::Delete)?;

    if !yes && (output_json || !is_stdin_tty()) {
        return Err(ShopfloorError::Validation(
            "deleting requires --yes in non-interactive contexts".to_string(),
        ));
    }

    let order = conn.api.get_work_order(id).await?;
    let mut confirmation = DeleteConfirmation::for_order(&order);

    if !yes {
        let message = confirmation.message();
        if !confirm(message.trim_end_matches('?'))? {
            println!("Cancelled");
            return Ok(());
        }
    }

    let Some(target) = confirmation.confirm() else {
        return Ok(());
    };
    conn.api.delete_work_order(target).await?;
    info!(id = target, number = %confirmation.work_order_number, "work order deleted");

    CommandOutput::new(json!({
        "id": target,
        "work_order_number": confirmation.work_order_number,
        "action": "deleted",
    }))
    .with_text(format!(
        "Deleted work order {}",
        confirmation.work_order_number
    ))
    .print(output_json)
}
