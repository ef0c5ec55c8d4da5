//! `status`: an operator reports progress on an assigned work order.

use serde_json::json;
use tracing::info;

use super::{CommandOutput, Connection};
use crate::api::{StatusUpdate, WorkOrderApi};
use crate::console::StatusDraft;
use crate::display::format_status_colored;
use crate::error::Result;
use crate::types::{Role, WorkOrderStatus};

pub async fn cmd_status(
    id: u64,
    status: Option<WorkOrderStatus>,
    quantity: Option<u32>,
    description: Option<String>,
    output_json: bool,
) -> Result<()> {
    let (conn, session) = Connection::logged_in()?;
    let order = conn.api.get_work_order(id).await?;

    let update = match session.role() {
        Role::Operator => {
            let mut draft = StatusDraft::for_order(&order);
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(quantity) = quantity {
                draft.quantity = quantity;
            }
            draft.description = description.unwrap_or_default();
            draft.validate()?
        }
        // Managers are not bound to the operator transition table.
        Role::ProductionManager => StatusUpdate {
            status: status.unwrap_or(order.status),
            quantity,
            description: description.filter(|d| !d.trim().is_empty()),
        },
    };

    let updated = conn.api.update_status(id, &update).await?;
    info!(id, status = %updated.status, quantity = updated.quantity, "status updated");

    CommandOutput::new(json!({
        "work_order": updated,
        "previous_status": order.status,
    }))
    .with_text(format!(
        "{} {} -> {} ({}/{})",
        updated.work_order_number,
        format_status_colored(order.status),
        format_status_colored(updated.status),
        updated.quantity,
        updated.target_quantity
    ))
    .print(output_json)
}
