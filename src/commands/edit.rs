//! `edit`: manager edit of any work-order field.

use serde_json::json;
use tracing::info;

use super::{CommandOutput, Connection, local_time_zone, parse_deadline, require_manager};
use crate::api::WorkOrderApi;
use crate::console::{EditDraft, filter_operators};
use crate::error::{Result, ShopfloorError};
use crate::types::{Operator, WorkOrderStatus};

/// Field overrides for `edit`; unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub product_name: Option<String>,
    pub quantity: Option<u32>,
    pub target_quantity: Option<u32>,
    pub deadline: Option<String>,
    pub status: Option<WorkOrderStatus>,
    /// Operator id or a username search term
    pub operator: Option<String>,
}

/// Resolve `--operator` to an id: a number is taken as-is, anything else must
/// fuzzy-match exactly one best operator.
pub(crate) fn resolve_operator(operators: &[Operator], raw: &str) -> Result<u64> {
    if let Ok(id) = raw.trim().parse::<u64>() {
        return operators
            .iter()
            .find(|op| op.id == id)
            .map(|op| op.id)
            .ok_or_else(|| ShopfloorError::Validation(format!("no operator with id {id}")));
    }
    filter_operators(operators, raw)
        .first()
        .map(|op| op.id)
        .ok_or_else(|| ShopfloorError::Validation(format!("no operator matches '{raw}'")))
}

pub async fn cmd_edit(id: u64, options: EditOptions, output_json: bool) -> Result<()> {
    let (conn, session) = Connection::logged_in()?;
    require_manager(&session, "edit work orders (operators use `shopfloor status`)")?;

    let order = conn.api.get_work_order(id).await?;
    let mut draft = EditDraft::for_order(&order);

    if let Some(name) = options.product_name {
        draft.product_name = name;
    }
    if let Some(quantity) = options.quantity {
        draft.quantity = quantity;
    }
    if let Some(target) = options.target_quantity {
        draft.target_quantity = target;
    }
    if let Some(deadline) = &options.deadline {
        draft.production_deadline = Some(parse_deadline(deadline, &local_time_zone())?);
    }
    if let Some(status) = options.status {
        draft.status = status;
    }
    if let Some(operator) = &options.operator {
        let operators = conn.api.get_operators().await?;
        draft.operator_id = Some(resolve_operator(&operators, operator)?);
    }

    let update = draft.validate()?;
    let updated = conn.api.update_work_order(id, &update).await?;
    info!(id, "work order updated");

    CommandOutput::new(json!({ "work_order": updated }))
        .with_text(format!("Updated work order {}", updated.work_order_number))
        .print(output_json)
}
