use serde_json::json;
use tracing::info;

use super::edit::resolve_operator;
use super::{CommandOutput, Connection, local_time_zone, parse_deadline, require_manager};
use crate::api::{NewWorkOrder, WorkOrderApi};
use crate::console::validate_new_work_order;
use crate::error::Result;

/// Options for creating a new work order
pub struct CreateOptions {
    pub product_name: String,
    pub target_quantity: u32,
    pub quantity: u32,
    pub deadline: String,
    /// Operator id or a username search term
    pub operator: String,
}

/// Create a new work order and assign it to an operator
pub async fn cmd_create(options: CreateOptions, output_json: bool) -> Result<()> {
    let (conn, session) = Connection::logged_in()?;
    require_manager(&session, "create work orders")?;

    let operators = conn.api.get_operators().await?;
    let order = NewWorkOrder {
        product_name: options.product_name.trim().to_string(),
        quantity: options.quantity,
        target_quantity: options.target_quantity,
        production_deadline: parse_deadline(&options.deadline, &local_time_zone())?,
        operator_id: resolve_operator(&operators, &options.operator)?,
    };
    validate_new_work_order(&order)?;

    let created = conn.api.create_work_order(&order).await?;
    info!(id = created.id, number = %created.work_order_number, "work order created");

    CommandOutput::new(json!({ "work_order": created }))
        .with_text(format!(
            "Created work order {} for {}",
            created.work_order_number, created.operator.username
        ))
        .print(output_json)
}
