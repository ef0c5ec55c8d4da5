use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, Connection, local_time_zone};
use crate::api::WorkOrderApi;
use crate::console::actions_for;
use crate::display::{format_audit_entry, format_deadline, format_number, format_status_colored};
use crate::error::Result;

/// Display a work order with its activity log
pub async fn cmd_show(id: u64, output_json: bool) -> Result<()> {
    let (conn, session) = Connection::logged_in()?;
    let (order, logs) = futures::try_join!(
        conn.api.get_work_order(id),
        conn.api.get_audit_logs(id)
    )?;

    let actions: Vec<String> = actions_for(session.role(), &order)
        .iter()
        .map(|a| a.to_string())
        .collect();

    let json_output = json!({
        "work_order": order,
        "logs": logs,
        "actions": actions,
    });

    let tz = local_time_zone();
    let mut text = format!(
        "{} {}\n",
        order.work_order_number.cyan().bold(),
        format_status_colored(order.status)
    );
    text.push_str(&format!("{:>10}: {}\n", "Product", order.product_name));
    text.push_str(&format!(
        "{:>10}: {} / {} ({}%)\n",
        "Progress",
        format_number(u64::from(order.quantity)),
        format_number(u64::from(order.target_quantity)),
        order.progress_percent()
    ));
    text.push_str(&format!("{:>10}: {}\n", "Operator", order.operator.username));
    if let Some(manager) = &order.production_manager {
        text.push_str(&format!("{:>10}: {}\n", "Manager", manager.username));
    }
    text.push_str(&format!(
        "{:>10}: {}\n",
        "Deadline",
        format_deadline(order.production_deadline, &tz)
    ));
    text.push_str(&format!("{:>10}: {}\n", "Actions", actions.join(", ")));

    text.push_str(&format!("\n{}", "Activity".bold()));
    if logs.is_empty() {
        text.push_str(&format!("\n  {}", "no activity yet".dimmed()));
    }
    for entry in &logs {
        text.push_str("\n  ");
        text.push_str(&format_audit_entry(entry, &tz).replace('\n', "\n  "));
    }

    CommandOutput::new(json_output)
        .with_text(text)
        .print(output_json)
}
