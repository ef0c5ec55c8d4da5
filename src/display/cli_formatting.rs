use jiff::tz::TimeZone;
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::data_formatting::{describe_audit_entry, extract_mentions, format_deadline, format_timestamp};
use crate::types::{AuditLogEntry, WorkOrder};

#[derive(Tabled)]
struct WorkOrderRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Operator")]
    operator: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
}

/// Render work orders as a rounded table. Colors are left out so column
/// widths line up.
pub fn work_order_table(records: &[WorkOrder], tz: &TimeZone) -> String {
    let rows: Vec<WorkOrderRow> = records
        .iter()
        .map(|r| WorkOrderRow {
            id: r.id,
            number: r.work_order_number.clone(),
            product: r.product_name.clone(),
            operator: r.operator.username.clone(),
            status: r.status.label().to_string(),
            progress: format!("{}/{} ({}%)", r.quantity, r.target_quantity, r.progress_percent()),
            deadline: format_deadline(r.production_deadline, tz),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format a work order for single-line display with colors
pub fn format_work_order_line(order: &WorkOrder, tz: &TimeZone) -> String {
    format!(
        "{} {} {} ({}/{}) @{} due {}",
        format!("{:18}", order.work_order_number).cyan(),
        super::format_status_colored(order.status),
        order.product_name,
        order.quantity,
        order.target_quantity,
        order.operator.username,
        format_deadline(order.production_deadline, tz),
    )
}

/// Highlight `@name` mentions in a note.
pub fn highlight_mentions(text: &str) -> String {
    let mut out = text.to_string();
    for name in extract_mentions(text) {
        let mention = format!("@{name}");
        out = out.replace(&mention, &mention.magenta().bold().to_string());
    }
    out
}

/// Format an audit entry as a header line plus indented change lines.
pub fn format_audit_entry(entry: &AuditLogEntry, tz: &TimeZone) -> String {
    let mut out = format!(
        "{} {} {}",
        format_timestamp(entry.created_at, tz).dimmed(),
        entry.user.username.bold(),
        format!("[{}]", entry.action).dimmed(),
    );
    for line in describe_audit_entry(entry) {
        out.push_str("\n    ");
        out.push_str(&highlight_mentions(&line));
    }
    out
}
