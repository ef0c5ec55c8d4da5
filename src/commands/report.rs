//! Manager reports.

use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{CommandOutput, Connection, parse_date, require_manager};
use crate::api::{ReportRange, WorkOrderApi};
use crate::display::format_number;
use crate::error::{Result, ShopfloorError};
use crate::reports::{calculate_totals, completion_rate, summary_table_rows};

const SUMMARY_HEADERS: [&str; 9] = [
    "Product",
    "Work orders",
    "Target",
    "Achieved",
    "Achievement",
    "Pending",
    "In progress",
    "Completed",
    "Cancelled",
];

#[derive(Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Operator")]
    username: String,
    #[tabled(rename = "Assigned")]
    assigned: String,
    #[tabled(rename = "In progress")]
    in_progress: String,
    #[tabled(rename = "Completed")]
    completed: String,
    #[tabled(rename = "Completion")]
    completion: String,
    #[tabled(rename = "Quantity")]
    total_quantity: String,
}

fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<ReportRange> {
    let range = ReportRange {
        start_date: from.map(parse_date).transpose()?,
        end_date: to.map(parse_date).transpose()?,
    };
    if let (Some(start), Some(end)) = (range.start_date, range.end_date)
        && start > end
    {
        return Err(ShopfloorError::Validation(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok(range)
}

pub async fn cmd_report_summary(
    from: Option<&str>,
    to: Option<&str>,
    output_json: bool,
) -> Result<()> {
    let range = parse_range(from, to)?;
    let (conn, session) = Connection::logged_in()?;
    require_manager(&session, "view reports")?;

    let rows = conn.api.report_summary(&range).await?;
    let totals = calculate_totals(&rows);

    let mut builder = Builder::default();
    builder.push_record(SUMMARY_HEADERS);
    for row in summary_table_rows(&rows) {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::rounded());

    CommandOutput::new(json!({
        "summary": rows,
        "totals": totals,
    }))
    .with_text(table.to_string())
    .print(output_json)
}

pub async fn cmd_report_operators(
    from: Option<&str>,
    to: Option<&str>,
    output_json: bool,
) -> Result<()> {
    let range = parse_range(from, to)?;
    let (conn, session) = Connection::logged_in()?;
    require_manager(&session, "view reports")?;

    let performances = conn.api.operator_performance(&range).await?;
    let text = if performances.is_empty() {
        "No operator activity in this period".to_string()
    } else {
        let rows: Vec<PerformanceRow> = performances
            .iter()
            .map(|p| PerformanceRow {
                username: p.username.clone(),
                assigned: format_number(p.assigned),
                in_progress: format_number(p.in_progress),
                completed: format_number(p.completed),
                completion: format!("{}%", completion_rate(p)),
                total_quantity: format_number(p.total_quantity),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        table.to_string()
    };

    CommandOutput::new(json!({ "performances": performances }))
        .with_text(text)
        .print(output_json)
}
