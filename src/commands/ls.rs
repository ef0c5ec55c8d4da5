//! `ls`: one page of work orders in any view mode.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, Connection, local_time_zone, parse_date};
use crate::api::WorkOrderApi;
use crate::console::pagination::render_pages;
use crate::console::projection::{self, CalendarContext, CalendarMonth, Projection};
use crate::console::{FilterController, Pager, ViewMode};
use crate::display::{format_status_colored, format_work_order_line, work_order_table};
use crate::error::{Result, ShopfloorError};
use crate::types::{Role, WorkOrder, WorkOrderStatus};

/// Filters and presentation for `ls`.
#[derive(Debug, Clone, Default)]
pub struct LsOptions {
    pub status: Option<WorkOrderStatus>,
    pub operator: Option<u64>,
    pub search: Option<String>,
    pub deadline: Option<String>,
    pub page: Option<u32>,
    pub view: ViewMode,
    /// `YYYY-MM` month for the calendar view
    pub month: Option<String>,
}

/// Build the filter state for `role`, rejecting dimensions the role's list
/// endpoint does not accept.
fn build_filters(role: Role, options: &LsOptions) -> Result<FilterController> {
    let mut filters = FilterController::new(role);
    if !role.is_manager() && (options.search.is_some() || options.deadline.is_some()) {
        return Err(ShopfloorError::Validation(
            "operators can only filter their assigned work orders by status".to_string(),
        ));
    }

    filters.set_status(options.status);
    if options.operator.is_some() {
        filters.set_operator(options.operator)?;
    }
    if let Some(search) = &options.search {
        filters.set_search(search.clone());
    }
    if let Some(deadline) = &options.deadline {
        filters.set_deadline(Some(parse_date(deadline)?));
    }
    if let Some(page) = options.page {
        if page == 0 {
            return Err(ShopfloorError::Validation("page starts at 1".to_string()));
        }
        filters.set_page(page);
    }
    Ok(filters)
}

fn parse_month(raw: &str) -> Result<Date> {
    parse_date(&format!("{}-01", raw.trim()))
}

pub async fn cmd_ls(options: LsOptions, output_json: bool) -> Result<()> {
    let (conn, session) = Connection::logged_in()?;
    let role = session.role();
    if !options.view.is_available_for(role) {
        return Err(ShopfloorError::Forbidden(format!(
            "the {} view is only available to production managers",
            options.view
        )));
    }

    let filters = build_filters(role, &options)?;
    let query = filters.query(conn.config.page_size);

    let page = conn.api.list_work_orders(&query).await?;
    let records = page.records.as_slice();
    let pagination = page.pagination;

    if output_json {
        return CommandOutput::new(json!({
            "work_orders": records,
            "pagination": pagination,
        }))
        .print(true);
    }

    let tz = local_time_zone();
    let today = jiff::Zoned::now().date();
    let month = match &options.month {
        Some(raw) => parse_month(raw)?,
        None => today,
    };
    let calendar = CalendarContext {
        month,
        today,
        time_zone: tz.clone(),
    };

    let mut text = if records.is_empty() {
        if filters.state().is_filtered() {
            "No work orders match the current filters".to_string()
        } else {
            "No work orders found".to_string()
        }
    } else {
        render_projection(projection::project(records, options.view, &calendar), &tz)
    };

    let pager = Pager::from_pagination(&pagination);
    text.push_str(&format!(
        "\n\n{}  {}",
        render_pages(&pager.visible_pages(), pager.current()),
        format!(
            "page {} of {}, {} work order(s)",
            pager.current(),
            pager.total(),
            pagination.total
        )
        .dimmed()
    ));

    CommandOutput::new(json!({})).with_text(text).print(false)
}

fn render_projection(projection: Projection, tz: &TimeZone) -> String {
    match projection {
        Projection::Table(records) => work_order_table(&records, tz),
        Projection::KanbanByStatus(columns) => columns
            .iter()
            .map(|column| {
                let header = format_status_colored_with_count(column.status, column.records.len());
                render_column(header, &column.records, tz)
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        Projection::KanbanByOperator(columns) => columns
            .iter()
            .map(|column| {
                let header = format!(
                    "{} ({})",
                    column.operator.username.bold(),
                    column.records.len()
                );
                render_column(header, &column.records, tz)
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        Projection::Calendar(month) => render_calendar(&month),
    }
}

fn format_status_colored_with_count(status: WorkOrderStatus, count: usize) -> String {
    format!("{} ({count})", format_status_colored(status))
}

fn render_column(header: String, records: &[WorkOrder], tz: &TimeZone) -> String {
    let mut out = header;
    if records.is_empty() {
        out.push_str(&format!("\n  {}", "(none)".dimmed()));
    }
    for record in records {
        out.push_str("\n  ");
        out.push_str(&format_work_order_line(record, tz));
    }
    out
}

/// Month grid with per-day counts, followed by the records of each busy day.
pub(crate) fn render_calendar(month: &CalendarMonth) -> String {
    let mut out = format!("{}\n", month.title().bold());
    out.push_str(" Sun  Mon  Tue  Wed  Thu  Fri  Sat\n");
    for week in &month.weeks {
        let line: Vec<String> = week
            .iter()
            .map(|day| {
                let count = day.cell.total();
                let mark = if count > 0 { '*' } else { ' ' };
                let cell = format!("{:>3}{mark} ", day.date.day());
                if day.is_today {
                    cell.reversed().to_string()
                } else if !day.in_month {
                    cell.dimmed().to_string()
                } else {
                    cell
                }
            })
            .collect();
        out.push_str(&line.join(""));
        out.push('\n');
    }

    for day in month.days().filter(|d| d.in_month && d.cell.total() > 0) {
        let mut entries: Vec<String> = day
            .cell
            .visible
            .iter()
            .map(|r| r.work_order_number.clone())
            .collect();
        if let Some(more) = day.cell.overflow_label() {
            entries.push(more);
        }
        out.push_str(&format!("\n{}  {}", day.date, entries.join(", ")));
    }
    out
}
