//! View-mode projections of the loaded page.
//!
//! Every projection is a pure function of the records already loaded;
//! switching modes never needs a fetch.

use std::collections::BTreeMap;
use std::fmt;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Span, ToSpan};

use crate::types::{OperatorRef, Role, WorkOrder, WorkOrderStatus};

/// Records shown per calendar day before collapsing into "+N more".
pub const MAX_VISIBLE_PER_DAY: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Table,
    KanbanByStatus,
    KanbanByOperator,
    Calendar,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Table,
        ViewMode::KanbanByStatus,
        ViewMode::KanbanByOperator,
        ViewMode::Calendar,
    ];

    const OPERATOR_MODES: [ViewMode; 3] =
        [ViewMode::Table, ViewMode::KanbanByStatus, ViewMode::Calendar];

    /// Modes a session with `role` may select, in cycling order.
    pub fn available_for(role: Role) -> &'static [ViewMode] {
        if role.is_manager() {
            &Self::ALL
        } else {
            &Self::OPERATOR_MODES
        }
    }

    pub fn is_available_for(self, role: Role) -> bool {
        Self::available_for(role).contains(&self)
    }

    /// Next mode in the role's cycle.
    pub fn next_for(self, role: Role) -> ViewMode {
        let modes = Self::available_for(role);
        match modes.iter().position(|m| *m == self) {
            Some(i) => modes[(i + 1) % modes.len()],
            None => modes[0],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::KanbanByStatus => "Kanban (status)",
            ViewMode::KanbanByOperator => "Kanban (operator)",
            ViewMode::Calendar => "Calendar",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Table => "table",
            ViewMode::KanbanByStatus => "kanban-status",
            ViewMode::KanbanByOperator => "kanban-operator",
            ViewMode::Calendar => "calendar",
        })
    }
}

impl std::str::FromStr for ViewMode {
    type Err = crate::error::ShopfloorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "table" => Ok(ViewMode::Table),
            "kanban" | "kanban-status" => Ok(ViewMode::KanbanByStatus),
            "kanban-operator" => Ok(ViewMode::KanbanByOperator),
            "calendar" => Ok(ViewMode::Calendar),
            _ => Err(crate::error::ShopfloorError::Validation(format!(
                "unknown view '{s}' (expected table, kanban-status, kanban-operator or calendar)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusColumn {
    pub status: WorkOrderStatus,
    pub records: Vec<WorkOrder>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorColumn {
    pub operator: OperatorRef,
    pub records: Vec<WorkOrder>,
}

/// Records due on one day, truncated to [`MAX_VISIBLE_PER_DAY`].
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: Date,
    pub visible: Vec<WorkOrder>,
    pub overflow: usize,
}

impl DayCell {
    pub fn new(date: Date, mut records: Vec<WorkOrder>) -> Self {
        let overflow = records.len().saturating_sub(MAX_VISIBLE_PER_DAY);
        records.truncate(MAX_VISIBLE_PER_DAY);
        Self {
            date,
            visible: records,
            overflow,
        }
    }

    pub fn total(&self) -> usize {
        self.visible.len() + self.overflow
    }

    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: Date,
    /// False for the leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    pub is_today: bool,
    pub cell: DayCell,
}

/// Sunday-start month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub first: Date,
    pub weeks: Vec<Vec<CalendarDay>>,
}

impl CalendarMonth {
    pub fn title(&self) -> String {
        self.first.strftime("%B %Y").to_string()
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Table(Vec<WorkOrder>),
    KanbanByStatus(Vec<StatusColumn>),
    KanbanByOperator(Vec<OperatorColumn>),
    Calendar(CalendarMonth),
}

/// Inputs the calendar projection needs beyond the records.
#[derive(Debug, Clone)]
pub struct CalendarContext {
    /// Any day within the month to display
    pub month: Date,
    pub today: Date,
    pub time_zone: TimeZone,
}

pub fn project(records: &[WorkOrder], mode: ViewMode, calendar: &CalendarContext) -> Projection {
    match mode {
        ViewMode::Table => Projection::Table(records.to_vec()),
        ViewMode::KanbanByStatus => Projection::KanbanByStatus(group_by_status(records)),
        ViewMode::KanbanByOperator => Projection::KanbanByOperator(group_by_operator(records)),
        ViewMode::Calendar => Projection::Calendar(month_grid(records, calendar)),
    }
}

/// Four fixed buckets in lifecycle order, empty ones included.
pub fn group_by_status(records: &[WorkOrder]) -> Vec<StatusColumn> {
    WorkOrderStatus::ALL
        .iter()
        .map(|&status| StatusColumn {
            status,
            records: records
                .iter()
                .filter(|r| r.status == status)
                .cloned()
                .collect(),
        })
        .collect()
}

/// One bucket per operator present, in order of first appearance.
pub fn group_by_operator(records: &[WorkOrder]) -> Vec<OperatorColumn> {
    let mut columns: Vec<OperatorColumn> = Vec::new();
    for record in records {
        match columns
            .iter_mut()
            .find(|c| c.operator.id == record.operator.id)
        {
            Some(column) => column.records.push(record.clone()),
            None => columns.push(OperatorColumn {
                operator: record.operator.clone(),
                records: vec![record.clone()],
            }),
        }
    }
    columns
}

/// Deadline day of each record in `tz`, records kept in fetch order per day.
pub fn group_by_day(records: &[WorkOrder], tz: &TimeZone) -> BTreeMap<Date, Vec<WorkOrder>> {
    let mut days: BTreeMap<Date, Vec<WorkOrder>> = BTreeMap::new();
    for record in records {
        let day = record.production_deadline.to_zoned(tz.clone()).date();
        days.entry(day).or_default().push(record.clone());
    }
    days
}

pub fn month_grid(records: &[WorkOrder], ctx: &CalendarContext) -> CalendarMonth {
    let first = ctx.month.first_of_month();
    let mut by_day = group_by_day(records, &ctx.time_zone);

    let lead = i64::from(first.weekday().to_sunday_zero_offset());
    let cells = lead + i64::from(first.days_in_month());
    let week_count = ((cells + 6) / 7) as usize;
    let start = first.saturating_sub(Span::new().days(lead));

    let days: Vec<CalendarDay> = start
        .series(1.day())
        .take(week_count * 7)
        .map(|date| CalendarDay {
            date,
            in_month: date.year() == first.year() && date.month() == first.month(),
            is_today: date == ctx.today,
            cell: DayCell::new(date, by_day.remove(&date).unwrap_or_default()),
        })
        .collect();

    CalendarMonth {
        first,
        weeks: days.chunks(7).map(|week| week.to_vec()).collect(),
    }
}

pub fn previous_month(month: Date) -> Date {
    month.first_of_month().saturating_sub(1.month())
}

pub fn next_month(month: Date) -> Date {
    month.first_of_month().saturating_add(1.month())
}
