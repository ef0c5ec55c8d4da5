//! Report totals and achievement figures.

use serde::Serialize;

use crate::display::format_number;
use crate::types::{OperatorPerformance, ReportSummary};

/// Column sums across every row of the summary report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub total_wo: u64,
    pub target_qty: u64,
    pub achieved_qty: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub cancelled: u64,
    /// Overall achievement, two decimals
    pub achievement: String,
}

/// `achieved / target * 100` with two decimals, or `0.00` when there is no target.
pub fn achievement_percentage(achieved: u64, target: u64) -> String {
    if target == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", achieved as f64 / target as f64 * 100.0)
}

pub fn calculate_totals(rows: &[ReportSummary]) -> ReportTotals {
    let mut totals = rows.iter().fold(ReportTotals::default(), |mut acc, row| {
        acc.total_wo += row.total_wo;
        acc.target_qty += row.target_qty;
        acc.achieved_qty += row.achieved_qty;
        acc.pending += row.pending;
        acc.in_progress += row.in_progress;
        acc.completed += row.completed;
        acc.cancelled += row.cancelled;
        acc
    });
    totals.achievement = achievement_percentage(totals.achieved_qty, totals.target_qty);
    totals
}

/// Summary rows plus a trailing totals row, numbers grouped for display.
pub fn summary_table_rows(rows: &[ReportSummary]) -> Vec<[String; 9]> {
    let totals = calculate_totals(rows);
    let mut out: Vec<[String; 9]> = rows
        .iter()
        .map(|r| {
            [
                r.product_name.clone(),
                format_number(r.total_wo),
                format_number(r.target_qty),
                format_number(r.achieved_qty),
                format!("{}%", achievement_percentage(r.achieved_qty, r.target_qty)),
                format_number(r.pending),
                format_number(r.in_progress),
                format_number(r.completed),
                format_number(r.cancelled),
            ]
        })
        .collect();
    out.push([
        "Total".to_string(),
        format_number(totals.total_wo),
        format_number(totals.target_qty),
        format_number(totals.achieved_qty),
        format!("{}%", totals.achievement),
        format_number(totals.pending),
        format_number(totals.in_progress),
        format_number(totals.completed),
        format_number(totals.cancelled),
    ]);
    out
}

/// Share of assigned work orders an operator has completed.
pub fn completion_rate(perf: &OperatorPerformance) -> String {
    achievement_percentage(perf.completed, perf.assigned)
}
