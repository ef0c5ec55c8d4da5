//! Rendered text for the pager and the summary report

use shopfloor::console::pagination::{render_pages, visible_pages};
use shopfloor::reports::summary_table_rows;
use shopfloor::types::ReportSummary;

fn summary(product: &str, target: u64, achieved: u64) -> ReportSummary {
    ReportSummary {
        work_order_number: format!("WO-{product}"),
        product_name: product.to_string(),
        total_wo: 2,
        percentage: 50.0,
        target_qty: target,
        achieved_qty: achieved,
        achievement: 0.0,
        pending: 1,
        in_progress: 0,
        completed: 1,
        cancelled: 0,
    }
}

fn pager_line(current: u32, total: u32) -> String {
    render_pages(&visible_pages(current, total), current)
}

#[test]
fn test_pager_rendering() {
    let lines = [
        pager_line(1, 1),
        pager_line(1, 10),
        pager_line(5, 10),
        pager_line(10, 10),
    ]
    .join("\n");

    insta::assert_snapshot!(lines, @r"
    [1]
    [1] 2 3 … 10
    1 … 3 4 [5] 6 7 … 10
    1 … 8 9 [10]
    ");
}

#[test]
fn test_summary_rows_end_with_totals() {
    let rows = summary_table_rows(&[summary("Bracket", 1500, 1200), summary("Pin", 500, 500)]);
    let text = rows
        .iter()
        .map(|row| row.join(" | "))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(text, @r"
    Bracket | 2 | 1,500 | 1,200 | 80.00% | 1 | 0 | 1 | 0
    Pin | 2 | 500 | 500 | 100.00% | 1 | 0 | 1 | 0
    Total | 4 | 2,000 | 1,700 | 85.00% | 2 | 0 | 2 | 0
    ");
}
