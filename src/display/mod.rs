use crate::types::{StatusColor, WorkOrderStatus};
use owo_colors::OwoColorize;

pub mod cli_formatting;
pub mod data_formatting;

pub use cli_formatting::*;
pub use data_formatting::*;

pub fn format_status_colored(status: WorkOrderStatus) -> String {
    format_status_colored_with_format(status, |s| format!("[{}]", s))
}

pub fn format_status_colored_with_format<F>(status: WorkOrderStatus, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(status.label());
    match status.meta().color {
        StatusColor::Yellow => badge.yellow().to_string(),
        StatusColor::Blue => badge.blue().to_string(),
        StatusColor::Green => badge.green().to_string(),
        StatusColor::Red => badge.red().to_string(),
    }
}
