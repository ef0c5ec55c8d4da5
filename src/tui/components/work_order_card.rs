//! Work order card for kanban columns
//!
//! A compact card showing the work order number, product, progress and
//! operator.

use iocraft::prelude::*;

use crate::console::model::RowViewModel;
use crate::tui::theme::theme;

/// Props for the WorkOrderCard component
#[derive(Default, Props)]
pub struct WorkOrderCardProps {
    pub row: Option<RowViewModel>,
    /// Show the status line (kanban-by-operator columns mix statuses)
    pub show_status: bool,
}

/// Layout:
/// ```text
/// +-------------------+
/// |>WO-20240501-007   |
/// | Bracket           |
/// | 5/20  budi        |
/// +-------------------+
/// ```
#[component]
pub fn WorkOrderCard(props: &WorkOrderCardProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(row) = props.row.clone() else {
        return element!(View);
    };

    let border_color = if row.is_selected {
        theme.border_focused
    } else {
        theme.border
    };
    let text_color = if row.is_selected {
        theme.highlight_text
    } else {
        theme.text
    };
    let indicator = if row.is_selected { ">" } else { " " };
    let status_color = theme.status_color(row.status);

    element! {
        View(
            width: 100pct,
            min_height: 3,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: border_color,
            background_color: if row.is_selected { Some(theme.highlight) } else { None },
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_direction: FlexDirection::Row) {
                Text(content: indicator, color: text_color, weight: Weight::Bold)
                Text(
                    content: row.work_order_number.clone(),
                    color: if row.is_selected { theme.highlight_text } else { theme.id_color },
                    weight: Weight::Bold,
                )
            }
            Text(content: row.product_name.clone(), color: text_color)
            View(flex_direction: FlexDirection::Row, gap: 1) {
                Text(content: row.progress.clone(), color: text_color)
                Text(content: row.operator.clone(), color: theme.text_dimmed)
                #(props.show_status.then(|| element! {
                    Text(content: row.status.label(), color: status_color)
                }))
            }
        }
    }
}
