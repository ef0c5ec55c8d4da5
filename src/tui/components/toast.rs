//! Toast notification bar
//!
//! Renders the console's current [`Toast`]; expiry is decided by the reducer.

use iocraft::prelude::*;

use crate::console::Toast;
use crate::tui::theme::theme;

/// Props for the ToastNotification component
#[derive(Default, Props)]
pub struct ToastNotificationProps {
    /// The toast to display
    pub toast: Option<Toast>,
}

#[component]
pub fn ToastNotification(props: &ToastNotificationProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View() {
            #(props.toast.as_ref().map(|t| {
                let color = theme.toast_color(t.level);
                element! {
                    View(
                        width: 100pct,
                        height: 3,
                        flex_shrink: 0.0,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border_edges: Edges::Top,
                        border_style: BorderStyle::Single,
                        border_color: color,
                    ) {
                        Text(content: t.message.clone(), color: color)
                    }
                }
            }))
        }
    }
}
