//! Centered modal box drawn over the console.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the Modal component
#[derive(Default, Props)]
pub struct ModalProps<'a> {
    pub title: String,
    /// Defaults to the focused border color
    pub border_color: Option<Color>,
    /// Hint line under the content, e.g. key bindings
    pub footer_text: Option<String>,
    /// Column count (default 60)
    pub width: Option<u32>,
    pub children: Vec<AnyElement<'a>>,
}

/// Modal box with a title row, content, and optional footer, centered in a
/// full-screen absolute overlay.
#[component]
pub fn Modal<'a>(props: &mut ModalProps<'a>) -> impl Into<AnyElement<'a>> {
    let theme = theme();
    let border_color = props.border_color.unwrap_or(theme.border_focused);
    let footer = props.footer_text.clone();

    element! {
        View(
            width: 100pct,
            height: 100pct,
            position: Position::Absolute,
            top: 0,
            left: 0,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
        ) {
            View(
                width: Size::Length(props.width.unwrap_or(60)),
                background_color: theme.background,
                border_style: BorderStyle::Double,
                border_color: border_color,
                padding: 1,
                flex_direction: FlexDirection::Column,
            ) {
                View(
                    width: 100pct,
                    padding_bottom: 1,
                    border_edges: Edges::Bottom,
                    border_style: BorderStyle::Single,
                    border_color: theme.border,
                ) {
                    Text(
                        content: props.title.clone(),
                        color: border_color,
                        weight: Weight::Bold,
                    )
                }

                View(width: 100pct, flex_direction: FlexDirection::Column, padding_top: 1) {
                    #(std::mem::take(&mut props.children))
                }

                #(footer.map(|text| element! {
                    View(
                        width: 100pct,
                        margin_top: 1,
                        padding_top: 1,
                        border_edges: Edges::Top,
                        border_style: BorderStyle::Single,
                        border_color: theme.border,
                    ) {
                        Text(content: text, color: theme.text_dimmed)
                    }
                }))
            }
        }
    }
}
