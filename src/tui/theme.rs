//! Theme system for TUI colors and styles
//!
//! Status colors follow the same palette slots as the CLI badges in
//! `display`. The light/dark choice comes from the persisted preference.

use std::sync::OnceLock;

use iocraft::prelude::Color;

use crate::console::ToastLevel;
use crate::session::ThemePreference;
use crate::types::{StatusColor, WorkOrderStatus};

const GRAY: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 120,
};

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Status palette slots
    pub status_yellow: Color,
    pub status_blue: Color,
    pub status_green: Color,
    pub status_red: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub highlight_text: Color,
    pub id_color: Color,
    pub today: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            status_yellow: Color::Yellow,
            status_blue: Color::Cyan,
            status_green: Color::Green,
            status_red: Color::Red,

            border: GRAY,
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: GRAY,
            highlight: Color::Blue,
            highlight_text: Color::White,
            id_color: Color::Cyan,
            today: Color::Magenta,
        }
    }

    pub fn light() -> Self {
        Self {
            status_yellow: Color::DarkYellow,
            status_blue: Color::DarkBlue,
            status_green: Color::DarkGreen,
            status_red: Color::DarkRed,

            border: GRAY,
            border_focused: Color::DarkBlue,
            background: Color::Reset,
            text: Color::Black,
            text_dimmed: GRAY,
            highlight: Color::DarkBlue,
            highlight_text: Color::White,
            id_color: Color::DarkCyan,
            today: Color::DarkMagenta,
        }
    }

    pub fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }

    /// Get the color for a work order status
    pub fn status_color(&self, status: WorkOrderStatus) -> Color {
        match status.meta().color {
            StatusColor::Yellow => self.status_yellow,
            StatusColor::Blue => self.status_blue,
            StatusColor::Green => self.status_green,
            StatusColor::Red => self.status_red,
        }
    }

    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Info => self.status_blue,
            ToastLevel::Warning => self.status_yellow,
            ToastLevel::Error => self.status_red,
            ToastLevel::Success => self.status_green,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_preference(ThemePreference::default())
    }
}

/// Global theme instance
static THEME: OnceLock<Theme> = OnceLock::new();

/// Select the palette before the first render. Later calls are ignored.
pub fn init_theme(preference: ThemePreference) {
    let _ = THEME.set(Theme::for_preference(preference));
}

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
