//! Full-screen terminal console for browsing and updating work orders.

pub mod components;
pub mod console;
pub mod keymap;
pub mod theme;

pub use console::{WorkOrderConsole, WorkOrderConsoleProps, run_console};
pub use theme::Theme;
