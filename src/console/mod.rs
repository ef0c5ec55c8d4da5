//! Work-order list state: filters, loading, view modes, paging and
//! role-gated actions. Nothing here touches the terminal.

pub mod actions;
pub mod confirm;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pagination;
pub mod projection;
pub mod toast;

pub use actions::{
    EditDraft, RecordAction, StatusDraft, actions_for, allowed_actions, filter_operators,
    status_options, validate_new_work_order,
};
pub use confirm::DeleteConfirmation;
pub use filter::{FilterController, FilterState, SearchDebouncer};
pub use loader::{ListLoader, LoadFailure, LoadOutcome, LoadResult, LoadTicket};
pub use model::{
    ConsoleAction, ConsoleEffect, ConsoleOptions, ConsoleState, ConsoleViewModel,
    compute_console_view_model, reduce_console_state,
};
pub use pagination::{PageMarker, Pager, visible_pages};
pub use projection::{Projection, ViewMode, project};
pub use toast::{Toast, ToastLevel};
