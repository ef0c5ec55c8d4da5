pub mod api;
pub mod commands;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod reports;
pub mod session;
pub mod tui;
pub mod types;

pub use api::{AuthGate, HttpApi, ListQuery, ManagerQuery, OperatorQuery, WorkOrderApi};
pub use config::Config;
pub use console::{
    ConsoleAction, ConsoleEffect, ConsoleState, FilterController, FilterState, ListLoader,
    Pager, ViewMode, compute_console_view_model, reduce_console_state,
};
pub use error::{Result, ShopfloorError};
pub use session::{Session, SessionContext, SessionStore, SessionUser, ThemePreference};
pub use types::{
    AuditLogEntry, Operator, Pagination, Role, VALID_STATUSES, WorkOrder, WorkOrderPage,
    WorkOrderStatus,
};
