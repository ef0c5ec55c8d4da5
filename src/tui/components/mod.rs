//! Shared TUI components for the work-order console.

pub mod footer;
pub mod modal;
pub mod toast;
pub mod work_order_card;

pub use footer::{Footer, FooterProps};
pub use modal::{Modal, ModalProps};
pub use toast::{ToastNotification, ToastNotificationProps};
pub use work_order_card::{WorkOrderCard, WorkOrderCardProps};
