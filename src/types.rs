use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;

use crate::error::ShopfloorError;

/// Role attached to an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProductionManager,
    Operator,
}

impl Role {
    pub fn is_manager(self) -> bool {
        self == Role::ProductionManager
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::ProductionManager => "Production Manager",
            Role::Operator => "Operator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::ProductionManager => write!(f, "production_manager"),
            Role::Operator => write!(f, "operator"),
        }
    }
}

impl FromStr for Role {
    type Err = ShopfloorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production_manager" | "manager" => Ok(Role::ProductionManager),
            "operator" => Ok(Role::Operator),
            _ => Err(ShopfloorError::Other(format!("invalid role: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Palette slot for a status, resolved to concrete colors by the CLI and TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Yellow,
    Blue,
    Green,
    Red,
}

/// Display and lifecycle metadata for a status.
#[derive(Debug, Clone, Copy)]
pub struct StatusMeta {
    pub status: WorkOrderStatus,
    pub label: &'static str,
    pub transitions: &'static [WorkOrderStatus],
    pub color: StatusColor,
}

static STATUS_META: [StatusMeta; 4] = [
    StatusMeta {
        status: WorkOrderStatus::Pending,
        label: "Pending",
        transitions: &[WorkOrderStatus::InProgress, WorkOrderStatus::Cancelled],
        color: StatusColor::Yellow,
    },
    StatusMeta {
        status: WorkOrderStatus::InProgress,
        label: "In Progress",
        transitions: &[WorkOrderStatus::Completed, WorkOrderStatus::Cancelled],
        color: StatusColor::Blue,
    },
    StatusMeta {
        status: WorkOrderStatus::Completed,
        label: "Completed",
        transitions: &[],
        color: StatusColor::Green,
    },
    StatusMeta {
        status: WorkOrderStatus::Cancelled,
        label: "Cancelled",
        transitions: &[],
        color: StatusColor::Red,
    },
];

impl WorkOrderStatus {
    /// All statuses in kanban display order.
    pub const ALL: [WorkOrderStatus; 4] = [
        WorkOrderStatus::Pending,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
        WorkOrderStatus::Cancelled,
    ];

    pub fn meta(self) -> &'static StatusMeta {
        &STATUS_META[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.meta().label
    }

    pub fn allowed_transitions(self) -> &'static [WorkOrderStatus] {
        self.meta().transitions
    }

    pub fn can_transition_to(self, next: WorkOrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "pending",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkOrderStatus {
    type Err = ShopfloorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "pending" => Ok(WorkOrderStatus::Pending),
            "in_progress" => Ok(WorkOrderStatus::InProgress),
            "completed" => Ok(WorkOrderStatus::Completed),
            "cancelled" | "canceled" => Ok(WorkOrderStatus::Cancelled),
            _ => Err(ShopfloorError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["pending", "in_progress", "completed", "cancelled"];

/// Operator reference embedded in a work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRef {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: u64,
    pub work_order_number: String,
    pub product_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub target_quantity: u32,
    pub production_deadline: Timestamp,
    pub status: WorkOrderStatus,
    pub operator: OperatorRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_manager: Option<OperatorRef>,
}

impl WorkOrder {
    /// Produced share of the target, capped at 100.
    pub fn progress_percent(&self) -> u32 {
        if self.target_quantity == 0 {
            return 0;
        }
        let pct = u64::from(self.quantity) * 100 / u64::from(self.target_quantity);
        pct.min(100) as u32
    }
}

/// A user with the operator role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: u64,
    pub username: String,
}

/// Server-reported paging metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: 10,
            pages: 1,
        }
    }
}

/// One page of work orders as returned by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderPage {
    #[serde(rename = "work_orders", default)]
    pub records: Vec<WorkOrder>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Custom,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::Create => write!(f, "create"),
            AuditAction::Update => write!(f, "update"),
            AuditAction::Delete => write!(f, "delete"),
            AuditAction::Custom => write!(f, "note"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditUser {
    pub id: u64,
    pub username: String,
    pub role: String,
}

/// Append-only record of a change made to a work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: u64,
    pub user: AuditUser,
    pub action: AuditAction,
    #[serde(default)]
    pub old_values: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub new_values: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub note: String,
    pub created_at: Timestamp,
}

/// Per-product row of the summary report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub work_order_number: String,
    pub product_name: String,
    pub total_wo: u64,
    pub percentage: f64,
    pub target_qty: u64,
    pub achieved_qty: u64,
    pub achievement: f64,
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub cancelled: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorPerformance {
    pub operator_id: u64,
    pub username: String,
    pub assigned: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub total_quantity: u64,
}
