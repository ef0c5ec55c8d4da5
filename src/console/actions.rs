//! Role-gated record actions and edit-form validation.

use std::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use jiff::Timestamp;

use crate::api::{NewWorkOrder, StatusUpdate, WorkOrderUpdate};
use crate::error::{Result, ShopfloorError};
use crate::types::{Operator, Role, WorkOrder, WorkOrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordAction {
    View,
    Edit,
    Delete,
    Reassign,
}

impl fmt::Display for RecordAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordAction::View => "view",
            RecordAction::Edit => "edit",
            RecordAction::Delete => "delete",
            RecordAction::Reassign => "reassign",
        })
    }
}

const MANAGER_ACTIONS: &[RecordAction] = &[
    RecordAction::View,
    RecordAction::Edit,
    RecordAction::Delete,
    RecordAction::Reassign,
];

const OPERATOR_ACTIONS: &[RecordAction] = &[RecordAction::View, RecordAction::Edit];

/// Actions a role may take on any record.
pub fn allowed_actions(role: Role) -> &'static [RecordAction] {
    match role {
        Role::ProductionManager => MANAGER_ACTIONS,
        Role::Operator => OPERATOR_ACTIONS,
    }
}

/// Actions offered on a specific record. Operators lose `Edit` once the
/// record reaches a terminal status.
pub fn actions_for(role: Role, record: &WorkOrder) -> Vec<RecordAction> {
    allowed_actions(role)
        .iter()
        .copied()
        .filter(|action| {
            !(role == Role::Operator
                && *action == RecordAction::Edit
                && record.status.is_terminal())
        })
        .collect()
}

pub fn is_allowed(role: Role, action: RecordAction) -> bool {
    allowed_actions(role).contains(&action)
}

/// Fail with `Forbidden` unless `role` may perform `action`.
pub fn require(role: Role, action: RecordAction) -> Result<()> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        Err(ShopfloorError::Forbidden(format!(
            "{} cannot {} work orders",
            role.label().to_lowercase(),
            action
        )))
    }
}

/// Statuses the edit form offers.
///
/// Managers may pick any status. Operators get the current status followed
/// by its allowed forward transitions.
pub fn status_options(role: Role, current: WorkOrderStatus) -> Vec<WorkOrderStatus> {
    match role {
        Role::ProductionManager => WorkOrderStatus::ALL.to_vec(),
        Role::Operator => std::iter::once(current)
            .chain(current.allowed_transitions().iter().copied())
            .collect(),
    }
}

/// Operator progress form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDraft {
    pub current: WorkOrderStatus,
    pub status: WorkOrderStatus,
    pub quantity: u32,
    pub description: String,
}

impl StatusDraft {
    pub fn for_order(order: &WorkOrder) -> Self {
        Self {
            current: order.status,
            status: order.status,
            quantity: order.quantity,
            description: String::new(),
        }
    }

    /// Advance the selected status to the next option, wrapping to the current one.
    pub fn cycle_status(&mut self) {
        let options = status_options(Role::Operator, self.current);
        let idx = options.iter().position(|s| *s == self.status).unwrap_or(0);
        self.status = options[(idx + 1) % options.len()];
    }

    pub fn validate(&self) -> Result<StatusUpdate> {
        if self.current.is_terminal() {
            return Err(ShopfloorError::Validation(format!(
                "work order is {} and can no longer be updated",
                self.current.label().to_lowercase()
            )));
        }
        if self.status != self.current && !self.current.can_transition_to(self.status) {
            return Err(ShopfloorError::InvalidTransition {
                from: self.current,
                to: self.status,
            });
        }
        if self.quantity == 0 {
            return Err(ShopfloorError::Validation(
                "Quantity must be a positive number".to_string(),
            ));
        }

        let description = self.description.trim();
        Ok(StatusUpdate {
            status: self.status,
            quantity: Some(self.quantity),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

/// Manager edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub product_name: String,
    pub quantity: u32,
    pub target_quantity: u32,
    pub production_deadline: Option<Timestamp>,
    pub status: WorkOrderStatus,
    pub operator_id: Option<u64>,
}

impl EditDraft {
    pub fn for_order(order: &WorkOrder) -> Self {
        Self {
            product_name: order.product_name.clone(),
            quantity: order.quantity,
            target_quantity: order.target_quantity,
            production_deadline: Some(order.production_deadline),
            status: order.status,
            operator_id: Some(order.operator.id),
        }
    }

    pub fn validate(&self) -> Result<WorkOrderUpdate> {
        let product_name = self.product_name.trim();
        if product_name.is_empty() {
            return Err(ShopfloorError::Validation(
                "Product name is required".to_string(),
            ));
        }
        if self.quantity == 0 {
            return Err(ShopfloorError::Validation(
                "Quantity must be a positive number".to_string(),
            ));
        }
        if self.target_quantity == 0 {
            return Err(ShopfloorError::Validation(
                "Target quantity must be a positive number".to_string(),
            ));
        }
        let deadline = self.production_deadline.ok_or_else(|| {
            ShopfloorError::Validation("Production deadline is required".to_string())
        })?;
        let operator_id = self
            .operator_id
            .ok_or_else(|| ShopfloorError::Validation("Please select an operator".to_string()))?;

        Ok(WorkOrderUpdate {
            product_name: Some(product_name.to_string()),
            quantity: Some(self.quantity),
            target_quantity: Some(self.target_quantity),
            production_deadline: Some(deadline),
            status: Some(self.status),
            operator_id: Some(operator_id),
        })
    }
}

/// Validate a manager's new work order before it is sent.
pub fn validate_new_work_order(order: &NewWorkOrder) -> Result<()> {
    if order.product_name.trim().is_empty() {
        return Err(ShopfloorError::Validation(
            "Product name is required".to_string(),
        ));
    }
    if order.target_quantity == 0 {
        return Err(ShopfloorError::Validation(
            "Target quantity must be a positive number".to_string(),
        ));
    }
    if order.operator_id == 0 {
        return Err(ShopfloorError::Validation(
            "Please select an operator".to_string(),
        ));
    }
    Ok(())
}

/// Operators matching `query`, best match first. An empty query returns
/// every operator in list order.
pub fn filter_operators<'a>(operators: &'a [Operator], query: &str) -> Vec<&'a Operator> {
    let query = query.trim();
    if query.is_empty() {
        return operators.iter().collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &Operator)> = operators
        .iter()
        .filter_map(|op| {
            matcher
                .fuzzy_match(&op.username, query)
                .map(|score| (score, op))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, op)| op).collect()
}
