//! Delete confirmation step.

use crate::types::WorkOrder;

/// Pending delete of one work order, waiting for an explicit yes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub id: u64,
    pub work_order_number: String,
    /// Set once confirmed, until the request fails
    pub submitting: bool,
}

impl DeleteConfirmation {
    pub fn for_order(order: &WorkOrder) -> Self {
        Self {
            id: order.id,
            work_order_number: order.work_order_number.clone(),
            submitting: false,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Are you sure you want to delete work order {}?",
            self.work_order_number
        )
    }

    /// Accept the prompt. Yields the id to delete the first time only, so
    /// repeated confirms while the request is in flight cannot double-submit.
    pub fn confirm(&mut self) -> Option<u64> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.id)
    }

    /// Re-arm after a failed delete so the user can retry.
    pub fn failed(&mut self) {
        self.submitting = false;
    }
}
