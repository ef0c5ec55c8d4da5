//! Filter state for the work-order list.
//!
//! `FilterController` owns the current predicate (status, operator, search
//! text, deadline) and page. Every setter reports whether anything changed so
//! the caller issues exactly one fetch per effective change. Changing any
//! dimension other than the page sends the list back to page 1.

use std::time::{Duration, Instant};

use jiff::civil::Date;

use crate::api::ListQuery;
use crate::error::{Result, ShopfloorError};
use crate::types::{Role, WorkOrderStatus};

/// Transient, client-only filter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub status: Option<WorkOrderStatus>,
    /// Manager-only; always `None` for operator sessions
    pub operator_id: Option<u64>,
    pub search: String,
    pub deadline: Option<Date>,
    /// 1-indexed
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            status: None,
            operator_id: None,
            search: String::new(),
            deadline: None,
            page: 1,
        }
    }
}

impl FilterState {
    /// Whether any filter dimension (page excluded) is set.
    pub fn is_filtered(&self) -> bool {
        self.status.is_some()
            || self.operator_id.is_some()
            || !self.search.trim().is_empty()
            || self.deadline.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct FilterController {
    role: Role,
    state: FilterState,
}

impl FilterController {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            state: FilterState::default(),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn page(&self) -> u32 {
        self.state.page
    }

    /// Whether the operator dimension is available for this session.
    pub fn supports_operator_filter(&self) -> bool {
        self.role.is_manager()
    }

    pub fn set_status(&mut self, status: Option<WorkOrderStatus>) -> bool {
        if self.state.status == status {
            return false;
        }
        self.state.status = status;
        self.state.page = 1;
        true
    }

    pub fn set_operator(&mut self, operator_id: Option<u64>) -> Result<bool> {
        if !self.supports_operator_filter() {
            return Err(ShopfloorError::Forbidden(
                "operators cannot filter by operator".to_string(),
            ));
        }
        if self.state.operator_id == operator_id {
            return Ok(false);
        }
        self.state.operator_id = operator_id;
        self.state.page = 1;
        Ok(true)
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if self.state.search == search {
            return false;
        }
        self.state.search = search;
        self.state.page = 1;
        true
    }

    pub fn set_deadline(&mut self, deadline: Option<Date>) -> bool {
        if self.state.deadline == deadline {
            return false;
        }
        self.state.deadline = deadline;
        self.state.page = 1;
        true
    }

    /// Move to `page` without touching the other dimensions.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.state.page == page {
            return false;
        }
        self.state.page = page;
        true
    }

    /// Reset every dimension to its default.
    pub fn clear(&mut self) -> bool {
        if self.state == FilterState::default() {
            return false;
        }
        self.state = FilterState::default();
        true
    }

    /// Switch role context. Operator sessions drop the operator dimension.
    pub fn set_role(&mut self, role: Role) -> bool {
        self.role = role;
        if !role.is_manager() && self.state.operator_id.is_some() {
            self.state.operator_id = None;
            self.state.page = 1;
            return true;
        }
        false
    }

    /// Role-discriminated request parameters for the current state.
    pub fn query(&self, limit: u32) -> ListQuery {
        ListQuery::from_filters(self.role, &self.state, limit)
    }
}

/// Holds typed search text until it has been quiet for the debounce window.
///
/// Pure over `Instant` so the settle logic is testable without a clock.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending text will settle, if anything is pending.
    pub fn settles_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    /// Take the pending text once the window has elapsed since the last input.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.settles_at() {
            Some(at) if now >= at => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    /// Take the pending text immediately.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(text, _)| text)
    }
}
