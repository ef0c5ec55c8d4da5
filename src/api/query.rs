//! Role-discriminated list request parameters.
//!
//! Managers query the full collection with every filter; operators query
//! their assigned orders with status only. Building the request from a
//! `FilterState` through `ListQuery::from_filters` is the only way in, so an
//! operator request can never carry an operator id, search text or deadline.

use jiff::civil::Date;

use crate::console::FilterState;
use crate::types::{Role, WorkOrderStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub status: Option<WorkOrderStatus>,
    pub operator_id: Option<u64>,
    pub deadline: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<WorkOrderStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    Manager(ManagerQuery),
    Operator(OperatorQuery),
}

impl ListQuery {
    pub fn from_filters(role: Role, filters: &FilterState, limit: u32) -> Self {
        let page = filters.page.max(1);
        match role {
            Role::ProductionManager => {
                let search = filters.search.trim();
                ListQuery::Manager(ManagerQuery {
                    page,
                    limit,
                    search: (!search.is_empty()).then(|| search.to_string()),
                    status: filters.status,
                    operator_id: filters.operator_id,
                    deadline: filters.deadline,
                })
            }
            Role::Operator => ListQuery::Operator(OperatorQuery {
                page,
                limit,
                status: filters.status,
            }),
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ListQuery::Manager(_) => "work-orders",
            ListQuery::Operator(_) => "work-orders/assigned",
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            ListQuery::Manager(q) => q.page,
            ListQuery::Operator(q) => q.page,
        }
    }

    /// The same query aimed at `page`.
    pub fn with_page(&self, page: u32) -> Self {
        let mut query = self.clone();
        match &mut query {
            ListQuery::Manager(q) => q.page = page,
            ListQuery::Operator(q) => q.page = page,
        }
        query
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        match self {
            ListQuery::Manager(q) => {
                let mut params = vec![("page", q.page.to_string()), ("limit", q.limit.to_string())];
                if let Some(search) = &q.search {
                    params.push(("search", search.clone()));
                }
                if let Some(status) = q.status {
                    params.push(("status", status.as_str().to_string()));
                }
                if let Some(operator_id) = q.operator_id {
                    params.push(("operator_id", operator_id.to_string()));
                }
                if let Some(deadline) = q.deadline {
                    params.push(("deadline", deadline.to_string()));
                }
                params
            }
            ListQuery::Operator(q) => {
                let mut params = vec![("page", q.page.to_string()), ("limit", q.limit.to_string())];
                if let Some(status) = q.status {
                    params.push(("status", status.as_str().to_string()));
                }
                params
            }
        }
    }
}
