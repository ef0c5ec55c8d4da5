//! Work-order backend API.
//!
//! `WorkOrderApi` is the seam between the console state machine and the REST
//! backend; `HttpApi` is the reqwest implementation and tests substitute
//! their own.

pub mod auth;
pub mod client;
pub mod error;
pub mod query;

use jiff::Timestamp;
use jiff::civil::Date;
use serde::Serialize;

use crate::error::Result;
use crate::session::Session;
use crate::types::{
    AuditLogEntry, Operator, OperatorPerformance, ReportSummary, WorkOrder, WorkOrderPage,
    WorkOrderStatus,
};

pub use auth::AuthGate;
pub use client::HttpApi;
pub use query::{ListQuery, ManagerQuery, OperatorQuery};

/// Body of `POST /work-orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorkOrder {
    pub product_name: String,
    pub quantity: u32,
    pub target_quantity: u32,
    pub production_deadline: Timestamp,
    pub operator_id: u64,
}

/// Partial manager edit for `PUT /work-orders/{id}`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkOrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_deadline: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<u64>,
}

impl WorkOrderUpdate {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.quantity.is_none()
            && self.target_quantity.is_none()
            && self.production_deadline.is_none()
            && self.status.is_none()
            && self.operator_id.is_none()
    }
}

/// Operator progress report for `PUT /work-orders/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: WorkOrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Optional date bounds for the report endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportRange {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl ReportRange {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = self.start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.to_string()));
        }
        params
    }
}

/// Operations the console and CLI need from the backend.
pub trait WorkOrderApi: Send + Sync {
    /// Exchange credentials for a session. Does not persist it.
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Session>> + Send;

    fn list_work_orders(
        &self,
        query: &ListQuery,
    ) -> impl std::future::Future<Output = Result<WorkOrderPage>> + Send;

    fn get_work_order(&self, id: u64)
    -> impl std::future::Future<Output = Result<WorkOrder>> + Send;

    fn get_operators(&self) -> impl std::future::Future<Output = Result<Vec<Operator>>> + Send;

    fn create_work_order(
        &self,
        order: &NewWorkOrder,
    ) -> impl std::future::Future<Output = Result<WorkOrder>> + Send;

    fn update_work_order(
        &self,
        id: u64,
        update: &WorkOrderUpdate,
    ) -> impl std::future::Future<Output = Result<WorkOrder>> + Send;

    fn update_status(
        &self,
        id: u64,
        update: &StatusUpdate,
    ) -> impl std::future::Future<Output = Result<WorkOrder>> + Send;

    fn delete_work_order(&self, id: u64) -> impl std::future::Future<Output = Result<()>> + Send;

    fn get_audit_logs(
        &self,
        id: u64,
    ) -> impl std::future::Future<Output = Result<Vec<AuditLogEntry>>> + Send;

    fn add_note(
        &self,
        id: u64,
        note: &str,
    ) -> impl std::future::Future<Output = Result<AuditLogEntry>> + Send;

    fn report_summary(
        &self,
        range: &ReportRange,
    ) -> impl std::future::Future<Output = Result<Vec<ReportSummary>>> + Send;

    fn operator_performance(
        &self,
        range: &ReportRange,
    ) -> impl std::future::Future<Output = Result<Vec<OperatorPerformance>>> + Send;
}
