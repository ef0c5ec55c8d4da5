//! reqwest-backed implementation of [`WorkOrderApi`].
//!
//! The bearer token is read from the shared [`SessionContext`] on every
//! request and never logged. Any 401 outside of login trips the
//! [`AuthGate`], which clears the session and fires the expiry hook once.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Result, ShopfloorError};
use crate::session::{Session, SessionContext, SessionUser};
use crate::types::{
    AuditLogEntry, Operator, OperatorPerformance, ReportSummary, WorkOrder, WorkOrderPage,
};

use super::auth::AuthGate;
use super::error::ApiError;
use super::{ListQuery, NewWorkOrder, ReportRange, StatusUpdate, WorkOrderApi, WorkOrderUpdate};

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionUser,
}

/// Mutation responses arrive either wrapped as `{"work_order": ..}` or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum WorkOrderEnvelope {
    Wrapped { work_order: WorkOrder },
    Bare(WorkOrder),
}

impl WorkOrderEnvelope {
    fn into_inner(self) -> WorkOrder {
        match self {
            WorkOrderEnvelope::Wrapped { work_order } => work_order,
            WorkOrderEnvelope::Bare(work_order) => work_order,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LogEnvelope {
    Wrapped { log: AuditLogEntry },
    Bare(AuditLogEntry),
}

#[derive(Deserialize)]
struct OperatorsResponse {
    operators: Vec<Operator>,
}

#[derive(Deserialize)]
struct LogsResponse {
    #[serde(default)]
    logs: Vec<AuditLogEntry>,
}

#[derive(Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    summary: Vec<ReportSummary>,
}

#[derive(Deserialize)]
struct PerformanceResponse {
    #[serde(default)]
    performances: Vec<OperatorPerformance>,
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    timeout: Duration,
    session: SessionContext,
    gate: AuthGate,
}

impl HttpApi {
    /// Create a client for `base_url` with a total per-request `timeout`.
    pub fn new(base_url: Url, timeout: Duration, session: SessionContext) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
            session,
            gate: AuthGate::new(),
        })
    }

    pub fn from_config(config: &Config, session: SessionContext) -> Result<Self> {
        Self::new(config.api_url()?, config.request_timeout(), session)
    }

    /// Replace the 401 gate, typically with one carrying an expiry hook.
    pub fn with_auth_gate(mut self, gate: AuthGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn auth_gate(&self) -> &AuthGate {
        &self.gate
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        debug!(method = %method, path, "api request");
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        Ok(builder)
    }

    fn transport_error(&self, error: reqwest::Error) -> ShopfloorError {
        if error.is_timeout() {
            ShopfloorError::Timeout(self.timeout.as_secs())
        } else {
            ShopfloorError::Http(error)
        }
    }

    async fn execute(&self, builder: RequestBuilder, resource: Option<u64>) -> Result<Response> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_body(status, &body);
        warn!(status = status.as_u16(), message = %error.message, "api request rejected");

        if status == StatusCode::UNAUTHORIZED {
            self.gate.trip(&self.session);
        }
        Err(error.into_error(resource))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: Option<u64>,
    ) -> Result<T> {
        let response = self.execute(builder, resource).await?;
        response.json::<T>().await.map_err(|e| self.transport_error(e))
    }
}

impl WorkOrderApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let url = self.base_url.join("auth/login")?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ShopfloorError::Validation(
                "invalid username or password".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_body(status, &body).into());
        }

        let body: LoginResponse = response.json().await.map_err(|e| self.transport_error(e))?;
        self.gate.reset();
        info!(user = %body.user.username, role = %body.user.role, "logged in");
        Ok(Session::new(body.token, body.user))
    }

    async fn list_work_orders(&self, query: &ListQuery) -> Result<WorkOrderPage> {
        let builder = self
            .request(Method::GET, query.path())?
            .query(&query.to_params());
        self.send(builder, None).await
    }

    async fn get_work_order(&self, id: u64) -> Result<WorkOrder> {
        let builder = self.request(Method::GET, &format!("work-orders/{id}"))?;
        let envelope: WorkOrderEnvelope = self.send(builder, Some(id)).await?;
        Ok(envelope.into_inner())
    }

    async fn get_operators(&self) -> Result<Vec<Operator>> {
        let builder = self.request(Method::GET, "users/operators")?;
        let body: OperatorsResponse = self.send(builder, None).await?;
        Ok(body.operators)
    }

    async fn create_work_order(&self, order: &NewWorkOrder) -> Result<WorkOrder> {
        let builder = self.request(Method::POST, "work-orders")?.json(order);
        let envelope: WorkOrderEnvelope = self.send(builder, None).await?;
        Ok(envelope.into_inner())
    }

    async fn update_work_order(&self, id: u64, update: &WorkOrderUpdate) -> Result<WorkOrder> {
        let builder = self
            .request(Method::PUT, &format!("work-orders/{id}"))?
            .json(update);
        let envelope: WorkOrderEnvelope = self.send(builder, Some(id)).await?;
        Ok(envelope.into_inner())
    }

    async fn update_status(&self, id: u64, update: &StatusUpdate) -> Result<WorkOrder> {
        let builder = self
            .request(Method::PUT, &format!("work-orders/{id}/status"))?
            .json(update);
        let envelope: WorkOrderEnvelope = self.send(builder, Some(id)).await?;
        Ok(envelope.into_inner())
    }

    async fn delete_work_order(&self, id: u64) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("work-orders/{id}"))?;
        self.execute(builder, Some(id)).await?;
        info!(id, "work order deleted");
        Ok(())
    }

    async fn get_audit_logs(&self, id: u64) -> Result<Vec<AuditLogEntry>> {
        let builder = self.request(Method::GET, &format!("work-orders/{id}/logs"))?;
        let body: LogsResponse = self.send(builder, Some(id)).await?;
        Ok(body.logs)
    }

    async fn add_note(&self, id: u64, note: &str) -> Result<AuditLogEntry> {
        let builder = self
            .request(Method::POST, &format!("work-orders/{id}/logs"))?
            .json(&serde_json::json!({ "note": note }));
        let envelope: LogEnvelope = self.send(builder, Some(id)).await?;
        Ok(match envelope {
            LogEnvelope::Wrapped { log } => log,
            LogEnvelope::Bare(log) => log,
        })
    }

    async fn report_summary(&self, range: &ReportRange) -> Result<Vec<ReportSummary>> {
        let builder = self
            .request(Method::GET, "reports/summary")?
            .query(&range.to_params());
        let body: SummaryResponse = self.send(builder, None).await?;
        Ok(body.summary)
    }

    async fn operator_performance(&self, range: &ReportRange) -> Result<Vec<OperatorPerformance>> {
        let builder = self
            .request(Method::GET, "reports/operators")?
            .query(&range.to_params());
        let body: PerformanceResponse = self.send(builder, None).await?;
        Ok(body.performances)
    }
}
