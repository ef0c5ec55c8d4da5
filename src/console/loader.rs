//! List data loader with a stale-response guard.
//!
//! Each load is started with [`ListLoader::begin`], which hands out a
//! [`LoadTicket`] stamped with a generation number. Only the result for the
//! newest ticket is applied; results for superseded tickets are dropped when
//! they eventually arrive. Failed loads keep the last good page on screen.

use tracing::{debug, warn};

use crate::api::ListQuery;
use crate::error::ShopfloorError;
use crate::types::{Pagination, WorkOrder, WorkOrderPage};

/// Handle for one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// A failed load, reduced to what the console needs to show and decide on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub message: String,
    pub unauthorized: bool,
    pub retryable: bool,
}

impl From<&ShopfloorError> for LoadFailure {
    fn from(error: &ShopfloorError) -> Self {
        Self {
            message: error.to_string(),
            unauthorized: error.is_unauthorized(),
            retryable: error.is_retryable(),
        }
    }
}

impl From<ShopfloorError> for LoadFailure {
    fn from(error: ShopfloorError) -> Self {
        LoadFailure::from(&error)
    }
}

pub type LoadResult = std::result::Result<WorkOrderPage, LoadFailure>;

/// What happened when a result was handed back to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records and pagination replaced
    Applied,
    /// Previous records kept; the message should be surfaced
    Failed(LoadFailure),
    /// A newer load was started after this one; result discarded
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct ListLoader {
    generation: u64,
    records: Vec<WorkOrder>,
    pagination: Pagination,
    loading: bool,
    error: Option<String>,
    last_query: Option<ListQuery>,
    applied_query: Option<ListQuery>,
}

impl ListLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[WorkOrder] {
        &self.records
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Query of the most recently started load, used by refresh.
    pub fn last_query(&self) -> Option<&ListQuery> {
        self.last_query.as_ref()
    }

    /// Query whose result is currently on screen.
    pub fn applied_query(&self) -> Option<&ListQuery> {
        self.applied_query.as_ref()
    }

    /// Start a load, superseding any load still in flight.
    pub fn begin(&mut self, query: &ListQuery) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.last_query = Some(query.clone());
        debug!(generation = self.generation, page = query.page(), "list load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Hand back the result for `ticket`.
    pub fn complete(&mut self, ticket: LoadTicket, result: LoadResult) -> LoadOutcome {
        if !self.is_current(ticket) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "discarding stale list response"
            );
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.records = page.records;
                self.pagination = page.pagination;
                self.error = None;
                self.applied_query = self.last_query.clone();
                LoadOutcome::Applied
            }
            Err(failure) => {
                warn!(error = %failure.message, "failed to load work orders");
                self.error = Some(failure.message.clone());
                LoadOutcome::Failed(failure)
            }
        }
    }
}
