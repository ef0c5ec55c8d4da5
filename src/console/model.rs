//! Console model types for testable state management
//!
//! This module separates state (`ConsoleState`) from view (`ConsoleViewModel`)
//! so the whole list/filter/pagination flow can be unit tested without the
//! iocraft framework. The reducer never performs I/O; it returns
//! `ConsoleEffect`s that the component executes, feeding the results back in
//! as actions.

use std::time::{Duration, Instant};

use jiff::civil::Date;
use jiff::tz::TimeZone;
use tracing::warn;

use crate::api::{ListQuery, StatusUpdate, WorkOrderUpdate};
use crate::config::Config;
use crate::display::format_deadline;
use crate::error::ShopfloorError;
use crate::session::SessionUser;
use crate::types::{Operator, Role, WorkOrder, WorkOrderStatus};

use super::actions::{
    EditDraft, RecordAction, StatusDraft, actions_for, filter_operators, status_options,
};
use super::confirm::DeleteConfirmation;
use super::filter::{FilterController, SearchDebouncer};
use super::loader::{ListLoader, LoadFailure, LoadOutcome, LoadResult, LoadTicket};
use super::pagination::{PageMarker, Pager};
use super::projection::{self, CalendarContext, Projection, ViewMode};
use super::toast::Toast;

pub const SESSION_EXPIRED_MESSAGE: &str = "session expired, run `shopfloor login`";

/// Status filter values in cycling order (`None` = all statuses).
const STATUS_FILTER_CYCLE: [Option<WorkOrderStatus>; 5] = [
    None,
    Some(WorkOrderStatus::Pending),
    Some(WorkOrderStatus::InProgress),
    Some(WorkOrderStatus::Completed),
    Some(WorkOrderStatus::Cancelled),
];

/// Settings the console reads once at startup.
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub page_size: u32,
    pub search_debounce: Duration,
    pub toast_ttl: Duration,
    pub today: Date,
    pub time_zone: TimeZone,
}

impl ConsoleOptions {
    pub fn from_config(config: &Config) -> Self {
        let now = jiff::Zoned::now();
        Self {
            page_size: config.page_size,
            search_debounce: config.search_debounce(),
            toast_ttl: config.toast_duration(),
            today: now.date(),
            time_zone: now.time_zone().clone(),
        }
    }
}

/// Single-line text prompt at the bottom of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    JumpPage,
    Deadline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub text: String,
}

/// Status/quantity form for the selected record
#[derive(Debug, Clone, PartialEq)]
pub struct EditModal {
    pub order: WorkOrder,
    pub role: Role,
    pub status: WorkOrderStatus,
    pub quantity: String,
    pub submitting: bool,
}

impl EditModal {
    fn new(order: WorkOrder, role: Role) -> Self {
        Self {
            status: order.status,
            quantity: order.quantity.to_string(),
            order,
            role,
            submitting: false,
        }
    }

    pub fn options(&self) -> Vec<WorkOrderStatus> {
        status_options(self.role, self.order.status)
    }

    fn cycle_status(&mut self) {
        let options = self.options();
        let idx = options.iter().position(|s| *s == self.status).unwrap_or(0);
        self.status = options[(idx + 1) % options.len()];
    }

    fn quantity(&self) -> u32 {
        self.quantity.parse().unwrap_or(0)
    }

    /// Validate the form into the request it should send.
    fn submission(&self) -> Result<ConsoleEffect, ShopfloorError> {
        match self.role {
            Role::Operator => {
                let draft = StatusDraft {
                    current: self.order.status,
                    status: self.status,
                    quantity: self.quantity(),
                    description: String::new(),
                };
                Ok(ConsoleEffect::SubmitStatus {
                    id: self.order.id,
                    update: draft.validate()?,
                })
            }
            Role::ProductionManager => {
                let mut draft = EditDraft::for_order(&self.order);
                draft.status = self.status;
                draft.quantity = self.quantity();
                Ok(ConsoleEffect::SubmitEdit {
                    id: self.order.id,
                    update: draft.validate()?,
                })
            }
        }
    }
}

/// Operator picker for reassigning the selected record
#[derive(Debug, Clone, PartialEq)]
pub struct ReassignModal {
    pub order: WorkOrder,
    pub query: String,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Delete(DeleteConfirmation),
    Edit(EditModal),
    Reassign(ReassignModal),
}

/// Raw state that changes during user interaction
#[derive(Debug, Clone)]
pub struct ConsoleState {
    /// Logged-in user; the role gates fetches, modes and actions
    pub user: SessionUser,
    pub filters: FilterController,
    pub loader: ListLoader,
    pub view_mode: ViewMode,
    /// Index of the selected record within the loaded page
    pub selected: usize,
    pub page_size: u32,
    /// Reference list for the operator filter and reassignment
    pub operators: Vec<Operator>,
    /// Any day in the month the calendar shows
    pub calendar_month: Date,
    pub today: Date,
    pub time_zone: TimeZone,
    pub prompt: Option<Prompt>,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub toast_ttl: Duration,
    pub debouncer: SearchDebouncer,
    /// Set by the first 401; the console is on its way out
    pub session_expired: bool,
}

impl ConsoleState {
    pub fn new(user: SessionUser, options: ConsoleOptions) -> Self {
        Self {
            filters: FilterController::new(user.role),
            user,
            loader: ListLoader::new(),
            view_mode: ViewMode::Table,
            selected: 0,
            page_size: options.page_size,
            operators: Vec::new(),
            calendar_month: options.today,
            today: options.today,
            time_zone: options.time_zone,
            prompt: None,
            modal: None,
            toast: None,
            toast_ttl: options.toast_ttl,
            debouncer: SearchDebouncer::new(options.search_debounce),
            session_expired: false,
        }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn selected_record(&self) -> Option<&WorkOrder> {
        self.loader.records().get(self.selected)
    }

    fn pager(&self) -> Pager {
        Pager::from_pagination(&self.loader.pagination())
    }
}

/// All possible actions on the console
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    /// Initial load on mount
    Start,

    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    NextPage,
    PrevPage,

    // Prompts
    OpenSearch,
    OpenJump,
    OpenDeadline,
    PromptChar(char, Instant),
    PromptBackspace(Instant),
    PromptSubmit,
    PromptCancel,

    // Filters and view
    CycleView,
    CycleStatusFilter,
    CycleOperatorFilter,
    ClearFilters,
    Refresh,
    PrevMonth,
    NextMonth,
    ThisMonth,

    // Record actions
    RequestDelete,
    ConfirmDelete,
    OpenEdit,
    OpenReassign,
    ModalChar(char),
    ModalBackspace,
    /// Tab in the edit form: next status option
    ModalCycle,
    ModalSubmit,
    CancelModal,

    // Results of effects
    Loaded {
        ticket: LoadTicket,
        result: LoadResult,
    },
    OperatorsLoaded(Result<Vec<Operator>, LoadFailure>),
    Deleted {
        id: u64,
        result: Result<(), LoadFailure>,
    },
    Saved {
        id: u64,
        result: Result<WorkOrder, LoadFailure>,
    },

    /// Timer: settles debounced search and expires toasts
    Tick(Instant),
    DismissToast,
    Quit,
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEffect {
    Fetch { ticket: LoadTicket, query: ListQuery },
    LoadOperators,
    Delete { id: u64 },
    SubmitStatus { id: u64, update: StatusUpdate },
    SubmitEdit { id: u64, update: WorkOrderUpdate },
    Exit { message: Option<String> },
}

// ============================================================================
// Reducer
// ============================================================================

fn fetch(state: &mut ConsoleState, effects: &mut Vec<ConsoleEffect>) {
    let query = state.filters.query(state.page_size);
    let ticket = state.loader.begin(&query);
    effects.push(ConsoleEffect::Fetch { ticket, query });
}

/// Page changes and filter changes both return the list to its first row.
fn refetch_from_top(state: &mut ConsoleState, effects: &mut Vec<ConsoleEffect>) {
    state.selected = 0;
    fetch(state, effects);
}

fn expire_session(state: &mut ConsoleState, effects: &mut Vec<ConsoleEffect>) {
    if state.session_expired {
        return;
    }
    state.session_expired = true;
    state.modal = None;
    state.prompt = None;
    effects.push(ConsoleEffect::Exit {
        message: Some(SESSION_EXPIRED_MESSAGE.to_string()),
    });
}

/// After a failed page move, point the filters back at the page still on
/// screen so next/prev/refresh work from what the user sees.
fn restore_shown_page(state: &mut ConsoleState) {
    let shown = match (state.loader.applied_query(), state.loader.last_query()) {
        (Some(shown), Some(failed)) if failed.with_page(shown.page()) == *shown => shown.page(),
        _ => return,
    };
    state.filters.set_page(shown);
}

fn surface(state: &mut ConsoleState, failure: &LoadFailure, effects: &mut Vec<ConsoleEffect>) {
    warn!(
        error = %failure.message,
        unauthorized = failure.unauthorized,
        retryable = failure.retryable,
        "console request failed"
    );
    if failure.unauthorized {
        expire_session(state, effects);
    } else {
        state.toast = Some(Toast::error(failure.message.clone()));
    }
}

fn apply_search(state: &mut ConsoleState, text: String, effects: &mut Vec<ConsoleEffect>) {
    if state.filters.set_search(text) {
        refetch_from_top(state, effects);
    }
}

fn submit_prompt(state: &mut ConsoleState, prompt: Prompt, effects: &mut Vec<ConsoleEffect>) {
    match prompt.kind {
        PromptKind::Search => {
            state.debouncer.flush();
            apply_search(state, prompt.text, effects);
        }
        PromptKind::JumpPage => {
            let parsed = prompt
                .text
                .trim()
                .parse::<u32>()
                .map_err(|_| ShopfloorError::Validation(format!("'{}' is not a page", prompt.text)))
                .and_then(|page| state.pager().jump(page));
            match parsed {
                Ok(page) => {
                    if state.filters.set_page(page) {
                        refetch_from_top(state, effects);
                    }
                }
                Err(e) => {
                    state.toast = Some(Toast::error(e.to_string()));
                    state.prompt = Some(prompt);
                }
            }
        }
        PromptKind::Deadline => {
            let text = prompt.text.trim();
            let parsed = if text.is_empty() {
                Ok(None)
            } else {
                text.parse::<Date>().map(Some).map_err(|_| {
                    ShopfloorError::Validation(format!("'{text}' is not a date (YYYY-MM-DD)"))
                })
            };
            match parsed {
                Ok(deadline) => {
                    if state.filters.set_deadline(deadline) {
                        refetch_from_top(state, effects);
                    }
                }
                Err(e) => {
                    state.toast = Some(Toast::error(e.to_string()));
                    state.prompt = Some(prompt);
                }
            }
        }
    }
}

fn submit_modal(state: &mut ConsoleState, effects: &mut Vec<ConsoleEffect>) {
    let operators = &state.operators;
    let outcome = match state.modal.as_mut() {
        Some(Modal::Delete(confirmation)) => {
            Ok(confirmation.confirm().map(|id| ConsoleEffect::Delete { id }))
        }
        Some(Modal::Edit(form)) if !form.submitting => form.submission().map(|effect| {
            form.submitting = true;
            Some(effect)
        }),
        Some(Modal::Reassign(form)) if !form.submitting => {
            match filter_operators(operators, &form.query).first() {
                Some(operator) => {
                    let mut draft = EditDraft::for_order(&form.order);
                    draft.operator_id = Some(operator.id);
                    draft.validate().map(|update| {
                        form.submitting = true;
                        Some(ConsoleEffect::SubmitEdit {
                            id: form.order.id,
                            update,
                        })
                    })
                }
                None => Err(ShopfloorError::Validation(format!(
                    "no operator matches '{}'",
                    form.query
                ))),
            }
        }
        _ => Ok(None),
    };

    match outcome {
        Ok(Some(effect)) => effects.push(effect),
        Ok(None) => {}
        Err(e) => state.toast = Some(Toast::error(e.to_string())),
    }
}

/// Pure function: apply action to state (reducer pattern)
///
/// Returns the new state plus any effects the caller must run. Effects that
/// complete are fed back as `Loaded`, `OperatorsLoaded`, `Deleted` or `Saved`.
pub fn reduce_console_state(
    mut state: ConsoleState,
    action: ConsoleAction,
) -> (ConsoleState, Vec<ConsoleEffect>) {
    let mut effects = Vec::new();
    if state.session_expired {
        return (state, effects);
    }

    match action {
        ConsoleAction::Start => {
            fetch(&mut state, &mut effects);
            if state.role().is_manager() {
                effects.push(ConsoleEffect::LoadOperators);
            }
        }

        ConsoleAction::MoveUp => {
            state.selected = state.selected.saturating_sub(1);
        }
        ConsoleAction::MoveDown => {
            let max = state.loader.records().len().saturating_sub(1);
            state.selected = (state.selected + 1).min(max);
        }
        ConsoleAction::GoToTop => {
            state.selected = 0;
        }
        ConsoleAction::NextPage => {
            if let Some(page) = state.pager().next()
                && state.filters.set_page(page)
            {
                refetch_from_top(&mut state, &mut effects);
            }
        }
        ConsoleAction::PrevPage => {
            if let Some(page) = state.pager().prev()
                && state.filters.set_page(page)
            {
                refetch_from_top(&mut state, &mut effects);
            }
        }

        ConsoleAction::OpenSearch if state.role().is_manager() => {
            state.prompt = Some(Prompt {
                kind: PromptKind::Search,
                text: state.filters.state().search.clone(),
            });
        }
        ConsoleAction::OpenJump => {
            state.prompt = Some(Prompt {
                kind: PromptKind::JumpPage,
                text: String::new(),
            });
        }
        ConsoleAction::OpenDeadline if state.role().is_manager() => {
            state.prompt = Some(Prompt {
                kind: PromptKind::Deadline,
                text: state
                    .filters
                    .state()
                    .deadline
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            });
        }
        // Operators' assigned list only filters by status.
        ConsoleAction::OpenSearch | ConsoleAction::OpenDeadline => {}
        ConsoleAction::PromptChar(c, at) => {
            if let Some(prompt) = state.prompt.as_mut() {
                prompt.text.push(c);
                if prompt.kind == PromptKind::Search {
                    state.debouncer.input(prompt.text.clone(), at);
                }
            }
        }
        ConsoleAction::PromptBackspace(at) => {
            if let Some(prompt) = state.prompt.as_mut() {
                prompt.text.pop();
                if prompt.kind == PromptKind::Search {
                    state.debouncer.input(prompt.text.clone(), at);
                }
            }
        }
        ConsoleAction::PromptSubmit => {
            if let Some(prompt) = state.prompt.take() {
                submit_prompt(&mut state, prompt, &mut effects);
            }
        }
        ConsoleAction::PromptCancel => {
            if let Some(prompt) = state.prompt.take()
                && prompt.kind == PromptKind::Search
            {
                state.debouncer.flush();
            }
        }

        ConsoleAction::CycleView => {
            state.view_mode = state.view_mode.next_for(state.role());
        }
        ConsoleAction::CycleStatusFilter => {
            let current = state.filters.state().status;
            let idx = STATUS_FILTER_CYCLE
                .iter()
                .position(|s| *s == current)
                .unwrap_or(0);
            let next = STATUS_FILTER_CYCLE[(idx + 1) % STATUS_FILTER_CYCLE.len()];
            if state.filters.set_status(next) {
                refetch_from_top(&mut state, &mut effects);
            }
        }
        ConsoleAction::CycleOperatorFilter => {
            if !state.filters.supports_operator_filter() {
                return (state, effects);
            }
            if state.operators.is_empty() {
                state.toast = Some(Toast::warning("Operator list is not loaded yet"));
                return (state, effects);
            }
            let current = state.filters.state().operator_id;
            let next = match current {
                None => Some(state.operators[0].id),
                Some(id) => state
                    .operators
                    .iter()
                    .position(|op| op.id == id)
                    .and_then(|i| state.operators.get(i + 1))
                    .map(|op| op.id),
            };
            if let Ok(true) = state.filters.set_operator(next) {
                refetch_from_top(&mut state, &mut effects);
            }
        }
        ConsoleAction::ClearFilters => {
            state.debouncer.flush();
            if state.filters.clear() {
                state.toast = Some(Toast::info("Filters cleared"));
                refetch_from_top(&mut state, &mut effects);
            }
        }
        ConsoleAction::Refresh => {
            fetch(&mut state, &mut effects);
        }
        ConsoleAction::PrevMonth => {
            state.calendar_month = projection::previous_month(state.calendar_month);
        }
        ConsoleAction::NextMonth => {
            state.calendar_month = projection::next_month(state.calendar_month);
        }
        ConsoleAction::ThisMonth => {
            state.calendar_month = state.today;
        }

        ConsoleAction::RequestDelete => {
            if let Err(e) = super::actions::require(state.role(), RecordAction::Delete) {
                state.toast = Some(Toast::warning(e.to_string()));
            } else if let Some(record) = state.selected_record() {
                state.modal = Some(Modal::Delete(DeleteConfirmation::for_order(record)));
            }
        }
        ConsoleAction::ConfirmDelete => {
            if matches!(state.modal, Some(Modal::Delete(_))) {
                submit_modal(&mut state, &mut effects);
            }
        }
        ConsoleAction::OpenEdit => {
            if let Some(record) = state.selected_record().cloned() {
                if actions_for(state.role(), &record).contains(&RecordAction::Edit) {
                    state.modal = Some(Modal::Edit(EditModal::new(record, state.role())));
                } else {
                    state.toast = Some(Toast::warning(format!(
                        "{} is {} and can no longer be updated",
                        record.work_order_number,
                        record.status.label().to_lowercase()
                    )));
                }
            }
        }
        ConsoleAction::OpenReassign => {
            if let Err(e) = super::actions::require(state.role(), RecordAction::Reassign) {
                state.toast = Some(Toast::warning(e.to_string()));
            } else if let Some(record) = state.selected_record().cloned() {
                state.modal = Some(Modal::Reassign(ReassignModal {
                    order: record,
                    query: String::new(),
                    submitting: false,
                }));
            }
        }
        ConsoleAction::ModalChar(c) => match state.modal.as_mut() {
            Some(Modal::Edit(form)) if c.is_ascii_digit() && form.quantity.len() < 9 => {
                form.quantity.push(c);
            }
            Some(Modal::Reassign(form)) => form.query.push(c),
            _ => {}
        },
        ConsoleAction::ModalBackspace => match state.modal.as_mut() {
            Some(Modal::Edit(form)) => {
                form.quantity.pop();
            }
            Some(Modal::Reassign(form)) => {
                form.query.pop();
            }
            _ => {}
        },
        ConsoleAction::ModalCycle => {
            if let Some(Modal::Edit(form)) = state.modal.as_mut() {
                form.cycle_status();
            }
        }
        ConsoleAction::ModalSubmit => {
            submit_modal(&mut state, &mut effects);
        }
        ConsoleAction::CancelModal => {
            state.modal = None;
        }

        ConsoleAction::Loaded { ticket, result } => match state.loader.complete(ticket, result) {
            LoadOutcome::Applied => {
                let max = state.loader.records().len().saturating_sub(1);
                state.selected = state.selected.min(max);
            }
            LoadOutcome::Failed(failure) => {
                restore_shown_page(&mut state);
                surface(&mut state, &failure, &mut effects);
            }
            LoadOutcome::Stale => {}
        },
        ConsoleAction::OperatorsLoaded(result) => match result {
            Ok(operators) => state.operators = operators,
            Err(failure) => surface(&mut state, &failure, &mut effects),
        },
        ConsoleAction::Deleted { id, result } => match result {
            Ok(()) => {
                let number = match &state.modal {
                    Some(Modal::Delete(c)) if c.id == id => c.work_order_number.clone(),
                    _ => format!("#{id}"),
                };
                state.modal = None;
                state.toast = Some(Toast::success(format!("Deleted work order {number}")));
                fetch(&mut state, &mut effects);
            }
            Err(failure) => {
                if let Some(Modal::Delete(c)) = state.modal.as_mut() {
                    c.failed();
                }
                surface(&mut state, &failure, &mut effects);
            }
        },
        ConsoleAction::Saved { id, result } => match result {
            Ok(order) => {
                state.modal = None;
                state.toast = Some(Toast::success(format!(
                    "Updated work order {}",
                    order.work_order_number
                )));
                tracing::debug!(id, "work order saved");
                fetch(&mut state, &mut effects);
            }
            Err(failure) => {
                match state.modal.as_mut() {
                    Some(Modal::Edit(form)) => form.submitting = false,
                    Some(Modal::Reassign(form)) => form.submitting = false,
                    _ => {}
                }
                surface(&mut state, &failure, &mut effects);
            }
        },

        ConsoleAction::Tick(now) => {
            if let Some(text) = state.debouncer.poll(now) {
                apply_search(&mut state, text, &mut effects);
            }
            if state
                .toast
                .as_ref()
                .is_some_and(|t| t.is_expired(state.toast_ttl, now))
            {
                state.toast = None;
            }
        }
        ConsoleAction::DismissToast => {
            state.toast = None;
        }
        ConsoleAction::Quit => {
            effects.push(ConsoleEffect::Exit { message: None });
        }
    }

    (state, effects)
}

// ============================================================================
// View model
// ============================================================================

/// A single keyboard shortcut entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: String,
    pub action: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// One work order as a list row or card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViewModel {
    pub id: u64,
    pub work_order_number: String,
    pub product_name: String,
    pub operator: String,
    pub status: WorkOrderStatus,
    /// "produced/target"
    pub progress: String,
    pub deadline: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnViewModel {
    pub title: String,
    /// Set for status columns, used for coloring
    pub status: Option<WorkOrderStatus>,
    pub cards: Vec<RowViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayViewModel {
    pub day: i8,
    pub in_month: bool,
    pub is_today: bool,
    pub entries: Vec<RowViewModel>,
    /// "+N more" when the day has more records than fit
    pub more: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyViewModel {
    Table {
        rows: Vec<RowViewModel>,
        hidden_above: usize,
        hidden_below: usize,
    },
    Kanban {
        columns: Vec<ColumnViewModel>,
    },
    Calendar {
        title: String,
        weeks: Vec<Vec<DayViewModel>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationViewModel {
    pub markers: Vec<PageMarker>,
    pub current: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptViewModel {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalViewModel {
    ConfirmDelete {
        message: String,
        submitting: bool,
    },
    Edit {
        work_order_number: String,
        /// Each option with whether it is the selected one
        status_options: Vec<(WorkOrderStatus, bool)>,
        quantity: String,
        target_quantity: u32,
        submitting: bool,
    },
    Reassign {
        work_order_number: String,
        query: String,
        matches: Vec<String>,
        submitting: bool,
    },
}

/// Computed view model for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleViewModel {
    pub username: String,
    pub role_label: &'static str,
    pub view_mode: ViewMode,
    /// Active filters, e.g. `status: pending`
    pub filter_summary: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub body: BodyViewModel,
    pub empty_message: Option<String>,
    pub pagination: PaginationViewModel,
    pub prompt: Option<PromptViewModel>,
    pub modal: Option<ModalViewModel>,
    pub toast: Option<Toast>,
    pub shortcuts: Vec<Shortcut>,
}

fn row(order: &WorkOrder, selected_id: Option<u64>, tz: &TimeZone) -> RowViewModel {
    RowViewModel {
        id: order.id,
        work_order_number: order.work_order_number.clone(),
        product_name: order.product_name.clone(),
        operator: order.operator.username.clone(),
        status: order.status,
        progress: format!("{}/{}", order.quantity, order.target_quantity),
        deadline: format_deadline(order.production_deadline, tz),
        is_selected: selected_id == Some(order.id),
    }
}

fn filter_summary(state: &ConsoleState) -> Vec<String> {
    let filters = state.filters.state();
    let mut summary = Vec::new();
    if let Some(status) = filters.status {
        summary.push(format!("status: {}", status.label()));
    }
    if state.filters.supports_operator_filter()
        && let Some(id) = filters.operator_id
    {
        let name = state
            .operators
            .iter()
            .find(|op| op.id == id)
            .map(|op| op.username.clone())
            .unwrap_or_else(|| format!("#{id}"));
        summary.push(format!("operator: {name}"));
    }
    if !filters.search.trim().is_empty() {
        summary.push(format!("search: {}", filters.search.trim()));
    }
    if let Some(deadline) = filters.deadline {
        summary.push(format!("deadline: {deadline}"));
    }
    summary
}

pub fn console_shortcuts(state: &ConsoleState) -> Vec<Shortcut> {
    if let Some(prompt) = &state.prompt {
        let mut shortcuts = vec![Shortcut::new("Enter", "apply"), Shortcut::new("Esc", "close")];
        if prompt.kind == PromptKind::Deadline {
            shortcuts.push(Shortcut::new("empty", "clear"));
        }
        return shortcuts;
    }

    match &state.modal {
        Some(Modal::Delete(_)) => {
            return vec![Shortcut::new("y", "delete"), Shortcut::new("n/Esc", "cancel")];
        }
        Some(Modal::Edit(_)) => {
            return vec![
                Shortcut::new("Tab", "status"),
                Shortcut::new("0-9", "quantity"),
                Shortcut::new("Enter", "save"),
                Shortcut::new("Esc", "cancel"),
            ];
        }
        Some(Modal::Reassign(_)) => {
            return vec![Shortcut::new("Enter", "assign"), Shortcut::new("Esc", "cancel")];
        }
        None => {}
    }

    let manager = state.role().is_manager();
    let mut shortcuts = vec![
        Shortcut::new("j/k", "move"),
        Shortcut::new("h/l", "page"),
        Shortcut::new("g", "go to page"),
        Shortcut::new("v", "view"),
        Shortcut::new("s", "status"),
    ];
    if manager {
        shortcuts.push(Shortcut::new("o", "operator"));
        shortcuts.push(Shortcut::new("/", "search"));
        shortcuts.push(Shortcut::new("D", "deadline"));
    }
    shortcuts.push(Shortcut::new("c", "clear"));
    shortcuts.push(Shortcut::new("e", "edit"));
    if manager {
        shortcuts.push(Shortcut::new("R", "reassign"));
        shortcuts.push(Shortcut::new("x", "delete"));
    }
    if state.view_mode == ViewMode::Calendar {
        shortcuts.push(Shortcut::new("[/]", "month"));
    }
    shortcuts.push(Shortcut::new("r", "refresh"));
    shortcuts.push(Shortcut::new("q", "quit"));
    shortcuts
}

fn modal_view_model(state: &ConsoleState) -> Option<ModalViewModel> {
    state.modal.as_ref().map(|modal| match modal {
        Modal::Delete(confirmation) => ModalViewModel::ConfirmDelete {
            message: confirmation.message(),
            submitting: confirmation.submitting,
        },
        Modal::Edit(form) => ModalViewModel::Edit {
            work_order_number: form.order.work_order_number.clone(),
            status_options: form
                .options()
                .into_iter()
                .map(|s| (s, s == form.status))
                .collect(),
            quantity: form.quantity.clone(),
            target_quantity: form.order.target_quantity,
            submitting: form.submitting,
        },
        Modal::Reassign(form) => ModalViewModel::Reassign {
            work_order_number: form.order.work_order_number.clone(),
            query: form.query.clone(),
            matches: filter_operators(&state.operators, &form.query)
                .into_iter()
                .take(5)
                .map(|op| op.username.clone())
                .collect(),
            submitting: form.submitting,
        },
    })
}

/// Pure function: compute view model from state
///
/// `list_height` is the number of table rows that fit on screen; the table
/// window follows the selection.
pub fn compute_console_view_model(state: &ConsoleState, list_height: usize) -> ConsoleViewModel {
    let records = state.loader.records();
    let selected_id = state.selected_record().map(|r| r.id);
    let tz = &state.time_zone;

    let calendar = CalendarContext {
        month: state.calendar_month,
        today: state.today,
        time_zone: tz.clone(),
    };

    let body = match projection::project(records, state.view_mode, &calendar) {
        Projection::Table(rows) => {
            let height = list_height.max(1);
            let offset = state.selected.saturating_sub(height - 1);
            let end = (offset + height).min(rows.len());
            let start = offset.min(end);
            BodyViewModel::Table {
                rows: rows[start..end]
                    .iter()
                    .map(|r| row(r, selected_id, tz))
                    .collect(),
                hidden_above: start,
                hidden_below: rows.len() - end,
            }
        }
        Projection::KanbanByStatus(columns) => BodyViewModel::Kanban {
            columns: columns
                .into_iter()
                .map(|c| ColumnViewModel {
                    title: format!("{} ({})", c.status.label(), c.records.len()),
                    status: Some(c.status),
                    cards: c.records.iter().map(|r| row(r, selected_id, tz)).collect(),
                })
                .collect(),
        },
        Projection::KanbanByOperator(columns) => BodyViewModel::Kanban {
            columns: columns
                .into_iter()
                .map(|c| ColumnViewModel {
                    title: format!("{} ({})", c.operator.username, c.records.len()),
                    status: None,
                    cards: c.records.iter().map(|r| row(r, selected_id, tz)).collect(),
                })
                .collect(),
        },
        Projection::Calendar(month) => BodyViewModel::Calendar {
            title: month.title(),
            weeks: month
                .weeks
                .iter()
                .map(|week| {
                    week.iter()
                        .map(|day| DayViewModel {
                            day: day.date.day(),
                            in_month: day.in_month,
                            is_today: day.is_today,
                            entries: day
                                .cell
                                .visible
                                .iter()
                                .map(|r| row(r, selected_id, tz))
                                .collect(),
                            more: day.cell.overflow_label(),
                        })
                        .collect()
                })
                .collect(),
        },
    };

    let empty_message = if records.is_empty() {
        Some(if state.loader.is_loading() {
            "Loading work orders...".to_string()
        } else if state.filters.state().is_filtered() {
            "No work orders match the current filters".to_string()
        } else {
            "No work orders found".to_string()
        })
    } else {
        None
    };

    let pagination = state.loader.pagination();
    let pager = state.pager();

    ConsoleViewModel {
        username: state.user.username.clone(),
        role_label: state.role().label(),
        view_mode: state.view_mode,
        filter_summary: filter_summary(state),
        is_loading: state.loader.is_loading(),
        error: state.loader.error().map(str::to_string),
        body,
        empty_message,
        pagination: PaginationViewModel {
            markers: pager.visible_pages(),
            current: pager.current(),
            total_pages: pager.total(),
            total_records: pagination.total,
            has_prev: pager.has_prev(),
            has_next: pager.has_next(),
        },
        prompt: state.prompt.as_ref().map(|p| PromptViewModel {
            label: match p.kind {
                PromptKind::Search => "Search",
                PromptKind::JumpPage => "Go to page",
                PromptKind::Deadline => "Deadline (YYYY-MM-DD)",
            },
            text: p.text.clone(),
        }),
        modal: modal_view_model(state),
        toast: state.toast.clone(),
        shortcuts: console_shortcuts(state),
    }
}
