//! Console reducer and view model tests
//!
//! Drives `reduce_console_state` through whole interaction sequences and
//! checks the effects it asks the component to run. No terminal and no
//! network are involved: effect results are fed back as actions by hand.

mod common;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::mock_data::{
    WorkOrderBuilder, console_state, manager, mock_operators, mock_page, mock_work_orders,
    operator,
};
use shopfloor::api::{ListQuery, StatusUpdate};
use shopfloor::console::model::{BodyViewModel, Modal, PromptKind};
use shopfloor::console::{
    ConsoleAction, ConsoleEffect, ConsoleState, LoadFailure, LoadTicket, PageMarker, ToastLevel,
    ViewMode, compute_console_view_model, reduce_console_state,
};
use shopfloor::types::{WorkOrder, WorkOrderPage, WorkOrderStatus};

const LIST_HEIGHT: usize = 20;

fn dispatch(state: ConsoleState, action: ConsoleAction) -> (ConsoleState, Vec<ConsoleEffect>) {
    reduce_console_state(state, action)
}

fn only_fetch(effects: &[ConsoleEffect]) -> (LoadTicket, ListQuery) {
    let fetches: Vec<_> = effects
        .iter()
        .filter_map(|e| match e {
            ConsoleEffect::Fetch { ticket, query } => Some((*ticket, query.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(fetches.len(), 1, "expected exactly one fetch in {effects:?}");
    fetches[0].clone()
}

fn manager_query(query: &ListQuery) -> &shopfloor::api::ManagerQuery {
    match query {
        ListQuery::Manager(q) => q,
        other => panic!("expected a manager query, got {other:?}"),
    }
}

/// Start the console and answer the first fetch with `page`
fn started_with(state: ConsoleState, page: WorkOrderPage) -> ConsoleState {
    let (state, effects) = dispatch(state, ConsoleAction::Start);
    let (ticket, _) = only_fetch(&effects);
    let (state, effects) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket,
            result: Ok(page),
        },
    );
    assert!(effects.is_empty());
    state
}

fn unauthorized() -> LoadFailure {
    LoadFailure {
        message: "session expired or invalid, run `shopfloor login`".to_string(),
        unauthorized: true,
        retryable: false,
    }
}

fn ids(records: &[WorkOrder]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

// ============================================================================
// Startup
// ============================================================================

#[test]
fn test_manager_start_fetches_first_page_and_operators() {
    let (state, effects) = dispatch(console_state(manager()), ConsoleAction::Start);

    let (_, query) = only_fetch(&effects);
    let q = manager_query(&query);
    assert_eq!(q.page, 1);
    assert_eq!(q.limit, 10);
    assert!(effects.contains(&ConsoleEffect::LoadOperators));
    assert!(state.loader.is_loading());
}

#[test]
fn test_operator_start_fetches_assigned_list_only() {
    let (_, effects) = dispatch(console_state(operator()), ConsoleAction::Start);

    let (_, query) = only_fetch(&effects);
    assert_eq!(query.path(), "work-orders/assigned");
    assert!(!effects.contains(&ConsoleEffect::LoadOperators));
}

// ============================================================================
// Filters and paging
// ============================================================================

#[test]
fn test_filter_change_after_paging_returns_to_page_one() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 10), 1, 3, 30),
    );

    let (state, effects) = dispatch(state, ConsoleAction::NextPage);
    let (ticket, query) = only_fetch(&effects);
    assert_eq!(query.page(), 2);
    let (state, _) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket,
            result: Ok(mock_page(mock_work_orders(11, 10), 2, 3, 30)),
        },
    );
    let (state, _) = dispatch(state, ConsoleAction::MoveDown);
    assert_eq!(state.selected, 1);

    let (state, effects) = dispatch(state, ConsoleAction::CycleStatusFilter);
    let (_, query) = only_fetch(&effects);
    let q = manager_query(&query);
    assert_eq!(q.page, 1);
    assert_eq!(q.status, Some(WorkOrderStatus::Pending));
    assert_eq!(state.selected, 0);
}

#[test]
fn test_next_page_on_last_page_does_nothing() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let (_, effects) = dispatch(state, ConsoleAction::NextPage);
    assert!(effects.is_empty());
}

fn retryable(message: &str) -> LoadFailure {
    LoadFailure {
        message: message.to_string(),
        unauthorized: false,
        retryable: true,
    }
}

#[test]
fn test_failed_page_move_keeps_pager_on_shown_page() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 10), 1, 3, 30),
    );

    let (state, effects) = dispatch(state, ConsoleAction::NextPage);
    let (ticket, _) = only_fetch(&effects);
    let (state, _) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket,
            result: Err(retryable("database unavailable")),
        },
    );
    assert_eq!(ids(state.loader.records()), (1..=10).collect::<Vec<_>>());
    assert_eq!(state.filters.page(), 1);

    let (_, effects) = dispatch(state.clone(), ConsoleAction::Refresh);
    assert_eq!(only_fetch(&effects).1.page(), 1);

    let (state, effects) = dispatch(state, ConsoleAction::PrevPage);
    assert!(effects.is_empty());
    let (_, effects) = dispatch(state, ConsoleAction::NextPage);
    assert_eq!(only_fetch(&effects).1.page(), 2);
}

#[test]
fn test_failed_filter_change_keeps_new_filter_on_page_one() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 10), 1, 3, 30),
    );
    let (state, effects) = dispatch(state, ConsoleAction::NextPage);
    let (ticket, _) = only_fetch(&effects);
    let (state, _) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket,
            result: Ok(mock_page(mock_work_orders(11, 10), 2, 3, 30)),
        },
    );

    let (state, effects) = dispatch(state, ConsoleAction::CycleStatusFilter);
    let (ticket, _) = only_fetch(&effects);
    let (state, _) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket,
            result: Err(retryable("database unavailable")),
        },
    );

    assert_eq!(state.filters.page(), 1);
    assert_eq!(state.filters.state().status, Some(WorkOrderStatus::Pending));
}

#[test]
fn test_clear_filters_refetches_and_notifies() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let (state, _) = dispatch(state, ConsoleAction::CycleStatusFilter);

    let (state, effects) = dispatch(state, ConsoleAction::ClearFilters);
    let (_, query) = only_fetch(&effects);
    assert_eq!(manager_query(&query).status, None);
    let toast = state.toast.as_ref().expect("clearing filters should notify");
    assert_eq!(toast.level, ToastLevel::Info);
    assert_eq!(toast.message, "Filters cleared");

    let (_, effects) = dispatch(state, ConsoleAction::ClearFilters);
    assert!(effects.is_empty());
}

#[test]
fn test_operator_filter_cycles_through_loaded_operators() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let (state, _) = dispatch(state, ConsoleAction::OperatorsLoaded(Ok(mock_operators())));

    let (state, effects) = dispatch(state, ConsoleAction::CycleOperatorFilter);
    let (_, query) = only_fetch(&effects);
    assert_eq!(manager_query(&query).operator_id, Some(7));

    let vm = compute_console_view_model(&state, LIST_HEIGHT);
    assert_eq!(vm.filter_summary, vec!["operator: budi".to_string()]);
}

#[test]
fn test_search_settles_after_debounce_window() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let t0 = Instant::now();

    let (state, _) = dispatch(state, ConsoleAction::OpenSearch);
    let (state, _) = dispatch(state, ConsoleAction::PromptChar('b', t0));
    let (state, effects) = dispatch(
        state,
        ConsoleAction::PromptChar('r', t0 + Duration::from_millis(100)),
    );
    assert!(effects.is_empty());

    let (state, effects) = dispatch(
        state,
        ConsoleAction::Tick(t0 + Duration::from_millis(300)),
    );
    assert!(effects.is_empty(), "search fired before the window elapsed");

    let (state, effects) = dispatch(
        state,
        ConsoleAction::Tick(t0 + Duration::from_millis(600)),
    );
    let (_, query) = only_fetch(&effects);
    assert_eq!(manager_query(&query).search.as_deref(), Some("br"));
    assert_eq!(state.prompt.as_ref().map(|p| p.kind), Some(PromptKind::Search));
}

#[test]
fn test_refresh_reissues_current_query() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let previous = state.loader.last_query().cloned();
    let (_, effects) = dispatch(state, ConsoleAction::Refresh);
    let (_, query) = only_fetch(&effects);
    assert_eq!(Some(query), previous);
}

#[test]
fn test_invalid_jump_keeps_prompt_open() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 10), 1, 3, 30),
    );
    let now = Instant::now();
    let (state, _) = dispatch(state, ConsoleAction::OpenJump);
    let (state, _) = dispatch(state, ConsoleAction::PromptChar('9', now));
    let (state, effects) = dispatch(state, ConsoleAction::PromptSubmit);

    assert!(effects.is_empty());
    assert!(state.prompt.is_some());
    assert_eq!(state.toast.map(|t| t.level), Some(ToastLevel::Error));
}

// ============================================================================
// Role gating
// ============================================================================

#[test]
fn test_operator_never_reaches_operator_views_or_filters() {
    let mut state = started_with(
        console_state(operator()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );

    for _ in 0..8 {
        let (next, _) = dispatch(state, ConsoleAction::CycleView);
        assert_ne!(next.view_mode, ViewMode::KanbanByOperator);
        state = next;
    }

    let (state, effects) = dispatch(state, ConsoleAction::CycleOperatorFilter);
    assert!(effects.is_empty());
    let (state, _) = dispatch(state, ConsoleAction::OpenSearch);
    assert!(state.prompt.is_none());

    let vm = compute_console_view_model(&state, LIST_HEIGHT);
    assert!(vm.shortcuts.iter().all(|s| s.key != "o" && s.key != "/"));
}

#[test]
fn test_operator_cannot_edit_terminal_records() {
    let records = vec![
        WorkOrderBuilder::new(1)
            .status(WorkOrderStatus::Completed)
            .quantity(100, 100)
            .build(),
    ];
    let state = started_with(console_state(operator()), mock_page(records, 1, 1, 1));

    let (state, effects) = dispatch(state, ConsoleAction::OpenEdit);
    assert!(effects.is_empty());
    assert!(state.modal.is_none());
    assert_eq!(state.toast.map(|t| t.level), Some(ToastLevel::Warning));
}

#[test]
fn test_operator_edit_submits_status_update() {
    let records = vec![
        WorkOrderBuilder::new(4)
            .status(WorkOrderStatus::InProgress)
            .quantity(5, 20)
            .build(),
    ];
    let state = started_with(console_state(operator()), mock_page(records, 1, 1, 1));

    let (state, _) = dispatch(state, ConsoleAction::OpenEdit);
    let (state, _) = dispatch(state, ConsoleAction::ModalCycle);
    let (state, _) = dispatch(state, ConsoleAction::ModalChar('0'));
    let (state, effects) = dispatch(state, ConsoleAction::ModalSubmit);

    assert_eq!(
        effects,
        vec![ConsoleEffect::SubmitStatus {
            id: 4,
            update: StatusUpdate {
                status: WorkOrderStatus::Completed,
                quantity: Some(50),
                description: None,
            },
        }]
    );

    let (_, effects) = dispatch(state, ConsoleAction::ModalSubmit);
    assert!(effects.is_empty(), "submitting twice must not resend");
}

#[test]
fn test_operator_delete_is_refused() {
    let state = started_with(
        console_state(operator()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let (state, effects) = dispatch(state, ConsoleAction::RequestDelete);
    assert!(effects.is_empty());
    assert!(state.modal.is_none());
    assert!(state.toast.is_some());
}

// ============================================================================
// Delete flow
// ============================================================================

#[test]
fn test_delete_requires_confirmation_and_fires_once() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );

    let (state, effects) = dispatch(state, ConsoleAction::RequestDelete);
    assert!(effects.is_empty());
    let (state, effects) = dispatch(state, ConsoleAction::CancelModal);
    assert!(effects.is_empty());
    assert!(state.modal.is_none());

    let (state, _) = dispatch(state, ConsoleAction::MoveDown);
    let (state, _) = dispatch(state, ConsoleAction::RequestDelete);
    match &state.modal {
        Some(Modal::Delete(confirmation)) => {
            assert!(confirmation.message().contains("WO-20240501-002"));
        }
        other => panic!("expected delete confirmation, got {other:?}"),
    }

    let (state, effects) = dispatch(state, ConsoleAction::ConfirmDelete);
    assert_eq!(effects, vec![ConsoleEffect::Delete { id: 2 }]);
    let (state, effects) = dispatch(state, ConsoleAction::ConfirmDelete);
    assert!(effects.is_empty());

    let (state, effects) = dispatch(
        state,
        ConsoleAction::Deleted {
            id: 2,
            result: Ok(()),
        },
    );
    only_fetch(&effects);
    assert!(state.modal.is_none());
    let toast = state.toast.expect("success toast");
    assert_eq!(toast.level, ToastLevel::Success);
    assert!(toast.message.contains("WO-20240501-002"));
}

#[test]
fn test_failed_delete_keeps_modal_open_for_retry() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let (state, _) = dispatch(state, ConsoleAction::RequestDelete);
    let (state, _) = dispatch(state, ConsoleAction::ConfirmDelete);
    let (state, effects) = dispatch(
        state,
        ConsoleAction::Deleted {
            id: 1,
            result: Err(LoadFailure {
                message: "server error".to_string(),
                unauthorized: false,
                retryable: true,
            }),
        },
    );
    assert!(effects.is_empty());
    assert!(matches!(state.modal, Some(Modal::Delete(_))));

    let (_, effects) = dispatch(state, ConsoleAction::ConfirmDelete);
    assert_eq!(effects, vec![ConsoleEffect::Delete { id: 1 }]);
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct LogBuffer(Arc<parking_lot::Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_failed_mutation_is_logged_and_surfaced() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let (state, _) = dispatch(state, ConsoleAction::RequestDelete);
    let (state, _) = dispatch(state, ConsoleAction::ConfirmDelete);

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let (state, _) = tracing::subscriber::with_default(subscriber, || {
        dispatch(
            state,
            ConsoleAction::Deleted {
                id: 1,
                result: Err(retryable("connection reset by peer")),
            },
        )
    });

    let output = String::from_utf8(logs.0.lock().clone()).expect("utf-8 log output");
    assert!(output.contains("WARN"), "log output: {output}");
    assert!(output.contains("console request failed"), "log output: {output}");
    assert!(output.contains("connection reset by peer"), "log output: {output}");
    assert_eq!(state.toast.map(|t| t.level), Some(ToastLevel::Error));
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_out_of_order_responses_show_newest_query() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 10), 1, 3, 30),
    );

    let (state, effects) = dispatch(state, ConsoleAction::CycleStatusFilter);
    let (ticket_a, _) = only_fetch(&effects);
    let (state, effects) = dispatch(state, ConsoleAction::CycleStatusFilter);
    let (ticket_b, query_b) = only_fetch(&effects);
    assert_eq!(
        manager_query(&query_b).status,
        Some(WorkOrderStatus::InProgress)
    );

    let (state, _) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket: ticket_b,
            result: Ok(mock_page(mock_work_orders(200, 2), 1, 1, 2)),
        },
    );
    let (state, _) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket: ticket_a,
            result: Ok(mock_page(mock_work_orders(100, 5), 1, 1, 5)),
        },
    );

    assert_eq!(ids(state.loader.records()), vec![200, 201]);
    assert!(!state.loader.is_loading());
}

#[test]
fn test_failed_load_keeps_records_and_shows_toast() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 4), 1, 1, 4),
    );
    let (state, effects) = dispatch(state, ConsoleAction::Refresh);
    let (ticket, _) = only_fetch(&effects);
    let (state, effects) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket,
            result: Err(LoadFailure {
                message: "request timed out after 30s".to_string(),
                unauthorized: false,
                retryable: true,
            }),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.loader.records().len(), 4);
    let vm = compute_console_view_model(&state, LIST_HEIGHT);
    assert_eq!(vm.error.as_deref(), Some("request timed out after 30s"));
    assert!(!vm.is_loading);
    assert_eq!(vm.toast.map(|t| t.level), Some(ToastLevel::Error));
}

#[test]
fn test_unauthorized_exits_exactly_once() {
    let (state, effects) = dispatch(console_state(manager()), ConsoleAction::Start);
    let (ticket, _) = only_fetch(&effects);

    let (state, effects) = dispatch(
        state,
        ConsoleAction::OperatorsLoaded(Err(unauthorized())),
    );
    assert_eq!(
        effects,
        vec![ConsoleEffect::Exit {
            message: Some("session expired, run `shopfloor login`".to_string()),
        }]
    );

    let (state, effects) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket,
            result: Err(unauthorized()),
        },
    );
    assert!(effects.is_empty());
    let (_, effects) = dispatch(state, ConsoleAction::Refresh);
    assert!(effects.is_empty());
}

#[test]
fn test_toast_expires_on_tick() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 3), 1, 1, 3),
    );
    let (state, _) = dispatch(state, ConsoleAction::OperatorsLoaded(Ok(Vec::new())));
    let (state, _) = dispatch(state, ConsoleAction::CycleOperatorFilter);
    let created = state.toast.as_ref().expect("warning toast").timestamp;

    let (state, _) = dispatch(state, ConsoleAction::Tick(created + Duration::from_secs(1)));
    assert!(state.toast.is_some());
    let (state, _) = dispatch(state, ConsoleAction::Tick(created + Duration::from_secs(6)));
    assert!(state.toast.is_none());
}

// ============================================================================
// View model
// ============================================================================

#[test]
fn test_view_model_pagination_window() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(41, 10), 5, 10, 100),
    );
    let vm = compute_console_view_model(&state, LIST_HEIGHT);

    use PageMarker::{Ellipsis, Page};
    assert_eq!(
        vm.pagination.markers,
        vec![
            Page(1),
            Ellipsis,
            Page(3),
            Page(4),
            Page(5),
            Page(6),
            Page(7),
            Ellipsis,
            Page(10),
        ]
    );
    assert!(vm.pagination.has_prev && vm.pagination.has_next);
    assert_eq!(vm.pagination.total_records, 100);
}

#[test]
fn test_calendar_day_shows_three_entries_and_overflow() {
    let records: Vec<WorkOrder> = (1..=5)
        .map(|id| WorkOrderBuilder::new(id).deadline("2024-05-15").build())
        .collect();
    let state = started_with(console_state(manager()), mock_page(records, 1, 1, 5));
    let (state, _) = dispatch(state, ConsoleAction::CycleView);
    let (state, _) = dispatch(state, ConsoleAction::CycleView);
    let (state, _) = dispatch(state, ConsoleAction::CycleView);
    assert_eq!(state.view_mode, ViewMode::Calendar);

    let vm = compute_console_view_model(&state, LIST_HEIGHT);
    let BodyViewModel::Calendar { title, weeks } = vm.body else {
        panic!("expected calendar body");
    };
    assert!(title.contains("2024"));

    let day = weeks
        .iter()
        .flatten()
        .find(|d| d.in_month && d.day == 15)
        .expect("May 15 in grid");
    assert_eq!(day.entries.len(), 3);
    assert_eq!(day.more.as_deref(), Some("+2 more"));
}

#[test]
fn test_calendar_month_navigation() {
    let state = console_state(manager());
    let (state, _) = dispatch(state, ConsoleAction::NextMonth);
    assert_eq!(state.calendar_month.month(), 6);
    let (state, _) = dispatch(state, ConsoleAction::PrevMonth);
    let (state, _) = dispatch(state, ConsoleAction::PrevMonth);
    assert_eq!(state.calendar_month.month(), 4);
    let (state, _) = dispatch(state, ConsoleAction::ThisMonth);
    assert_eq!(state.calendar_month, common::mock_data::TODAY);
}

#[test]
fn test_table_window_follows_selection() {
    let state = started_with(
        console_state(manager()),
        mock_page(mock_work_orders(1, 10), 1, 1, 10),
    );
    let mut state = state;
    for _ in 0..6 {
        state = dispatch(state, ConsoleAction::MoveDown).0;
    }

    let vm = compute_console_view_model(&state, 4);
    let BodyViewModel::Table {
        rows,
        hidden_above,
        hidden_below,
    } = vm.body
    else {
        panic!("expected table body");
    };
    assert_eq!(rows.len(), 4);
    assert_eq!(hidden_above, 3);
    assert_eq!(hidden_below, 3);
    assert!(rows.last().is_some_and(|r| r.is_selected && r.id == 7));
}

#[test]
fn test_empty_message_depends_on_filters() {
    let state = started_with(console_state(manager()), mock_page(Vec::new(), 1, 1, 0));
    let vm = compute_console_view_model(&state, LIST_HEIGHT);
    assert_eq!(vm.empty_message.as_deref(), Some("No work orders found"));

    let (state, effects) = dispatch(state, ConsoleAction::CycleStatusFilter);
    let (ticket, _) = only_fetch(&effects);
    let (state, _) = dispatch(
        state,
        ConsoleAction::Loaded {
            ticket,
            result: Ok(mock_page(Vec::new(), 1, 1, 0)),
        },
    );
    let vm = compute_console_view_model(&state, LIST_HEIGHT);
    assert_eq!(
        vm.empty_message.as_deref(),
        Some("No work orders match the current filters")
    );
}

#[test]
fn test_reassign_picks_best_fuzzy_match() {
    let records = vec![WorkOrderBuilder::new(3).quantity(10, 50).build()];
    let state = started_with(console_state(manager()), mock_page(records, 1, 1, 1));
    let (state, _) = dispatch(state, ConsoleAction::OperatorsLoaded(Ok(mock_operators())));

    let (state, _) = dispatch(state, ConsoleAction::OpenReassign);
    let (state, _) = dispatch(state, ConsoleAction::ModalChar('s'));
    let (state, _) = dispatch(state, ConsoleAction::ModalChar('r'));
    let (_, effects) = dispatch(state, ConsoleAction::ModalSubmit);

    match effects.as_slice() {
        [ConsoleEffect::SubmitEdit { id, update }] => {
            assert_eq!(*id, 3);
            assert_eq!(update.operator_id, Some(8));
        }
        other => panic!("expected one edit submission, got {other:?}"),
    }
}

#[test]
fn test_quit_requests_exit_without_message() {
    let (_, effects) = dispatch(console_state(operator()), ConsoleAction::Quit);
    assert_eq!(effects, vec![ConsoleEffect::Exit { message: None }]);
}
