//! Work-order console
//!
//! A thin iocraft shell around the pure console model: key events and
//! effect results are funnelled through one channel, reduced with
//! [`reduce_console_state`], and the resulting effects run against the API on
//! the tokio runtime.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use iocraft::prelude::*;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

use crate::api::{HttpApi, WorkOrderApi};
use crate::config::Config;
use crate::console::model::{
    BodyViewModel, ColumnViewModel, DayViewModel, ModalViewModel, PaginationViewModel,
    PromptViewModel, RowViewModel,
};
use crate::console::pagination::render_pages;
use crate::console::{
    ConsoleAction, ConsoleEffect, ConsoleOptions, ConsoleState, LoadFailure,
    compute_console_view_model, reduce_console_state,
};
use crate::error::{Result, ShopfloorError};
use crate::session::{SessionContext, SessionUser, ThemePreference};
use crate::tui::components::{Footer, Modal, ToastNotification, WorkOrderCard};
use crate::tui::keymap::{InputMode, key_to_action};
use crate::tui::theme::{init_theme, theme};

const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Rows taken by the header, filter line, table header, pager, prompt and footer
const CHROME_ROWS: u16 = 7;

/// Rows one kanban card occupies including its border
const CARD_ROWS: usize = 5;

/// Where the console leaves its parting message for the caller
pub type ExitSlot = Arc<parking_lot::Mutex<Option<String>>>;

/// Props for the WorkOrderConsole component
#[derive(Default, Props)]
pub struct WorkOrderConsoleProps {
    pub api: Option<HttpApi>,
    pub initial: Option<ConsoleState>,
    pub exit_message: Option<ExitSlot>,
}

struct ActionChannel {
    tx: mpsc::UnboundedSender<ConsoleAction>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<ConsoleAction>>>,
}

/// Start an effect in the background. Completed work comes back on `tx`.
fn run_effect(
    api: &HttpApi,
    tx: &mpsc::UnboundedSender<ConsoleAction>,
    effect: ConsoleEffect,
) -> ControlFlow<Option<String>> {
    let api = api.clone();
    let tx = tx.clone();
    match effect {
        ConsoleEffect::Fetch { ticket, query } => {
            debug!(generation = ticket.generation(), page = query.page(), "fetching work orders");
            tokio::spawn(async move {
                let result = api.list_work_orders(&query).await.map_err(LoadFailure::from);
                let _ = tx.send(ConsoleAction::Loaded { ticket, result });
            });
        }
        ConsoleEffect::LoadOperators => {
            tokio::spawn(async move {
                let result = api.get_operators().await.map_err(LoadFailure::from);
                let _ = tx.send(ConsoleAction::OperatorsLoaded(result));
            });
        }
        ConsoleEffect::Delete { id } => {
            tokio::spawn(async move {
                let result = api.delete_work_order(id).await.map_err(LoadFailure::from);
                let _ = tx.send(ConsoleAction::Deleted { id, result });
            });
        }
        ConsoleEffect::SubmitStatus { id, update } => {
            tokio::spawn(async move {
                let result = api.update_status(id, &update).await.map_err(LoadFailure::from);
                let _ = tx.send(ConsoleAction::Saved { id, result });
            });
        }
        ConsoleEffect::SubmitEdit { id, update } => {
            tokio::spawn(async move {
                let result = api
                    .update_work_order(id, &update)
                    .await
                    .map_err(LoadFailure::from);
                let _ = tx.send(ConsoleAction::Saved { id, result });
            });
        }
        ConsoleEffect::Exit { message } => return ControlFlow::Break(message),
    }
    ControlFlow::Continue(())
}

/// Interactive work-order list with table, kanban and calendar views
#[component]
pub fn WorkOrderConsole<'a>(
    props: &WorkOrderConsoleProps,
    mut hooks: Hooks,
) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let console_state: State<Option<ConsoleState>> = hooks.use_state(|| props.initial.clone());
    let should_exit = hooks.use_state(|| false);

    let channel: State<ActionChannel> = hooks.use_state(|| {
        let (tx, rx) = mpsc::unbounded_channel::<ConsoleAction>();
        let _ = tx.send(ConsoleAction::Start);
        ActionChannel {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    });
    let action_sender = channel.read().tx.clone();
    let action_receiver = channel.read().rx.clone();

    // Single reducer loop: every state transition happens here
    let dispatcher: Handler<()> = hooks.use_async_handler({
        let api = props.api.clone();
        let exit_slot = props.exit_message.clone();
        let action_sender = action_sender.clone();

        move |()| {
            let api = api.clone();
            let exit_slot = exit_slot.clone();
            let tx = action_sender.clone();
            let rx = action_receiver.clone();
            let mut console_state = console_state;
            let mut should_exit = should_exit;

            Box::pin(async move {
                let Some(api) = api else {
                    return;
                };
                let mut rx = rx.lock().await;
                let mut ticker = tokio::time::interval(TICK_INTERVAL);

                loop {
                    let action = tokio::select! {
                        received = rx.recv() => match received {
                            Some(action) => action,
                            None => return,
                        },
                        _ = ticker.tick() => ConsoleAction::Tick(Instant::now()),
                    };

                    let Some(current) = console_state.write().take() else {
                        return;
                    };
                    let (next, effects) = reduce_console_state(current, action);
                    console_state.set(Some(next));

                    for effect in effects {
                        if let ControlFlow::Break(message) = run_effect(&api, &tx, effect) {
                            if let Some(slot) = &exit_slot {
                                *slot.lock() = message;
                            }
                            should_exit.set(true);
                            return;
                        }
                    }
                }
            })
        }
    });

    let mut dispatcher_started = hooks.use_state(|| false);
    if !dispatcher_started.get() {
        dispatcher_started.set(true);
        dispatcher.clone()(());
    }

    hooks.use_terminal_events({
        let tx = action_sender.clone();
        move |event| {
            if let TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
                && kind != KeyEventKind::Release
            {
                let Some(mode) = console_state.read().as_ref().map(InputMode::of) else {
                    return;
                };
                if let Some(action) = key_to_action(code, modifiers, mode, Instant::now()) {
                    let _ = tx.send(action);
                }
            }
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let theme = theme();
    let list_height = height.saturating_sub(CHROME_ROWS) as usize;
    let view = console_state
        .read()
        .as_ref()
        .map(|state| compute_console_view_model(state, list_height));
    let Some(view) = view else {
        return element!(View);
    };

    let filters_text = if view.filter_summary.is_empty() {
        "No filters".to_string()
    } else {
        view.filter_summary.join("  |  ")
    };

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
            position: Position::Relative,
        ) {
            // Header
            View(
                width: 100pct,
                height: 1,
                flex_shrink: 0.0,
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding_left: 1,
                padding_right: 1,
                background_color: theme.highlight,
            ) {
                Text(
                    content: format!("shopfloor  {}", view.view_mode.label()),
                    color: theme.highlight_text,
                    weight: Weight::Bold,
                )
                Text(
                    content: format!(
                        "{}{} ({})",
                        if view.is_loading { "loading...  " } else { "" },
                        view.username,
                        view.role_label,
                    ),
                    color: theme.highlight_text,
                )
            }

            // Filters
            View(width: 100pct, height: 1, flex_shrink: 0.0, padding_left: 1) {
                Text(
                    content: filters_text,
                    color: if view.filter_summary.is_empty() { theme.text_dimmed } else { theme.text },
                )
            }

            View(width: 100pct, flex_grow: 1.0, flex_direction: FlexDirection::Column) {
                #(match view.empty_message.clone() {
                    Some(message) => render_empty(message),
                    None => render_body(view.body.clone(), list_height),
                })
            }

            #(view.error.clone().map(|error| element! {
                View(width: 100pct, height: 1, flex_shrink: 0.0, padding_left: 1) {
                    Text(content: format!("Showing last loaded page: {error}"), color: theme.status_red)
                }
            }))

            #(render_pager(&view.pagination))
            #(view.prompt.clone().map(render_prompt))

            ToastNotification(toast: view.toast.clone())
            Footer(shortcuts: view.shortcuts.clone())

            #(view.modal.clone().map(render_modal))
        }
    }
}

fn render_empty(message: String) -> AnyElement<'static> {
    let theme = theme();
    element! {
        View(
            flex_grow: 1.0,
            width: 100pct,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
        ) {
            Text(content: message, color: theme.text_dimmed)
        }
    }
    .into_any()
}

fn render_body(body: BodyViewModel, list_height: usize) -> AnyElement<'static> {
    match body {
        BodyViewModel::Table {
            rows,
            hidden_above,
            hidden_below,
        } => render_table(rows, hidden_above, hidden_below),
        BodyViewModel::Kanban { columns } => render_kanban(columns, list_height),
        BodyViewModel::Calendar { title, weeks } => render_calendar(title, weeks),
    }
}

fn render_table(rows: Vec<RowViewModel>, hidden_above: usize, hidden_below: usize) -> AnyElement<'static> {
    let theme = theme();
    element! {
        View(width: 100pct, flex_direction: FlexDirection::Column, padding_left: 1, padding_right: 1) {
            View(
                width: 100pct,
                flex_direction: FlexDirection::Row,
                border_edges: Edges::Bottom,
                border_style: BorderStyle::Single,
                border_color: theme.border,
            ) {
                View(width: 22) { Text(content: "Number", color: theme.text_dimmed, weight: Weight::Bold) }
                View(flex_grow: 1.0) { Text(content: "Product", color: theme.text_dimmed, weight: Weight::Bold) }
                View(width: 14) { Text(content: "Operator", color: theme.text_dimmed, weight: Weight::Bold) }
                View(width: 13) { Text(content: "Status", color: theme.text_dimmed, weight: Weight::Bold) }
                View(width: 11) { Text(content: "Progress", color: theme.text_dimmed, weight: Weight::Bold) }
                View(width: 11) { Text(content: "Deadline", color: theme.text_dimmed, weight: Weight::Bold) }
            }
            #((hidden_above > 0).then(|| element! {
                Text(content: format!("  {hidden_above} more above"), color: theme.text_dimmed)
            }))
            #(rows.into_iter().map(|row| {
                let text_color = if row.is_selected { theme.highlight_text } else { theme.text };
                let status_color = if row.is_selected { theme.highlight_text } else { theme.status_color(row.status) };
                element! {
                    View(
                        width: 100pct,
                        height: 1,
                        flex_direction: FlexDirection::Row,
                        background_color: if row.is_selected { Some(theme.highlight) } else { None },
                    ) {
                        View(width: 22) {
                            Text(
                                content: format!("{}{}", if row.is_selected { ">" } else { " " }, row.work_order_number),
                                color: if row.is_selected { theme.highlight_text } else { theme.id_color },
                            )
                        }
                        View(flex_grow: 1.0) { Text(content: row.product_name, color: text_color) }
                        View(width: 14) { Text(content: row.operator, color: text_color) }
                        View(width: 13) { Text(content: row.status.label(), color: status_color) }
                        View(width: 11) { Text(content: row.progress, color: text_color) }
                        View(width: 11) { Text(content: row.deadline, color: text_color) }
                    }
                }
            }))
            #((hidden_below > 0).then(|| element! {
                Text(content: format!("  {hidden_below} more below"), color: theme.text_dimmed)
            }))
        }
    }
    .into_any()
}

/// Cards to show for a column, keeping the selected card in view
fn visible_cards(cards: &[RowViewModel], limit: usize) -> (usize, usize) {
    let limit = limit.max(1);
    let selected = cards.iter().position(|c| c.is_selected).unwrap_or(0);
    let start = selected.saturating_sub(limit - 1);
    let end = (start + limit).min(cards.len());
    (start, end)
}

fn render_kanban(columns: Vec<ColumnViewModel>, list_height: usize) -> AnyElement<'static> {
    let theme = theme();
    let limit = (list_height.saturating_sub(2) / CARD_ROWS).max(1);

    element! {
        View(width: 100pct, flex_grow: 1.0, flex_direction: FlexDirection::Row, column_gap: 1) {
            #(columns.into_iter().map(|column| {
                let title_color = column.status.map_or(theme.text, |s| theme.status_color(s));
                let has_selection = column.cards.iter().any(|c| c.is_selected);
                let (start, end) = visible_cards(&column.cards, limit);
                let hidden = column.cards.len() - (end - start);
                let show_status = column.status.is_none();
                element! {
                    View(
                        flex_grow: 1.0,
                                    flex_direction: FlexDirection::Column,
                        border_style: BorderStyle::Round,
                        border_color: if has_selection { theme.border_focused } else { theme.border },
                    ) {
                        View(width: 100pct, justify_content: JustifyContent::Center) {
                            Text(content: column.title, color: title_color, weight: Weight::Bold)
                        }
                        #(column.cards[start..end].iter().cloned().map(|card| element! {
                            WorkOrderCard(row: Some(card), show_status)
                        }))
                        #((hidden > 0).then(|| element! {
                            Text(content: format!(" +{hidden} more"), color: theme.text_dimmed)
                        }))
                    }
                }
            }))
        }
    }
    .into_any()
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn render_day(day: DayViewModel) -> AnyElement<'static> {
    let theme = theme();
    let day_color = if day.is_today {
        theme.today
    } else if day.in_month {
        theme.text
    } else {
        theme.text_dimmed
    };

    element! {
        View(
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            overflow: Overflow::Hidden,
            border_style: BorderStyle::Single,
            border_color: if day.is_today { theme.today } else { theme.border },
        ) {
            Text(
                content: day.day.to_string(),
                color: day_color,
                weight: if day.is_today { Weight::Bold } else { Weight::Normal },
            )
            #(day.entries.into_iter().map(|entry| element! {
                Text(
                    content: entry.work_order_number,
                    color: if entry.is_selected { theme.highlight } else { theme.status_color(entry.status) },
                    weight: if entry.is_selected { Weight::Bold } else { Weight::Normal },
                )
            }))
            #(day.more.map(|more| element! {
                Text(content: more, color: theme.text_dimmed)
            }))
        }
    }
    .into_any()
}

fn render_calendar(title: String, weeks: Vec<Vec<DayViewModel>>) -> AnyElement<'static> {
    let theme = theme();
    element! {
        View(width: 100pct, flex_grow: 1.0, flex_direction: FlexDirection::Column) {
            View(width: 100pct, justify_content: JustifyContent::Center) {
                Text(content: title, color: theme.text, weight: Weight::Bold)
            }
            View(width: 100pct, flex_direction: FlexDirection::Row) {
                #(WEEKDAYS.iter().map(|name| element! {
                    View(flex_grow: 1.0, justify_content: JustifyContent::Center) {
                        Text(content: *name, color: theme.text_dimmed)
                    }
                }))
            }
            #(weeks.into_iter().map(|week| element! {
                View(width: 100pct, flex_grow: 1.0, flex_direction: FlexDirection::Row) {
                    #(week.into_iter().map(render_day))
                }
            }))
        }
    }
    .into_any()
}

fn render_pager(pagination: &PaginationViewModel) -> AnyElement<'static> {
    let theme = theme();
    let pages = render_pages(&pagination.markers, pagination.current);
    let summary = format!(
        "page {} of {}  |  {} work orders",
        pagination.current,
        pagination.total_pages.max(1),
        pagination.total_records,
    );

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_shrink: 0.0,
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_direction: FlexDirection::Row, column_gap: 1) {
                Text(content: "<", color: if pagination.has_prev { theme.text } else { theme.text_dimmed })
                Text(content: pages, color: theme.text)
                Text(content: ">", color: if pagination.has_next { theme.text } else { theme.text_dimmed })
            }
            Text(content: summary, color: theme.text_dimmed)
        }
    }
    .into_any()
}

fn render_prompt(prompt: PromptViewModel) -> AnyElement<'static> {
    let theme = theme();
    element! {
        View(
            width: 100pct,
            height: 1,
            flex_shrink: 0.0,
            flex_direction: FlexDirection::Row,
            padding_left: 1,
        ) {
            Text(content: format!("{}: ", prompt.label), color: theme.border_focused, weight: Weight::Bold)
            Text(content: format!("{}_", prompt.text), color: theme.text)
        }
    }
    .into_any()
}

fn render_modal(modal: ModalViewModel) -> AnyElement<'static> {
    let theme = theme();
    match modal {
        ModalViewModel::ConfirmDelete {
            message,
            submitting,
        } => element! {
            Modal(
                title: "Delete work order".to_string(),
                border_color: Some(theme.status_red),
                footer_text: Some(if submitting { "Deleting...".to_string() } else { "[y] delete  [n/Esc] cancel".to_string() }),
                width: Some(56),
            ) {
                Text(content: message, color: theme.text)
            }
        }
        .into_any(),
        ModalViewModel::Edit {
            work_order_number,
            status_options,
            quantity,
            target_quantity,
            submitting,
        } => element! {
            Modal(
                title: format!("Update {work_order_number}"),
                footer_text: Some(if submitting { "Saving...".to_string() } else { "[Tab] status  [0-9] quantity  [Enter] save  [Esc] cancel".to_string() }),
                width: Some(64),
            ) {
                View(flex_direction: FlexDirection::Row, column_gap: 1) {
                    Text(content: "Status:", color: theme.text_dimmed)
                    #(status_options.into_iter().map(|(status, selected)| element! {
                        Text(
                            content: if selected { format!("[{}]", status.label()) } else { status.label().to_string() },
                            color: theme.status_color(status),
                            weight: if selected { Weight::Bold } else { Weight::Normal },
                        )
                    }))
                }
                View(flex_direction: FlexDirection::Row, column_gap: 1) {
                    Text(content: "Quantity:", color: theme.text_dimmed)
                    Text(content: format!("{quantity}_ / {target_quantity}"), color: theme.text)
                }
            }
        }
        .into_any(),
        ModalViewModel::Reassign {
            work_order_number,
            query,
            matches,
            submitting,
        } => {
            let no_matches = matches.is_empty();
            element! {
                Modal(
                    title: format!("Reassign {work_order_number}"),
                    footer_text: Some(if submitting { "Saving...".to_string() } else { "[Enter] assign best match  [Esc] cancel".to_string() }),
                    width: Some(56),
                ) {
                    View(flex_direction: FlexDirection::Row) {
                        Text(content: "Operator: ", color: theme.text_dimmed)
                        Text(content: format!("{query}_"), color: theme.text)
                    }
                    #(matches.into_iter().enumerate().map(|(i, name)| element! {
                        Text(
                            content: format!("{}{name}", if i == 0 { "> " } else { "  " }),
                            color: if i == 0 { theme.border_focused } else { theme.text },
                        )
                    }))
                    #(no_matches.then(|| element! {
                        Text(content: "No matching operators", color: theme.text_dimmed)
                    }))
                }
            }
            .into_any()
        }
    }
}

/// Run the console full screen until the user quits or the session expires.
///
/// Returns the message to print after the terminal is restored, if any.
pub async fn run_console(
    config: Config,
    session: SessionContext,
    user: SessionUser,
    preference: ThemePreference,
) -> Result<Option<String>> {
    init_theme(preference);

    let api = HttpApi::from_config(&config, session)?;
    let initial = ConsoleState::new(user, ConsoleOptions::from_config(&config));
    let exit_message: ExitSlot = Arc::new(parking_lot::Mutex::new(None));

    element!(WorkOrderConsole(
        api: Some(api),
        initial: Some(initial),
        exit_message: Some(exit_message.clone()),
    ))
    .fullscreen()
    .await
    .map_err(|e| ShopfloorError::Other(format!("TUI error: {e}")))?;

    let message = exit_message.lock().take();
    Ok(message)
}
