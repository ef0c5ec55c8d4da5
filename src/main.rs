use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use shopfloor::ViewMode;
use shopfloor::commands::{
    CreateOptions, EditOptions, LsOptions, cmd_config_get, cmd_config_set, cmd_config_show,
    cmd_console, cmd_create, cmd_delete, cmd_edit, cmd_login, cmd_logout, cmd_ls, cmd_note,
    cmd_operators, cmd_report_operators, cmd_report_summary, cmd_show, cmd_status, cmd_theme_get,
    cmd_theme_set, cmd_theme_toggle, cmd_whoami,
};
use shopfloor::session::ThemePreference;
use shopfloor::types::{VALID_STATUSES, WorkOrderStatus};

/// Log filter, e.g. `SHOPFLOOR_LOG=shopfloor=debug`
const LOG_ENV: &str = "SHOPFLOOR_LOG";

#[derive(Parser)]
#[command(name = "shopfloor")]
#[command(about = "Work-order console for production managers and operators")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Username (prompted when omitted)
        username: Option<String>,

        /// Password (falls back to $SHOPFLOOR_PASSWORD, then a prompt)
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the logged-in user
    Whoami,

    /// List work orders
    #[command(visible_alias = "l")]
    Ls {
        /// Filter by status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<WorkOrderStatus>,

        /// Filter by operator id (managers only)
        #[arg(short, long)]
        operator: Option<u64>,

        /// Search work order number or product (managers only)
        #[arg(long)]
        search: Option<String>,

        /// Filter by production deadline, YYYY-MM-DD (managers only)
        #[arg(long)]
        deadline: Option<String>,

        /// Page number
        #[arg(short, long)]
        page: Option<u32>,

        /// table, kanban, kanban-operator or calendar
        #[arg(long, default_value = "table", value_parser = parse_view)]
        view: ViewMode,

        /// Month for the calendar view, YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },

    /// Show a work order and its activity log
    Show {
        /// Work order id
        id: u64,
    },

    /// Update status and produced quantity
    Status {
        /// Work order id
        id: u64,

        /// New status
        #[arg(value_parser = parse_status)]
        status: Option<WorkOrderStatus>,

        /// Produced quantity
        #[arg(short, long)]
        quantity: Option<u32>,

        /// Progress description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Edit a work order (managers only)
    Edit {
        /// Work order id
        id: u64,

        #[arg(long)]
        product: Option<String>,

        /// Produced quantity
        #[arg(short, long)]
        quantity: Option<u32>,

        #[arg(long)]
        target: Option<u32>,

        /// Production deadline (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        deadline: Option<String>,

        #[arg(short, long, value_parser = parse_status)]
        status: Option<WorkOrderStatus>,

        /// Operator id or username
        #[arg(short, long)]
        operator: Option<String>,
    },

    /// Create a work order (managers only)
    #[command(visible_alias = "c")]
    Create {
        /// Product name
        product: String,

        /// Target quantity
        #[arg(short, long)]
        target: u32,

        /// Already produced quantity
        #[arg(short, long, default_value = "0")]
        quantity: u32,

        /// Production deadline (YYYY-MM-DD or RFC 3339)
        #[arg(short, long)]
        deadline: String,

        /// Operator id or username
        #[arg(short, long)]
        operator: String,
    },

    /// Delete a work order (managers only)
    Delete {
        /// Work order id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a note to a work order's activity log
    Note {
        /// Work order id
        id: u64,

        /// Note text; @username mentions are highlighted
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List operators
    Operators {
        /// Fuzzy filter on username
        search: Option<String>,
    },

    /// Production reports (managers only)
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Light/dark theme for the console
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Interactive work-order console
    #[command(visible_alias = "ui")]
    Console,
}

#[derive(Subcommand)]
enum ReportAction {
    /// Target vs achieved per work order, with totals
    Summary {
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,

        /// End date, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
    },
    /// Completed work per operator
    Operators {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print one configuration value
    Get {
        /// Key: api_url, request_timeout, page_size, search_debounce_ms, toast_seconds
        key: String,
    },
    /// Set a configuration value
    Set {
        key: String,
        value: String,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Get,
    /// Set the theme
    Set {
        #[arg(value_parser = parse_theme)]
        theme: ThemePreference,
    },
    /// Switch between light and dark
    Toggle,
}

fn parse_status(s: &str) -> Result<WorkOrderStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid status. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )
    })
}

fn parse_view(s: &str) -> Result<ViewMode, String> {
    s.parse().map_err(|e: shopfloor::ShopfloorError| e.to_string())
}

fn parse_theme(s: &str) -> Result<ThemePreference, String> {
    s.parse().map_err(|e: shopfloor::ShopfloorError| e.to_string())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    // The console owns the terminal; log lines would corrupt the screen
    if !matches!(cli.command, Commands::Console) {
        init_logging();
    }

    let result = match cli.command {
        Commands::Login { username, password } => cmd_login(username, password, json).await,
        Commands::Logout => cmd_logout(json),
        Commands::Whoami => cmd_whoami(json),

        Commands::Ls {
            status,
            operator,
            search,
            deadline,
            page,
            view,
            month,
        } => {
            cmd_ls(
                LsOptions {
                    status,
                    operator,
                    search,
                    deadline,
                    page,
                    view,
                    month,
                },
                json,
            )
            .await
        }
        Commands::Show { id } => cmd_show(id, json).await,
        Commands::Status {
            id,
            status,
            quantity,
            description,
        } => cmd_status(id, status, quantity, description, json).await,
        Commands::Edit {
            id,
            product,
            quantity,
            target,
            deadline,
            status,
            operator,
        } => {
            cmd_edit(
                id,
                EditOptions {
                    product_name: product,
                    quantity,
                    target_quantity: target,
                    deadline,
                    status,
                    operator,
                },
                json,
            )
            .await
        }
        Commands::Create {
            product,
            target,
            quantity,
            deadline,
            operator,
        } => {
            cmd_create(
                CreateOptions {
                    product_name: product,
                    target_quantity: target,
                    quantity,
                    deadline,
                    operator,
                },
                json,
            )
            .await
        }
        Commands::Delete { id, yes } => cmd_delete(id, yes, json).await,
        Commands::Note { id, text } => cmd_note(id, &text.join(" "), json).await,
        Commands::Operators { search } => cmd_operators(search.as_deref(), json).await,

        Commands::Report { action } => match action {
            ReportAction::Summary { from, to } => {
                cmd_report_summary(from.as_deref(), to.as_deref(), json).await
            }
            ReportAction::Operators { from, to } => {
                cmd_report_operators(from.as_deref(), to.as_deref(), json).await
            }
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(json),
            ConfigAction::Get { key } => cmd_config_get(&key, json),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value, json),
        },

        Commands::Theme { action } => match action {
            ThemeAction::Get => cmd_theme_get(json),
            ThemeAction::Set { theme } => cmd_theme_set(theme, json),
            ThemeAction::Toggle => cmd_theme_toggle(json),
        },

        Commands::Console => cmd_console().await,
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
