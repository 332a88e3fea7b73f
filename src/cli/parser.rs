use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for parishdesk
#[derive(Parser)]
#[command(
    name = "parishdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Parish administration: recurring services and the past events derived from them",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Editor to use (overrides $EDITOR/$VISUAL)
        #[arg(long = "editor", requires = "edit_config")]
        editor: Option<String>,
    },

    /// Manage the recurring service registry
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },

    /// Create past events for services whose last occurrence is due
    Derive {
        /// Service id to consider (repeatable). Default: every service with auto-generation on
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<i64>,

        /// Reference date for "past due" (YYYY-MM-DD). Default: today
        #[arg(long = "as-of", value_name = "DATE")]
        as_of: Option<String>,
    },

    /// List and manage derived events
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },

    /// Export derived events
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Only active events dated before today (as on the sermons page)
        #[arg(long)]
        past: bool,

        /// Include inactive events
        #[arg(long, conflicts_with = "past")]
        all: bool,

        /// Reference date for --past (YYYY-MM-DD). Default: today
        #[arg(long = "as-of", value_name = "DATE", requires = "past")]
        as_of: Option<String>,

        /// Only events derived from this service
        #[arg(long = "service", value_name = "ID")]
        service: Option<i64>,

        /// Overwrite an existing file without asking
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

/// Service fields shared by `service add` and `service edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceFields {
    /// Service type: sunday, midweek, youth, special
    #[arg(long = "type", value_name = "TYPE")]
    pub service_type: Option<String>,

    /// Human description of the schedule, e.g. "Sundays, 7:00-8:30am"
    #[arg(long = "schedule")]
    pub schedule: Option<String>,

    /// Text copied into the description of derived events
    #[arg(long = "description")]
    pub description: Option<String>,

    /// Date of the most recent occurrence (YYYY-MM-DD)
    #[arg(long = "last", value_name = "DATE")]
    pub last: Option<String>,

    /// Display order (lower first)
    #[arg(long = "order")]
    pub order: Option<i32>,
}

#[derive(Subcommand)]
pub enum ServiceAction {
    /// Register a new recurring service
    Add {
        name: String,

        #[command(flatten)]
        fields: ServiceFields,

        /// Enable automatic past-event generation
        #[arg(long = "auto")]
        auto: bool,

        /// Hide the service from public listings
        #[arg(long = "inactive")]
        inactive: bool,
    },

    /// List services
    List {
        /// Include inactive services
        #[arg(long)]
        all: bool,

        /// Only services of this type: sunday, midweek, youth, special
        #[arg(long = "type", value_name = "TYPE")]
        service_type: Option<String>,

        /// Only services with auto-generation on
        #[arg(long = "auto", conflicts_with = "no_auto")]
        auto: bool,

        /// Only services with auto-generation off
        #[arg(long = "no-auto")]
        no_auto: bool,

        /// Search name and description (case-insensitive)
        #[arg(long = "search", value_name = "TEXT")]
        search: Option<String>,
    },

    /// Update a service
    Edit {
        id: i64,

        #[arg(long = "name")]
        name: Option<String>,

        #[command(flatten)]
        fields: ServiceFields,

        /// Forget the last occurrence date
        #[arg(long = "clear-last", conflicts_with = "last")]
        clear_last: bool,

        #[arg(long = "auto", conflicts_with = "no_auto")]
        auto: bool,

        #[arg(long = "no-auto")]
        no_auto: bool,

        #[arg(long = "active", conflicts_with = "inactive")]
        active: bool,

        #[arg(long = "inactive")]
        inactive: bool,
    },

    /// Delete a service (derived events are kept)
    Del {
        id: i64,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum EventsAction {
    /// List derived events, newest first
    List {
        /// Only active events dated before today, limited as on the sermons page
        #[arg(long)]
        past: bool,

        /// Include inactive events
        #[arg(long, conflicts_with = "past")]
        all: bool,

        /// Reference date for --past (YYYY-MM-DD). Default: today
        #[arg(long = "as-of", value_name = "DATE", requires = "past")]
        as_of: Option<String>,

        /// Only events derived from this service
        #[arg(long = "service", value_name = "ID")]
        service: Option<i64>,

        /// Maximum number of rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Hide an event from public listings
    Deactivate { id: i64 },

    /// Show a previously hidden event again
    Activate { id: i64 },

    /// Delete an event
    Del {
        id: i64,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
