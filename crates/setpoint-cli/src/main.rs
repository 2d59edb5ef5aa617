//! Setpoint command-line interface
//!
//! A thin front end over `setpoint-core`: browse the shared drill library,
//! keep a local clipboard of drills, and schedule practice sessions.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "setpoint",
    version,
    about = "Plan volleyball practices from a shared drill library"
)]
struct Cli {
    /// Path to the local database (defaults to the platform data dir)
    #[arg(long, global = true, value_name = "PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and manage drills
    Drills {
        #[command(subcommand)]
        command: DrillCommands,
    },
    /// Manage the local drill clipboard
    Clipboard {
        #[command(subcommand)]
        command: ClipboardCommands,
    },
    /// Schedule and manage practice sessions
    Practices {
        #[command(subcommand)]
        command: PracticeCommands,
    },
    /// Sign in and out of the hosted store
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Check the subscription entitlement
    Entitlement {
        #[command(subcommand)]
        command: EntitlementCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DrillCommands {
    /// List your drills and favorites (or the public catalog)
    List {
        #[command(flatten)]
        filters: commands::drills::FilterArgs,

        /// Browse the public catalog instead of your library
        #[arg(long)]
        public: bool,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Items per page
        #[arg(long, default_value_t = setpoint_core::catalog::DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a drill
    Add(commands::drills::AddArgs),
    /// Delete a drill you own
    Delete {
        /// Drill id
        id: String,
    },
    /// Add a drill to your favorites
    Favorite {
        /// Drill id
        id: String,
    },
    /// Remove a drill from your favorites
    Unfavorite {
        /// Drill id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum ClipboardCommands {
    /// Copy a drill onto the clipboard
    Add {
        /// Drill id
        id: String,

        /// Planned duration in minutes
        #[arg(long)]
        minutes: Option<i64>,
    },
    /// Show the clipboard in stored order
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove a drill from the clipboard
    Remove {
        /// Drill id
        id: String,
    },
    /// Move a drill to a new position (1-based)
    Move {
        /// Drill id
        id: String,

        /// Target position, 1-based
        position: usize,
    },
    /// Remove every entry
    Clear,
}

#[derive(Debug, Subcommand)]
enum PracticeCommands {
    /// List your scheduled practices by start time
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Schedule a practice
    Add(commands::practices::AddArgs),
    /// Delete a practice
    Delete {
        /// Practice id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum AuthCommands {
    /// Sign in with email; the password is read from stdin
    Login {
        /// Account email
        email: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the current session
    Status,
}

#[derive(Debug, Subcommand)]
enum EntitlementCommands {
    /// Show the billing provider's answer for your account
    Status {
        /// Emit JSON instead of a sentence
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = config::resolve_db_path(cli.db_path.clone());
    tracing::debug!(path = %db_path.display(), "using local database");

    match run(cli, &db_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, db_path: &std::path::Path) -> Result<(), error::CliError> {
    match cli.command {
        Commands::Drills { command } => match command {
            DrillCommands::List {
                filters,
                public,
                pages,
                page_size,
                json,
            } => commands::drills::run_list(db_path, &filters, public, pages, page_size, json).await,
            DrillCommands::Add(args) => commands::drills::run_add(db_path, args).await,
            DrillCommands::Delete { id } => commands::drills::run_delete(db_path, &id).await,
            DrillCommands::Favorite { id } => commands::drills::run_favorite(db_path, &id, true).await,
            DrillCommands::Unfavorite { id } => {
                commands::drills::run_favorite(db_path, &id, false).await
            }
        },
        Commands::Clipboard { command } => match command {
            ClipboardCommands::Add { id, minutes } => {
                commands::clipboard::run_add(db_path, &id, minutes).await
            }
            ClipboardCommands::List { json } => commands::clipboard::run_list(db_path, json),
            ClipboardCommands::Remove { id } => commands::clipboard::run_remove(db_path, &id),
            ClipboardCommands::Move { id, position } => {
                commands::clipboard::run_move(db_path, &id, position)
            }
            ClipboardCommands::Clear => commands::clipboard::run_clear(db_path),
        },
        Commands::Practices { command } => match command {
            PracticeCommands::List { json } => commands::practices::run_list(db_path, json).await,
            PracticeCommands::Add(args) => commands::practices::run_add(db_path, args).await,
            PracticeCommands::Delete { id } => commands::practices::run_delete(db_path, &id).await,
        },
        Commands::Auth { command } => match command {
            AuthCommands::Login { email } => commands::auth_cmd::run_login(db_path, &email).await,
            AuthCommands::Logout => commands::auth_cmd::run_logout(db_path).await,
            AuthCommands::Status => commands::auth_cmd::run_status(db_path).await,
        },
        Commands::Entitlement { command } => match command {
            EntitlementCommands::Status { json } => {
                commands::entitlement::run_status(db_path, json).await
            }
        },
    }
}
