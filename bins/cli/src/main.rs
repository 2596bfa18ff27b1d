//! TrackFest command-line client.
//!
//! Students file expense claims; the treasurer approves, rejects, and settles
//! them and owns the budget. The logged-in role persists in a local session
//! file between invocations.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trackfest_core::expense::StatusFilter;
use trackfest_core::session::Role;
use trackfest_shared::types::ExpenseId;
use trackfest_shared::{AppConfig, AppError};

mod commands;
mod output;

/// TrackFest CLI application
#[derive(Debug, Parser)]
#[command(name = "trackfest", version, about = "Event expense claims and budget tracking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in as a student or the treasurer
    Login {
        #[arg(value_parser = parse_role)]
        role: Role,
    },

    /// Clear the local session
    Logout,

    /// Show the current role
    Whoami,

    /// Submit a new expense claim
    Add {
        #[arg(long)]
        title: String,
        /// Positive amount, e.g. 1250 or ₹1250.50
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: Option<String>,
        /// Submitter name
        #[arg(long)]
        name: Option<String>,
        /// Receipt photo to embed
        #[arg(long)]
        receipt: Option<PathBuf>,
    },

    /// List expense claims, newest first
    List {
        /// All, Pending, Approved, Rejected or "Payment Cleared"
        #[arg(long, default_value = "All")]
        status: StatusFilter,
        /// Only claims filed under this name
        #[arg(long)]
        submitter: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// List everyone who has filed a claim
    Submitters,

    /// Approve a pending claim (treasurer)
    Approve { id: ExpenseId },

    /// Reject a pending claim (treasurer)
    Reject { id: ExpenseId },

    /// Mark an approved claim as paid (treasurer)
    Clear {
        id: ExpenseId,
        /// Payment proof image
        #[arg(long)]
        proof: PathBuf,
    },

    /// Budget management
    Budget {
        #[command(subcommand)]
        command: BudgetCommands,
    },

    /// Budget total, spend, and pending claims
    Dashboard {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum BudgetCommands {
    /// Replace the budget total (treasurer)
    Set { amount: String },
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role '{value}', expected student or treasurer"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackfest=info,sea_orm=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(out) => {
            if !out.is_empty() {
                println!("{out}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(code = err.error_code(), "command failed");
            eprintln!("error: {err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

async fn run(command: Commands) -> Result<String, AppError> {
    // Session commands read only the session section, so they work without a database url.
    if let Some(session) = session_command(&command) {
        let app = commands::App::open(&AppConfig::load_session()?).await?;
        return match session {
            SessionCommand::Login(role) => app.login(role).await,
            SessionCommand::Logout => app.logout().await,
            SessionCommand::Whoami => app.whoami().await,
        };
    }

    let config = AppConfig::load()?;
    let app = commands::App::open(&config.session).await?;

    match command {
        Commands::Login { role } => app.login(role).await,
        Commands::Logout => app.logout().await,
        Commands::Whoami => app.whoami().await,
        Commands::Add {
            title,
            amount,
            description,
            name,
            receipt,
        } => {
            let args = commands::AddArgs {
                title,
                amount,
                description,
                name,
                receipt,
            };
            app.workspace(&config).await?.add(args).await
        }
        Commands::List {
            status,
            submitter,
            json,
        } => {
            app.workspace(&config)
                .await?
                .list(status, submitter.as_deref(), json)
                .await
        }
        Commands::Submitters => app.workspace(&config).await?.submitters().await,
        Commands::Approve { id } => app.workspace(&config).await?.approve(id).await,
        Commands::Reject { id } => app.workspace(&config).await?.reject(id).await,
        Commands::Clear { id, proof } => app.workspace(&config).await?.clear(id, &proof).await,
        Commands::Budget {
            command: BudgetCommands::Set { amount },
        } => app.workspace(&config).await?.set_budget(&amount).await,
        Commands::Dashboard { json } => app.workspace(&config).await?.dashboard(json).await,
    }
}

enum SessionCommand {
    Login(Role),
    Logout,
    Whoami,
}

fn session_command(command: &Commands) -> Option<SessionCommand> {
    match command {
        Commands::Login { role } => Some(SessionCommand::Login(*role)),
        Commands::Logout => Some(SessionCommand::Logout),
        Commands::Whoami => Some(SessionCommand::Whoami),
        _ => None,
    }
}
