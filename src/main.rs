use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use minarca::backup::BackupManager;
use minarca::cli::{
    handle_patterns_command, handle_schedule_command, handle_select_command,
    handle_settings_command, handle_status_command, handle_unlink_command, PatternsCommands,
};
use minarca::config::MinarcaPaths;

#[derive(Parser)]
#[command(
    name = "minarca",
    version,
    about = "Minarca backup agent",
    long_about = "Inspect and edit the Minarca agent state: last backup status, \
                  settings and the include/exclude patterns used by the next backup."
)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the status of the last backup
    Status {
        /// Print status and settings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show current configuration and paths
    Settings,

    /// Forget the server identity of this computer
    Unlink,

    /// Set the backup interval (hourly, daily, weekly, monthly or a number of hours)
    Schedule { value: String },

    /// Selection pattern commands
    #[command(subcommand)]
    Patterns(PatternsCommands),

    /// Include paths in the backup
    Include {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Exclude paths from the backup
    Exclude {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let paths = MinarcaPaths::new()?;
    let manager = BackupManager::new(paths);

    match cli.command {
        Some(Commands::Status { json }) => handle_status_command(&manager, json)?,
        None => handle_status_command(&manager, false)?,
        Some(Commands::Settings) => handle_settings_command(&manager)?,
        Some(Commands::Unlink) => handle_unlink_command(&manager)?,
        Some(Commands::Schedule { value }) => handle_schedule_command(&manager, &value)?,
        Some(Commands::Patterns(cmd)) => handle_patterns_command(&manager, cmd)?,
        Some(Commands::Include { paths }) => handle_select_command(&manager, true, &paths)?,
        Some(Commands::Exclude { paths }) => handle_select_command(&manager, false, &paths)?,
    }

    Ok(())
}
