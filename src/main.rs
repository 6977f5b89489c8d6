use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use lajan::cli::{
    handle_analyze_command, handle_budget_command, handle_config_command, handle_export_command,
    AnalyzeCommands, BudgetCommands, ConfigCommands, ExportCommands,
};
use lajan::config::{LajanPaths, Settings};
use lajan::display::{format_audit_entries, format_categories};
use lajan::storage::Storage;

#[derive(Parser)]
#[command(
    name = "lajan",
    version,
    about = "Terminal budgeting with category alerts, suggestions and impact previews",
    long_about = "Lajan tracks budgets per period across a fixed set of spending \
                  categories. It flags categories that approach or exceed their \
                  allocation, suggests better amounts from past budgets and \
                  previews the effect of a reallocation before you make it."
)]
struct Cli {
    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and settings file
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// List the spending categories
    Categories,

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Statistics, alerts, suggestions and simulations
    #[command(subcommand)]
    Analyze(AnalyzeCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    lajan::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = LajanPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Lajan is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialized Lajan at: {}", paths.base_dir().display());
            println!();
            println!("Next steps:");
            println!("  lajan budget create Janvye --period 2025-01");
            println!("  lajan budget set Janvye alimentation 15000");
            println!("  lajan budget spend Janvye alimentation 2500");
        }
        Some(Commands::Config { command }) => {
            handle_config_command(&storage, &settings, command)?;
        }
        Some(Commands::Categories) => {
            println!("{}", format_categories());
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Analyze(cmd)) => {
            handle_analyze_command(&storage, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            println!("{}", format_audit_entries(&entries));
        }
        None => {
            println!("Lajan - terminal budgeting");
            println!();
            println!("Run 'lajan --help' for usage information.");
            if !paths.is_initialized() {
                println!("Run 'lajan init' to get started.");
            }
        }
    }

    Ok(())
}
