use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use splitbook::cli::{handle_cache_command, handle_report_command, CacheCommands, ReportArgs};
use splitbook::config::{Settings, SplitbookPaths};

#[derive(Parser)]
#[command(
    name = "splitbook",
    version,
    about = "Split shared household expenses between two people",
    long_about = "splitbook reads a household ledger, works out who fronted each \
                  payment and who owes what, and prints the single transfer that \
                  settles shared spending for the period."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the settlement for a period
    Report(ReportArgs),

    /// Local ledger cache commands
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = SplitbookPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;

    match cli.command {
        Some(Commands::Report(args)) => {
            handle_report_command(&paths, &settings, args)?;
        }
        Some(Commands::Cache(cmd)) => {
            handle_cache_command(&paths, cmd)?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!(
                    "splitbook is already initialized; keeping {}",
                    paths.settings_file().display()
                );
                return Ok(());
            }
            println!("Initializing splitbook at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Edit {} to set party names and markers.", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            let m = &settings.markers;
            println!("splitbook Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger cache:   {}", paths.ledger_cache_file().display());
            println!();
            println!("Settings:");
            println!("  Party A:          {}", settings.party_a_name);
            println!("  Party B:          {}", settings.party_b_name);
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Separator:        {}", m.separator);
            println!("  Personal marker:  {}", m.self_marker);
            println!("  Party A marker:   {}", m.party_a_marker);
            println!("  Party B marker:   {}", m.party_b_marker);
            println!("  Deferred comment: {}", m.deferred_sentinel);
            println!("  Paid-by-ID comment: {}", m.paid_by_id_sentinel);
        }
        None => {
            println!("splitbook - two-party expense settlement");
            println!();
            println!("Run 'splitbook --help' for usage information.");
            println!("Run 'splitbook report --csv FILE' to settle a ledger export.");
        }
    }

    Ok(())
}
