use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use econmind::core::Language;
use econmind::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Output language (es or en); overrides the configured one
    #[arg(short, long, global = true)]
    lang: Option<Language>,

    /// Print the data as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for econmind::AppCommand {
    fn from(cmd: Commands) -> econmind::AppCommand {
        match cmd {
            Commands::Dashboard => econmind::AppCommand::Dashboard,
            Commands::Gap => econmind::AppCommand::Gap,
            Commands::Inflation => econmind::AppCommand::Inflation,
            Commands::Exchange => econmind::AppCommand::Exchange,
            Commands::Ratio => econmind::AppCommand::Ratio,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display every section of the dashboard
    Dashboard,
    /// Display the currency gap between the official and a parallel dollar
    Gap,
    /// Display general and core CPI
    Inflation,
    /// Display the official USD exchange rate
    Exchange,
    /// Display the exchange rate vs CPI ratio
    Ratio,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = econmind::RunOptions {
        language: cli.lang,
        json: cli.json,
    };
    let result = match cli.command {
        Some(Commands::Setup) => econmind::cli::setup::setup(),
        Some(cmd) => {
            econmind::run_command(cmd.into(), cli.config_path.as_deref(), options).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
