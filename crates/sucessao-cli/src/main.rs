mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::benchmark::BenchmarkArgs;
use commands::itcmd::{ItcmdArgs, SuggestRateArgs};
use commands::leverage::LeverageArgs;
use commands::sensitivity::SensitivityArgs;
use commands::session::SessionArgs;
use commands::simulate::SimulateArgs;

/// Succession cost estimates for Brazilian estates
#[derive(Parser)]
#[command(
    name = "sucessao",
    version,
    about = "Succession cost estimates for Brazilian estates",
    long_about = "Estimate the cost of transferring an estate to heirs: ITCMD under the \
                  current flat rates or the proposed bracket schedule, legal and notarial \
                  fees, the spousal share, and a life-insurance funding comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log pipeline stages to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full succession cost estimate (assets, spousal share, ITCMD, fees, insurance)
    Simulate(SimulateArgs),
    /// Suggested ITCMD rate for a state and taxable base
    SuggestRate(SuggestRateArgs),
    /// ITCMD amount under the flat or marginal-progressive mode
    Itcmd(ItcmdArgs),
    /// Insurance leverage: premium outlay, multiple and discount
    Leverage(LeverageArgs),
    /// Replay a scripted UI session through the rate-field controller
    Session(SessionArgs),
    /// Compare the effective ITCMD rate with international inheritance taxes
    Benchmark(BenchmarkArgs),
    /// Total cost grid over ITCMD and legal-fee rates
    Sensitivity(SensitivityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::SuggestRate(args) => commands::itcmd::run_suggest_rate(args),
        Commands::Itcmd(args) => commands::itcmd::run_itcmd(args),
        Commands::Leverage(args) => commands::leverage::run_leverage(args),
        Commands::Session(args) => commands::session::run_session(args),
        Commands::Benchmark(args) => commands::benchmark::run_benchmark(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Version => {
            println!("sucessao {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!("command completed");
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
