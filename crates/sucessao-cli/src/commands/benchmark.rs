use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use sucessao_core::benchmark::global::{self, GlobalBenchmarkInput};

use crate::input;

/// Arguments for the international comparison
#[derive(Args)]
pub struct BenchmarkArgs {
    /// ITCMD amount due
    #[arg(long)]
    pub itcmd_amount: Option<Decimal>,

    /// Taxable base the ITCMD was computed on
    #[arg(long)]
    pub taxable_base: Option<Decimal>,

    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_benchmark(args: BenchmarkArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bench_input: GlobalBenchmarkInput =
        match input::resolve(args.input.as_deref(), "benchmark input")? {
            Some(parsed) => parsed,
            None => GlobalBenchmarkInput {
                itcmd_amount: args
                    .itcmd_amount
                    .ok_or("--itcmd-amount is required (or provide --input)")?,
                taxable_base: args
                    .taxable_base
                    .ok_or("--taxable-base is required (or provide --input)")?,
            },
        };
    let result = global::compare_global(&bench_input)?;
    Ok(serde_json::to_value(result)?)
}
