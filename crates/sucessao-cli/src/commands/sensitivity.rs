use clap::Args;
use serde_json::Value;

use sucessao_core::scenarios::sensitivity::{self, CostSensitivityInput};

use crate::input;

/// Arguments for the ITCMD × legal-fee what-if grid
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON/YAML input file with the sweep definition
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sens_input: CostSensitivityInput =
        input::resolve(args.input.as_deref(), "sensitivity input")?
            .ok_or("--input <file.json> or stdin required for sensitivity analysis")?;
    let result = sensitivity::sweep_cost_sensitivity(&sens_input)?;
    Ok(serde_json::to_value(result)?)
}
