use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use sucessao_core::itcmd::engine::{self, TaxConfig, TaxMode};
use sucessao_core::itcmd::rates::{self, Jurisdiction};
use sucessao_core::succession::pipeline::validate_rate_field;
use sucessao_core::types::{validate_amount, with_metadata};
use sucessao_core::SuccessionError;

use super::{ModeArg, StateArg};

/// Arguments for the suggested ITCMD rate
#[derive(Args)]
pub struct SuggestRateArgs {
    /// State
    #[arg(long, value_enum, default_value = "sp")]
    pub state: StateArg,

    /// Use the proposed-law bracket schedule
    #[arg(long)]
    pub proposed_law: bool,

    /// Taxable base (after the spousal share)
    #[arg(long)]
    pub taxable_base: Decimal,
}

/// Arguments for a standalone ITCMD computation
#[derive(Args)]
pub struct ItcmdArgs {
    /// Gross estate before the spousal share
    #[arg(long)]
    pub gross_estate: Decimal,

    /// Spousal co-ownership share as a fraction (0 or 0.5)
    #[arg(long, default_value = "0")]
    pub share: Decimal,

    /// Flat percentage or marginal brackets
    #[arg(long, value_enum, default_value = "flat")]
    pub mode: ModeArg,

    /// Flat rate in percent; defaults to the state's rate
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// State used for the default flat rate
    #[arg(long, value_enum, default_value = "sp")]
    pub state: StateArg,
}

pub fn run_suggest_rate(args: SuggestRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    validate_amount("taxable_base", args.taxable_base)?;
    let jurisdiction: Jurisdiction = args.state.into();
    let suggested = rates::suggest_rate(jurisdiction, args.proposed_law, args.taxable_base);

    let result = json!({
        "jurisdiction": jurisdiction.label(),
        "use_proposed_law": args.proposed_law,
        "taxable_base": args.taxable_base,
        "suggested_rate": suggested,
        "itcmd_amount": engine::flat_itcmd(args.taxable_base, suggested),
    });
    let methodology = if args.proposed_law {
        "Flat-bracket: whole base at the rate of the bracket it falls into"
    } else {
        "State flat default"
    };
    Ok(serde_json::to_value(with_metadata(
        methodology,
        &json!({ "taxable_base": args.taxable_base.to_string() }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    ))?)
}

pub fn run_itcmd(args: ItcmdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    validate_amount("gross_estate", args.gross_estate)?;
    if args.share < Decimal::ZERO || args.share > Decimal::ONE {
        return Err(SuccessionError::InvalidInput {
            field: "share".into(),
            reason: "Co-ownership share must be between 0 and 1".into(),
        }
        .into());
    }
    let jurisdiction: Jurisdiction = args.state.into();
    let rate = args.rate.unwrap_or_else(|| jurisdiction.default_rate());
    validate_rate_field("rate", rate)?;

    let config = TaxConfig {
        mode: args.mode.into(),
        co_ownership_share: args.share,
    };
    let assessment = engine::assess_itcmd(&config, args.gross_estate, rate);

    let mut result = serde_json::to_value(&assessment)?;
    if config.mode == TaxMode::Progressive {
        result["slices"] = serde_json::to_value(engine::marginal_slices(assessment.taxable_base))?;
    }

    Ok(serde_json::to_value(with_metadata(
        "ITCMD assessment",
        &config,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    ))?)
}
