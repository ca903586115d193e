use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use sucessao_core::insurance::leverage::{
    self, InsuranceRequest, DEFAULT_PAYMENT_YEARS, DEFAULT_PREMIUM_FACTOR,
};
use sucessao_core::types::with_metadata;

/// Arguments for the insurance leverage calculation
#[derive(Args)]
pub struct LeverageArgs {
    /// Target coverage (usually the total succession cost)
    #[arg(long)]
    pub coverage: Decimal,

    /// Annual premium; defaults to 4% of coverage
    #[arg(long)]
    pub premium: Option<Decimal>,

    /// Payment horizon in years
    #[arg(long, default_value_t = DEFAULT_PAYMENT_YEARS)]
    pub years: u32,
}

pub fn run_leverage(args: LeverageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let request = InsuranceRequest {
        coverage_override: Some(args.coverage),
        annual_premium: args.premium,
        years: Some(args.years),
    };
    leverage::validate_insurance_request(&request)?;

    let plan = leverage::plan_insurance(&request, args.coverage, DEFAULT_PREMIUM_FACTOR, args.years);

    let mut warnings = Vec::new();
    if args.premium.is_none() {
        warnings.push(format!(
            "Annual premium assumed at {}% of coverage; not an actuarial quote.",
            DEFAULT_PREMIUM_FACTOR * Decimal::ONE_HUNDRED
        ));
    }

    Ok(serde_json::to_value(with_metadata(
        "Insurance leverage: coverage over total premium outlay",
        &json!({
            "coverage": args.coverage.to_string(),
            "years": args.years,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        plan,
    ))?)
}
