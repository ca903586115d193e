use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{pct_of, validate_amount, with_metadata, ComputationOutput, Money, Percent};
use crate::SuccessionResult;

/// Label used for the household's own row.
pub const HOUSEHOLD_LABEL: &str = "Brasil (Sua Família)";

/// Top statutory inheritance-tax rates used as the international reference.
pub const REFERENCE_MAX_RATES: [(&str, Percent); 6] = [
    ("Japão", dec!(55)),
    ("Coreia do Sul", dec!(50)),
    ("França", dec!(45)),
    ("EUA", dec!(40)),
    ("Reino Unido", dec!(40)),
    ("Chile", dec!(25)),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalBenchmarkInput {
    pub itcmd_amount: Money,
    pub taxable_base: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub country: String,
    pub max_rate: Percent,
    pub is_household: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalBenchmarkOutput {
    pub household_effective_rate: Percent,
    /// Rows sorted by rate, highest first.
    pub rows: Vec<BenchmarkRow>,
    /// 1-based position of the household row.
    pub household_rank: usize,
    pub countries_above: usize,
}

/// Place the household's effective ITCMD rate among the reference countries.
pub fn compare_global(
    input: &GlobalBenchmarkInput,
) -> SuccessionResult<ComputationOutput<GlobalBenchmarkOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_amount("itcmd_amount", input.itcmd_amount)?;
    validate_amount("taxable_base", input.taxable_base)?;

    let household_effective_rate = pct_of(input.itcmd_amount, input.taxable_base);

    let mut rows: Vec<BenchmarkRow> = REFERENCE_MAX_RATES
        .iter()
        .map(|(country, rate)| BenchmarkRow {
            country: (*country).to_string(),
            max_rate: *rate,
            is_household: false,
        })
        .collect();
    rows.push(BenchmarkRow {
        country: HOUSEHOLD_LABEL.to_string(),
        max_rate: household_effective_rate,
        is_household: true,
    });
    // Stable: ties keep the reference countries ahead of the household
    rows.sort_by(|a, b| b.max_rate.cmp(&a.max_rate));

    let household_rank = rows
        .iter()
        .position(|r| r.is_household)
        .map(|i| i + 1)
        .unwrap_or(rows.len());
    let countries_above = rows
        .iter()
        .filter(|r| !r.is_household && r.max_rate > household_effective_rate)
        .count();

    if input.taxable_base.is_zero() {
        warnings.push("Taxable base is zero; effective rate reported as 0%.".into());
    }

    let output = GlobalBenchmarkOutput {
        household_effective_rate,
        rows,
        household_rank,
        countries_above,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "International comparison: household effective ITCMD rate against \
         top statutory inheritance-tax rates",
        &serde_json::json!({
            "itcmd_amount": input.itcmd_amount.to_string(),
            "taxable_base": input.taxable_base.to_string(),
            "reference_countries": REFERENCE_MAX_RATES.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
