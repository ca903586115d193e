use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SuccessionError;
use crate::SuccessionResult;

/// All monetary values (BRL). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Fractions expressed as decimals (0.5 = 50%), e.g. the co-ownership share.
pub type Rate = Decimal;

/// Percentages as entered by the advisor (4 = 4%). Every editable rate field
/// in this crate (ITCMD, legal fees, notary fees) is a `Percent`.
pub type Percent = Decimal;

/// Multiples (e.g., 2.5x coverage per premium paid)
pub type Multiple = Decimal;

/// Largest amount accepted for any monetary input (R$ 1 quadrillion).
pub const MAX_MONEY: Money = dec!(1_000_000_000_000_000);

/// Sensitivity variable specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityVariable {
    pub name: String,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Percentage of `part` over `whole`, 0 when `whole` is not positive.
/// Saturates when the ratio does not fit a `Decimal`.
pub fn pct_of(part: Money, whole: Money) -> Percent {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if part < Decimal::ZERO {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// `base * pct / 100`.
pub fn apply_pct(base: Money, pct: Percent) -> Money {
    base * pct / Decimal::ONE_HUNDRED
}

/// Boundary check for a monetary input: `0 <= amount <= MAX_MONEY`.
pub fn validate_amount(field: &str, amount: Money) -> SuccessionResult<()> {
    if amount < Decimal::ZERO {
        return Err(SuccessionError::InvalidInput {
            field: field.into(),
            reason: "Amount must be non-negative".into(),
        });
    }
    if amount > MAX_MONEY {
        return Err(SuccessionError::InvalidInput {
            field: field.into(),
            reason: format!("Amount must not exceed {MAX_MONEY}"),
        });
    }
    Ok(())
}
