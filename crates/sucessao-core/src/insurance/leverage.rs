use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{validate_amount, Money, Multiple, Percent, Rate};
use crate::SuccessionResult;

/// Illustrative annual premium as a fraction of coverage. Not actuarial.
pub const DEFAULT_PREMIUM_FACTOR: Rate = dec!(0.04);

/// Payment horizon used when the advisor leaves it blank.
pub const DEFAULT_PAYMENT_YEARS: u32 = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Optional overrides for the funding strategy. Anything left `None` is
/// derived from the succession cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceRequest {
    pub coverage_override: Option<Money>,
    pub annual_premium: Option<Money>,
    pub years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePlan {
    pub coverage: Money,
    pub annual_premium: Money,
    pub years: u32,
    pub total_premium_outlay: Money,
    /// Coverage per unit of premium paid; 0 when nothing is paid.
    pub leverage_multiple: Multiple,
    /// Saving versus paying the cost directly, in percent of coverage.
    pub discount_pct: Percent,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Default premium suggestion: `coverage * factor`.
pub fn suggest_annual_premium(coverage: Money, premium_factor: Rate) -> Money {
    coverage * premium_factor
}

/// Express the funding strategy as outlay, leverage multiple and discount.
///
/// Degenerate inputs resolve to zero rather than an error: the multiple is 0
/// when the outlay is 0, and the discount is 0 when either the coverage or
/// the outlay is 0. Results too large for a `Decimal` saturate (a vanishing
/// premium gives `Decimal::MAX` as the multiple).
pub fn compute_leverage(coverage: Money, annual_premium: Money, years: u32) -> InsurancePlan {
    let total_premium_outlay = annual_premium.saturating_mul(Decimal::from(years));

    let leverage_multiple = if total_premium_outlay.is_zero() {
        Decimal::ZERO
    } else {
        coverage
            .checked_div(total_premium_outlay)
            .unwrap_or(Decimal::MAX)
    };

    let discount_pct = if total_premium_outlay.is_zero() || coverage <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        // Only an outlay far above the coverage can overflow, so saturate low.
        coverage
            .saturating_sub(total_premium_outlay)
            .checked_div(coverage)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MIN)
    };

    InsurancePlan {
        coverage,
        annual_premium,
        years,
        total_premium_outlay,
        leverage_multiple,
        discount_pct,
    }
}

/// Resolve a request against the succession cost it is meant to fund.
pub fn plan_insurance(
    request: &InsuranceRequest,
    total_cost: Money,
    premium_factor: Rate,
    default_years: u32,
) -> InsurancePlan {
    let coverage = request.coverage_override.unwrap_or(total_cost);
    let annual_premium = request
        .annual_premium
        .unwrap_or_else(|| suggest_annual_premium(coverage, premium_factor));
    let years = request.years.unwrap_or(default_years);

    compute_leverage(coverage, annual_premium, years)
}

pub fn validate_insurance_request(request: &InsuranceRequest) -> SuccessionResult<()> {
    if let Some(coverage) = request.coverage_override {
        validate_amount("insurance.coverage_override", coverage)?;
    }
    if let Some(premium) = request.annual_premium {
        validate_amount("insurance.annual_premium", premium)?;
    }
    Ok(())
}

/// `compute_leverage` behind the same boundary checks as the pipeline.
pub fn checked_leverage(
    coverage: Money,
    annual_premium: Money,
    years: u32,
) -> SuccessionResult<InsurancePlan> {
    validate_insurance_request(&InsuranceRequest {
        coverage_override: Some(coverage),
        annual_premium: Some(annual_premium),
        years: Some(years),
    })?;
    Ok(compute_leverage(coverage, annual_premium, years))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
