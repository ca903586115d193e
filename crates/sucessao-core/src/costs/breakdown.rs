use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{apply_pct, pct_of, Money, Percent, Rate};

pub const DEFAULT_LEGAL_FEE_RATE: Percent = dec!(6);
pub const DEFAULT_NOTARY_FEE_RATE: Percent = dec!(2);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Editable fee assumptions, independent of jurisdiction and regime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeRates {
    pub legal_fee_rate: Percent,
    pub notary_fee_rate: Percent,
}

impl Default for FeeRates {
    fn default() -> Self {
        Self {
            legal_fee_rate: DEFAULT_LEGAL_FEE_RATE,
            notary_fee_rate: DEFAULT_NOTARY_FEE_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub itcmd_rate: Percent,
    pub itcmd_amount: Money,
    pub legal_fee_rate: Percent,
    pub legal_fee_amount: Money,
    pub notary_fee_rate: Percent,
    pub notary_fee_amount: Money,
    pub total_cost: Money,
    /// Total cost as a percentage of the taxable base.
    pub cost_ratio: Percent,
    /// Cost for both spouses' halves; only present when a spousal share exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household_total: Option<Money>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sum the ITCMD line with legal and notarial fees over the taxable base.
pub fn aggregate_costs(
    itcmd_rate: Percent,
    itcmd_amount: Money,
    fees: &FeeRates,
    taxable_base: Money,
    co_ownership_share: Rate,
) -> CostBreakdown {
    let legal_fee_amount = apply_pct(taxable_base, fees.legal_fee_rate);
    let notary_fee_amount = apply_pct(taxable_base, fees.notary_fee_rate);
    let total_cost = itcmd_amount + legal_fee_amount + notary_fee_amount;

    CostBreakdown {
        itcmd_rate,
        itcmd_amount,
        legal_fee_rate: fees.legal_fee_rate,
        legal_fee_amount,
        notary_fee_rate: fees.notary_fee_rate,
        notary_fee_amount,
        total_cost,
        cost_ratio: pct_of(total_cost, taxable_base),
        household_total: household_total(total_cost, co_ownership_share),
    }
}

/// The same total applies symmetrically to the spouse's half.
pub fn household_total(total_cost: Money, co_ownership_share: Rate) -> Option<Money> {
    if co_ownership_share > Decimal::ZERO {
        Some(total_cost * dec!(2))
    } else {
        None
    }
}
