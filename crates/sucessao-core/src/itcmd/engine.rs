use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::currency::format_brl;
use crate::itcmd::rates::PROPOSED_LAW_BRACKETS;
use crate::patrimony::marital::apply_marital;
use crate::types::{apply_pct, pct_of, Money, Percent, Rate};

/// Flat rate the proposed-law scenario is compared against.
pub const CURRENT_BASELINE_RATE: Percent = dec!(4);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the ITCMD amount is derived from the taxable base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxMode {
    /// Single percentage over the whole base.
    #[default]
    Flat,
    /// Each slice of the base taxed at its own bracket rate.
    Progressive,
}

/// Engine configuration: one parameterized path for every variant (flat or
/// progressive, with or without the spousal share).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub mode: TaxMode,
    pub co_ownership_share: Rate,
}

/// Portion of the base that falls inside one bracket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketSlice {
    pub lower: Money,
    pub upper: Money,
    pub rate: Percent,
    pub taxed_amount: Money,
    pub tax: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItcmdAssessment {
    pub mode: TaxMode,
    pub gross_estate: Money,
    pub taxable_base: Money,
    /// Rate applied in flat mode; the effective rate in progressive mode.
    pub applied_rate: Percent,
    pub amount: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactDirection {
    Increase,
    Unchanged,
    Decrease,
}

/// Incremental ITCMD of the current scenario against the flat baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedLawImpact {
    pub baseline_rate: Percent,
    pub baseline_amount: Money,
    pub current_amount: Money,
    pub delta: Money,
    pub direction: ImpactDirection,
}

impl ProposedLawImpact {
    pub fn is_cost_increase(&self) -> bool {
        self.direction == ImpactDirection::Increase
    }

    pub fn message(&self) -> String {
        match self.direction {
            ImpactDirection::Increase => format!(
                "The proposed law would increase the ITCMD cost by {} versus the current {}% flat rate.",
                format_brl(self.delta),
                self.baseline_rate
            ),
            ImpactDirection::Unchanged => format!(
                "The proposed law leaves the ITCMD cost unchanged versus the current {}% flat rate.",
                self.baseline_rate
            ),
            ImpactDirection::Decrease => format!(
                "The proposed law would reduce the ITCMD cost by {} versus the current {}% flat rate.",
                format_brl(self.delta.abs()),
                self.baseline_rate
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// `taxable_base * rate / 100`.
pub fn flat_itcmd(taxable_base: Money, rate: Percent) -> Money {
    apply_pct(taxable_base, rate)
}

/// Marginal breakdown of the base over the proposed-law brackets. Empty for a
/// non-positive base.
pub fn marginal_slices(taxable_base: Money) -> Vec<BracketSlice> {
    let mut slices = Vec::new();
    let mut lower = Decimal::ZERO;

    for bracket in PROPOSED_LAW_BRACKETS.iter() {
        if taxable_base <= lower {
            break;
        }
        let ceiling = bracket
            .upper_bound
            .map_or(taxable_base, |upper| upper.min(taxable_base));
        let taxed_amount = ceiling - lower;
        slices.push(BracketSlice {
            lower,
            upper: ceiling,
            rate: bracket.rate,
            taxed_amount,
            tax: flat_itcmd(taxed_amount, bracket.rate),
        });

        match bracket.upper_bound {
            Some(upper) => lower = upper,
            None => break,
        }
    }

    slices
}

/// True marginal taxation: the sum of each slice taxed at its bracket's rate.
pub fn marginal_itcmd(taxable_base: Money) -> Money {
    marginal_slices(taxable_base).iter().map(|s| s.tax).sum()
}

/// Run the engine for one configuration. `rate` is only read in flat mode.
pub fn assess_itcmd(config: &TaxConfig, gross_estate: Money, rate: Percent) -> ItcmdAssessment {
    let taxable_base = apply_marital(gross_estate, config.co_ownership_share);

    let (applied_rate, amount) = match config.mode {
        TaxMode::Flat => (rate, flat_itcmd(taxable_base, rate)),
        TaxMode::Progressive => {
            let amount = marginal_itcmd(taxable_base);
            (pct_of(amount, taxable_base), amount)
        }
    };

    ItcmdAssessment {
        mode: config.mode,
        gross_estate,
        taxable_base,
        applied_rate,
        amount,
    }
}

/// `delta = current_amount - taxable_base * baseline_rate / 100`.
pub fn compare_with_baseline(
    current_amount: Money,
    taxable_base: Money,
    baseline_rate: Percent,
) -> ProposedLawImpact {
    let baseline_amount = flat_itcmd(taxable_base, baseline_rate);
    let delta = current_amount - baseline_amount;
    let direction = if delta > Decimal::ZERO {
        ImpactDirection::Increase
    } else if delta < Decimal::ZERO {
        ImpactDirection::Decrease
    } else {
        ImpactDirection::Unchanged
    };

    ProposedLawImpact {
        baseline_rate,
        baseline_amount,
        current_amount,
        delta,
        direction,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
