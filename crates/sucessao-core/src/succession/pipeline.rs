use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::costs::breakdown::{aggregate_costs, CostBreakdown, FeeRates};
use crate::currency::format_brl;
use crate::error::SuccessionError;
use crate::insurance::leverage::{
    plan_insurance, validate_insurance_request, InsurancePlan, InsuranceRequest,
    DEFAULT_PAYMENT_YEARS, DEFAULT_PREMIUM_FACTOR,
};
use crate::itcmd::engine::{
    assess_itcmd, compare_with_baseline, marginal_itcmd, ProposedLawImpact, TaxConfig, TaxMode,
    CURRENT_BASELINE_RATE,
};
use crate::itcmd::rates::{suggest_rate, Jurisdiction, RegimeSelection};
use crate::patrimony::assets::{aggregate, validate_assets, AssetSnapshot};
use crate::patrimony::marital::{MaritalContext, TaxableBase};
use crate::session::rate_sync::{reconcile, RateSyncState, SyncOutcome};
use crate::types::{pct_of, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::SuccessionResult;

/// Upper bound accepted for the editable ITCMD field.
pub const MAX_ITCMD_RATE: Percent = dec!(20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fixed illustrative assumptions, overridable per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// Flat rate the proposed-law scenario is measured against.
    pub baseline_rate: Percent,
    pub premium_factor: Rate,
    pub default_years: u32,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            baseline_rate: CURRENT_BASELINE_RATE,
            premium_factor: DEFAULT_PREMIUM_FACTOR,
            default_years: DEFAULT_PAYMENT_YEARS,
        }
    }
}

/// Everything the UI layer supplies for one recomputation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessionInput {
    pub assets: AssetSnapshot,
    pub marital: MaritalContext,
    pub selection: RegimeSelection,
    pub fees: FeeRates,
    /// Advisor edit of the ITCMD field made during this pass.
    pub itcmd_rate_override: Option<Percent>,
    pub insurance: InsuranceRequest,
    pub assumptions: Assumptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessionOutput {
    pub gross_estate: Money,
    /// Pension balance left outside the inventory.
    pub excluded_pension: Money,
    pub co_ownership_share: Rate,
    /// Spousal meação: the part of the gross estate that is not inherited.
    pub spouse_share: Money,
    pub taxable_base: Money,
    pub jurisdiction: Jurisdiction,
    pub use_proposed_law: bool,
    pub suggested_rate: Percent,
    pub rate_sync: SyncOutcome,
    pub costs: CostBreakdown,
    /// Illustrative ITCMD under true marginal slicing of the proposed brackets.
    pub marginal_itcmd_amount: Money,
    pub marginal_effective_rate: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_law_impact: Option<ProposedLawImpact>,
    pub insurance: InsurancePlan,
}

/// Result of one pass plus the session state to feed into the next one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationPass {
    pub output: ComputationOutput<SuccessionOutput>,
    pub state: RateSyncState,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run one recomputation pass of a live session.
///
/// Stages run strictly in data-flow order: patrimony → taxable base → rate
/// field reconciliation → ITCMD → costs → insurance. An advisor edit carried
/// in `itcmd_rate_override` is applied to the session state before the
/// controller runs, so a toggle flip in the same pass still wins.
pub fn simulate_succession(
    input: &SuccessionInput,
    state: RateSyncState,
) -> SuccessionResult<SimulationPass> {
    let start = Instant::now();

    validate_succession_input(input)?;
    validate_rate_field("state.rate_field", state.rate_field)?;

    let base = resolve_taxable_base(input);
    let state = match input.itcmd_rate_override {
        Some(rate) => state.edit_rate(rate),
        None => state,
    };
    let (state, sync) = reconcile(state, &input.selection, base.taxable_base);

    let output = assemble(input, &base, state.rate_field, sync, start);
    Ok(SimulationPass { output, state })
}

/// Stateless single pass: the ITCMD line uses the advisor's override when
/// given, otherwise the current suggestion.
pub fn estimate_succession_cost(
    input: &SuccessionInput,
) -> SuccessionResult<ComputationOutput<SuccessionOutput>> {
    let start = Instant::now();

    validate_succession_input(input)?;

    let base = resolve_taxable_base(input);
    let rate = input.itcmd_rate_override.unwrap_or_else(|| {
        suggest_rate(
            input.selection.jurisdiction,
            input.selection.use_proposed_law,
            base.taxable_base,
        )
    });

    Ok(assemble(input, &base, rate, SyncOutcome::Retained, start))
}

fn resolve_taxable_base(input: &SuccessionInput) -> TaxableBase {
    let gross_estate = aggregate(&input.assets);
    let base = TaxableBase::new(gross_estate, input.marital.co_ownership_share());
    debug!(
        gross_estate = %base.gross_estate,
        taxable_base = %base.taxable_base,
        share = %base.co_ownership_share,
        "taxable base resolved"
    );
    base
}

fn assemble(
    input: &SuccessionInput,
    base: &TaxableBase,
    itcmd_rate: Percent,
    sync: SyncOutcome,
    start: Instant,
) -> ComputationOutput<SuccessionOutput> {
    let mut warnings: Vec<String> = Vec::new();
    let selection = &input.selection;

    let suggested_rate = suggest_rate(
        selection.jurisdiction,
        selection.use_proposed_law,
        base.taxable_base,
    );

    // Editable line: always flat over the whole base
    let config = TaxConfig {
        mode: TaxMode::Flat,
        co_ownership_share: base.co_ownership_share,
    };
    let itcmd = assess_itcmd(&config, base.gross_estate, itcmd_rate);
    let marginal_itcmd_amount = marginal_itcmd(base.taxable_base);
    debug!(rate = %itcmd.applied_rate, amount = %itcmd.amount, "itcmd assessed");

    let proposed_law_impact = if selection.use_proposed_law {
        let impact = compare_with_baseline(
            itcmd.amount,
            base.taxable_base,
            input.assumptions.baseline_rate,
        );
        warnings.push(impact.message());
        Some(impact)
    } else {
        None
    };

    let costs = aggregate_costs(
        itcmd.applied_rate,
        itcmd.amount,
        &input.fees,
        base.taxable_base,
        base.co_ownership_share,
    );
    debug!(total_cost = %costs.total_cost, ratio = %costs.cost_ratio, "costs aggregated");

    let insurance = plan_insurance(
        &input.insurance,
        costs.total_cost,
        input.assumptions.premium_factor,
        input.assumptions.default_years,
    );

    let excluded_pension = input.assets.excluded_pension();
    if excluded_pension > Decimal::ZERO {
        warnings.push(format!(
            "Private pension balance of {} is left out of the inventory; \
             VGBL plans usually bypass probate, but this depends on state law and plan type.",
            format_brl(excluded_pension)
        ));
    }

    if let SyncOutcome::Overwritten { suggested, .. } = sync {
        warnings.push(format!(
            "ITCMD rate reset to the suggested {}% after the regime toggle changed.",
            suggested
        ));
    } else if itcmd_rate != suggested_rate {
        warnings.push(format!(
            "ITCMD rate of {}% differs from the suggested {}% for {}.",
            itcmd_rate,
            suggested_rate,
            selection.jurisdiction.label()
        ));
    }

    let output = SuccessionOutput {
        gross_estate: base.gross_estate,
        excluded_pension,
        co_ownership_share: base.co_ownership_share,
        spouse_share: base.spouse_share(),
        taxable_base: base.taxable_base,
        jurisdiction: selection.jurisdiction,
        use_proposed_law: selection.use_proposed_law,
        suggested_rate,
        rate_sync: sync,
        costs,
        marginal_itcmd_amount,
        marginal_effective_rate: pct_of(marginal_itcmd_amount, base.taxable_base),
        proposed_law_impact,
        insurance,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Succession cost estimate: gross estate, spousal share, flat ITCMD line \
         with marginal comparison, legal and notarial fees, insurance leverage",
        &serde_json::json!({
            "jurisdiction": selection.jurisdiction.label(),
            "use_proposed_law": selection.use_proposed_law,
            "marital_regime": input.marital.regime.label(),
            "is_married": input.marital.is_married,
            "include_pension": input.assets.include_pension,
            "legal_fee_rate": input.fees.legal_fee_rate.to_string(),
            "notary_fee_rate": input.fees.notary_fee_rate.to_string(),
            "baseline_rate": input.assumptions.baseline_rate.to_string(),
            "premium_factor": input.assumptions.premium_factor.to_string(),
        }),
        warnings,
        elapsed,
        output,
    )
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_succession_input(input: &SuccessionInput) -> SuccessionResult<()> {
    validate_assets(&input.assets)?;
    if let Some(rate) = input.itcmd_rate_override {
        validate_rate_field("itcmd_rate_override", rate)?;
    }
    validate_fee_rate("fees.legal_fee_rate", input.fees.legal_fee_rate)?;
    validate_fee_rate("fees.notary_fee_rate", input.fees.notary_fee_rate)?;
    validate_fee_rate("assumptions.baseline_rate", input.assumptions.baseline_rate)?;
    if input.assumptions.premium_factor < Decimal::ZERO
        || input.assumptions.premium_factor > Decimal::ONE
    {
        return Err(SuccessionError::InvalidInput {
            field: "assumptions.premium_factor".into(),
            reason: "Premium factor must be between 0 and 1".into(),
        });
    }
    validate_insurance_request(&input.insurance)
}

/// The ITCMD field accepts 0–20%.
pub fn validate_rate_field(field: &str, rate: Percent) -> SuccessionResult<()> {
    check_range(field, rate, MAX_ITCMD_RATE)
}

fn validate_fee_rate(field: &str, rate: Percent) -> SuccessionResult<()> {
    check_range(field, rate, Decimal::ONE_HUNDRED)
}

fn check_range(field: &str, rate: Percent, max: Percent) -> SuccessionResult<()> {
    if rate < Decimal::ZERO || rate > max {
        return Err(SuccessionError::RateOutOfRange {
            field: field.into(),
            value: rate,
            min: Decimal::ZERO,
            max,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patrimony::marital::MaritalRegime;

    fn four_million_sp(use_proposed_law: bool) -> SuccessionInput {
        SuccessionInput {
            assets: AssetSnapshot {
                real_estate: dec!(2_500_000),
                financial_investments: dec!(1_200_000),
                vehicles: dec!(100_000),
                business_equity: dec!(150_000),
                other: dec!(50_000),
                ..Default::default()
            },
            selection: RegimeSelection {
                jurisdiction: Jurisdiction::SaoPaulo,
                use_proposed_law,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_estimate_current_law() {
        let out = estimate_succession_cost(&four_million_sp(false)).unwrap();
        let r = &out.result;
        assert_eq!(r.taxable_base, dec!(4_000_000));
        assert_eq!(r.suggested_rate, dec!(4));
        assert_eq!(r.costs.itcmd_amount, dec!(160_000));
        assert!(r.proposed_law_impact.is_none());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_estimate_proposed_law_warns_about_increase() {
        let out = estimate_succession_cost(&four_million_sp(true)).unwrap();
        let r = &out.result;
        assert_eq!(r.suggested_rate, dec!(6));
        assert_eq!(r.costs.itcmd_amount, dec!(240_000));
        let impact = r.proposed_law_impact.as_ref().unwrap();
        assert_eq!(impact.delta, dec!(80_000));
        assert!(impact.is_cost_increase());
        assert!(out.warnings.iter().any(|w| w.contains("R$ 80.000,00")));
    }

    #[test]
    fn test_override_is_used_and_flagged() {
        let mut input = four_million_sp(false);
        input.itcmd_rate_override = Some(dec!(5));
        let out = estimate_succession_cost(&input).unwrap();
        assert_eq!(out.result.costs.itcmd_amount, dec!(200_000));
        assert!(out.warnings.iter().any(|w| w.contains("differs from the suggested 4%")));
    }

    #[test]
    fn test_married_household_total() {
        let mut input = four_million_sp(false);
        input.assets = AssetSnapshot {
            real_estate: dec!(10_000_000),
            ..Default::default()
        };
        input.marital = MaritalContext::married(MaritalRegime::CommunityPartial);
        let out = estimate_succession_cost(&input).unwrap();
        let r = &out.result;
        assert_eq!(r.co_ownership_share, dec!(0.5));
        assert_eq!(r.taxable_base, dec!(5_000_000));
        assert_eq!(r.costs.household_total, Some(r.costs.total_cost * dec!(2)));
    }

    #[test]
    fn test_insurance_defaults_to_total_cost() {
        let out = estimate_succession_cost(&four_million_sp(false)).unwrap();
        let r = &out.result;
        assert_eq!(r.insurance.coverage, r.costs.total_cost);
        assert_eq!(r.insurance.annual_premium, r.costs.total_cost * dec!(0.04));
        assert_eq!(r.insurance.years, 10);
    }

    #[test]
    fn test_excluded_pension_notice() {
        let mut input = four_million_sp(false);
        input.assets.private_pension = dec!(500_000);
        let out = estimate_succession_cost(&input).unwrap();
        assert_eq!(out.result.gross_estate, dec!(4_000_000));
        assert_eq!(out.result.excluded_pension, dec!(500_000));
        assert!(out.warnings.iter().any(|w| w.contains("R$ 500.000,00")));
    }

    #[test]
    fn test_session_pass_keeps_edit_then_resets_on_flip() {
        let input = four_million_sp(false);
        let state = RateSyncState::initial(&input.selection).edit_rate(dec!(3.5));

        let pass = simulate_succession(&input, state).unwrap();
        assert_eq!(pass.state.rate_field, dec!(3.5));
        assert_eq!(pass.output.result.costs.itcmd_amount, dec!(140_000));

        let flipped = four_million_sp(true);
        let pass = simulate_succession(&flipped, pass.state).unwrap();
        assert!(pass.output.result.rate_sync.was_overwritten());
        assert_eq!(pass.state.rate_field, dec!(6));
        assert_eq!(pass.output.result.costs.itcmd_amount, dec!(240_000));
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let mut input = four_million_sp(false);
        input.itcmd_rate_override = Some(dec!(20.5));
        let err = estimate_succession_cost(&input).unwrap_err();
        match err {
            SuccessionError::RateOutOfRange { field, max, .. } => {
                assert_eq!(field, "itcmd_rate_override");
                assert_eq!(max, MAX_ITCMD_RATE);
            }
            other => panic!("Expected RateOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_asset_rejected() {
        let mut input = four_million_sp(false);
        input.assets.other = dec!(-10);
        assert!(estimate_succession_cost(&input).is_err());
    }

    #[test]
    fn test_empty_estate_costs_nothing() {
        let out = estimate_succession_cost(&SuccessionInput::default()).unwrap();
        let c = &out.result.costs;
        assert_eq!(c.total_cost, Decimal::ZERO);
        assert_eq!(c.cost_ratio, Decimal::ZERO);
        assert_eq!(out.result.insurance.leverage_multiple, Decimal::ZERO);
    }
}
