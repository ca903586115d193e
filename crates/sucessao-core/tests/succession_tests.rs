use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sucessao_core::costs::breakdown::{aggregate_costs, CostBreakdown, FeeRates};
use sucessao_core::insurance::leverage::{compute_leverage, InsuranceRequest};
use sucessao_core::itcmd::rates::{Jurisdiction, RegimeSelection};
use sucessao_core::patrimony::assets::AssetSnapshot;
use sucessao_core::patrimony::marital::{MaritalContext, MaritalRegime};
use sucessao_core::succession::pipeline::{estimate_succession_cost, SuccessionInput};
use sucessao_core::types::MAX_MONEY;
use sucessao_core::SuccessionError;

fn estate(total_real_estate: Decimal, financial: Decimal) -> AssetSnapshot {
    AssetSnapshot {
        real_estate: total_real_estate,
        financial_investments: financial,
        ..Default::default()
    }
}

fn sao_paulo(use_proposed_law: bool) -> RegimeSelection {
    RegimeSelection {
        jurisdiction: Jurisdiction::SaoPaulo,
        use_proposed_law,
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_unmarried_sao_paulo_current_law() {
    let input = SuccessionInput {
        assets: estate(dec!(3_000_000), dec!(1_000_000)),
        marital: MaritalContext::single(),
        selection: sao_paulo(false),
        ..Default::default()
    };
    let out = estimate_succession_cost(&input).unwrap().result;

    assert_eq!(out.suggested_rate, dec!(4));
    assert_eq!(out.taxable_base, dec!(4_000_000));
    assert_eq!(out.costs.itcmd_amount, dec!(160_000));
    assert!(out.proposed_law_impact.is_none());
}

#[test]
fn test_unmarried_sao_paulo_proposed_law() {
    let input = SuccessionInput {
        assets: estate(dec!(3_000_000), dec!(1_000_000)),
        selection: sao_paulo(true),
        ..Default::default()
    };
    let output = estimate_succession_cost(&input).unwrap();
    let out = &output.result;

    // 4M falls in the 3,005,600.01 – 9,900,800.00 bracket
    assert_eq!(out.suggested_rate, dec!(6));
    assert_eq!(out.costs.itcmd_amount, dec!(240_000));

    let impact = out.proposed_law_impact.as_ref().unwrap();
    assert_eq!(impact.baseline_amount, dec!(160_000));
    assert_eq!(impact.delta, dec!(80_000));
    assert!(impact.is_cost_increase());
    assert!(output
        .warnings
        .iter()
        .any(|w| w.contains("increase") && w.contains("R$ 80.000,00")));
}

#[test]
fn test_proposed_law_cheaper_surfaces_neutral_message() {
    let input = SuccessionInput {
        assets: estate(dec!(300_000), Decimal::ZERO),
        selection: sao_paulo(true),
        ..Default::default()
    };
    let output = estimate_succession_cost(&input).unwrap();
    let impact = output.result.proposed_law_impact.as_ref().unwrap();

    assert_eq!(output.result.suggested_rate, dec!(2));
    assert!(!impact.is_cost_increase());
    assert!(output.warnings.iter().any(|w| w.contains("reduce")));
}

#[test]
fn test_married_community_partial_halves_the_base() {
    let input = SuccessionInput {
        assets: estate(dec!(8_000_000), dec!(2_000_000)),
        marital: MaritalContext::married(MaritalRegime::CommunityPartial),
        selection: sao_paulo(false),
        ..Default::default()
    };
    let out = estimate_succession_cost(&input).unwrap().result;

    assert_eq!(out.gross_estate, dec!(10_000_000));
    assert_eq!(out.co_ownership_share, dec!(0.5));
    assert_eq!(out.spouse_share, dec!(5_000_000));
    assert_eq!(out.taxable_base, dec!(5_000_000));

    let expected = aggregate_costs(
        dec!(4),
        dec!(200_000),
        &FeeRates::default(),
        dec!(5_000_000),
        dec!(0.5),
    );
    assert_eq!(out.costs, expected);
    assert_eq!(out.costs.household_total, Some(dec!(1_200_000)));
}

#[test]
fn test_total_separation_keeps_full_base() {
    let input = SuccessionInput {
        assets: estate(dec!(8_000_000), dec!(2_000_000)),
        marital: MaritalContext::married(MaritalRegime::TotalSeparation),
        ..Default::default()
    };
    let out = estimate_succession_cost(&input).unwrap().result;
    assert_eq!(out.taxable_base, out.gross_estate);
    assert_eq!(out.costs.household_total, None);
}

#[test]
fn test_minas_gerais_default_rate() {
    let input = SuccessionInput {
        assets: estate(dec!(1_000_000), Decimal::ZERO),
        selection: RegimeSelection {
            jurisdiction: Jurisdiction::MinasGerais,
            use_proposed_law: false,
        },
        ..Default::default()
    };
    let out = estimate_succession_cost(&input).unwrap().result;
    assert_eq!(out.costs.itcmd_rate, dec!(5));
    assert_eq!(out.costs.itcmd_amount, dec!(50_000));
}

#[test]
fn test_insurance_reference_plan() {
    let plan = compute_leverage(dec!(300_000), dec!(12_000), 10);
    assert_eq!(plan.total_premium_outlay, dec!(120_000));
    assert_eq!(plan.leverage_multiple, dec!(2.5));
    assert_eq!(plan.discount_pct, dec!(60));
}

#[test]
fn test_degenerate_base_yields_zero_cost_breakdown() {
    let out = estimate_succession_cost(&SuccessionInput::default())
        .unwrap()
        .result;
    assert_eq!(
        out.costs,
        CostBreakdown {
            itcmd_rate: dec!(4),
            itcmd_amount: Decimal::ZERO,
            legal_fee_rate: dec!(6),
            legal_fee_amount: Decimal::ZERO,
            notary_fee_rate: dec!(2),
            notary_fee_amount: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            cost_ratio: Decimal::ZERO,
            household_total: None,
        }
    );
}

#[test]
fn test_marginal_comparison_is_reported_alongside() {
    let input = SuccessionInput {
        assets: estate(dec!(500_000), Decimal::ZERO),
        selection: sao_paulo(true),
        ..Default::default()
    };
    let out = estimate_succession_cost(&input).unwrap().result;
    // Flat-bracket: whole 500k at 4%; marginal: 353,600 at 2% + rest at 4%
    assert_eq!(out.costs.itcmd_amount, dec!(20_000));
    assert_eq!(out.marginal_itcmd_amount, dec!(12_928));
}

#[test]
fn test_fee_rate_above_hundred_rejected() {
    let input = SuccessionInput {
        fees: FeeRates {
            legal_fee_rate: dec!(101),
            notary_fee_rate: dec!(2),
        },
        ..Default::default()
    };
    match estimate_succession_cost(&input) {
        Err(SuccessionError::RateOutOfRange { field, value, .. }) => {
            assert_eq!(field, "fees.legal_fee_rate");
            assert_eq!(value, dec!(101));
        }
        other => panic!("Expected RateOutOfRange, got {other:?}"),
    }
}

#[test]
fn test_input_deserialises_with_defaults() {
    let json = serde_json::json!({
        "assets": { "real_estate": "4000000" },
        "selection": { "jurisdiction": "SaoPaulo", "use_proposed_law": true }
    });
    let input: SuccessionInput = serde_json::from_value(json).unwrap();
    assert_eq!(input.fees, FeeRates::default());
    assert_eq!(input.assumptions.default_years, 10);

    let out = estimate_succession_cost(&input).unwrap().result;
    assert_eq!(out.costs.itcmd_amount, dec!(240_000));
}

#[test]
fn test_vanishing_premium_does_not_abort_the_pass() {
    let input = SuccessionInput {
        assets: estate(dec!(3_000_000), dec!(1_000_000)),
        insurance: InsuranceRequest {
            coverage_override: Some(dec!(1_000_000_000)),
            annual_premium: Some(Decimal::new(1, 28)),
            years: Some(1),
        },
        ..Default::default()
    };
    let out = estimate_succession_cost(&input).unwrap().result;
    assert_eq!(out.insurance.leverage_multiple, Decimal::MAX);
    assert_eq!(out.costs.total_cost, dec!(480_000));
}

#[test]
fn test_asset_above_ceiling_rejected_before_aggregation() {
    let huge = Decimal::MAX / dec!(3);
    let input = SuccessionInput {
        assets: AssetSnapshot {
            real_estate: huge,
            financial_investments: huge,
            vehicles: huge,
            business_equity: huge,
            ..Default::default()
        },
        ..Default::default()
    };
    match estimate_succession_cost(&input) {
        Err(SuccessionError::InvalidInput { field, .. }) => {
            assert_eq!(field, "assets.real_estate");
        }
        other => panic!("Expected InvalidInput, got {other:?}"),
    }

    let at_ceiling = SuccessionInput {
        assets: estate(MAX_MONEY, MAX_MONEY),
        ..Default::default()
    };
    let out = estimate_succession_cost(&at_ceiling).unwrap().result;
    assert_eq!(out.gross_estate, MAX_MONEY * dec!(2));
}
