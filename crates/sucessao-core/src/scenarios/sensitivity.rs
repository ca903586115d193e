use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::costs::breakdown::{aggregate_costs, FeeRates};
use crate::error::SuccessionError;
use crate::itcmd::engine::flat_itcmd;
use crate::types::*;
use crate::SuccessionResult;

/// Hard cap on grid cells so a typo in `step` cannot explode the sweep.
const MAX_GRID_CELLS: usize = 10_000;

/// Input for the ITCMD-rate × legal-fee what-if grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSensitivityInput {
    pub taxable_base: Money,
    /// Rows: ITCMD rate sweep, in percent
    pub itcmd_rate: SensitivityVariable,
    /// Columns: legal fee sweep, in percent
    pub legal_fee_rate: SensitivityVariable,
    pub notary_fee_rate: Percent,
    /// Rates of the scenario currently on screen, used to locate the base case
    pub base_itcmd_rate: Percent,
    pub base_legal_fee_rate: Percent,
}

/// Output of the what-if grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSensitivityOutput {
    pub itcmd_rates: Vec<Percent>,
    pub legal_fee_rates: Vec<Percent>,
    /// Matrix[i][j] = total cost at itcmd_rates[i], legal_fee_rates[j]
    pub matrix: Vec<Vec<Money>>,
    pub base_case_value: Money,
    /// Position of the base case in the matrix (row, col)
    pub base_case_position: (usize, usize),
    pub min_total_cost: Money,
    pub max_total_cost: Money,
}

/// Generate the sweep values for a sensitivity variable from min to max with step.
fn generate_sweep_values(var: &SensitivityVariable) -> SuccessionResult<Vec<Decimal>> {
    if var.step <= Decimal::ZERO {
        return Err(SuccessionError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Step must be positive".into(),
        });
    }
    if var.min > var.max {
        return Err(SuccessionError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Min must be <= max".into(),
        });
    }
    if var.min < Decimal::ZERO || var.max > Decimal::ONE_HUNDRED {
        return Err(SuccessionError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Rates must be between 0 and 100 percent".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = var.min;
    while current <= var.max {
        values.push(current);
        if values.len() > MAX_GRID_CELLS {
            return Err(SuccessionError::InvalidInput {
                field: format!("variable:{}", var.name),
                reason: format!("Sweep exceeds {MAX_GRID_CELLS} values"),
            });
        }
        current += var.step;
    }
    // Ensure max is included if step doesn't land exactly on it
    if let Some(&last) = values.last() {
        if last < var.max {
            values.push(var.max);
        }
    }

    Ok(values)
}

/// Find the closest index to a target value in a sorted list.
fn closest_index(values: &[Decimal], target: Decimal) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| (**v - target).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Total succession cost for every (ITCMD rate, legal fee) pair.
pub fn sweep_cost_sensitivity(
    input: &CostSensitivityInput,
) -> SuccessionResult<ComputationOutput<CostSensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_amount("taxable_base", input.taxable_base)?;
    if input.notary_fee_rate < Decimal::ZERO || input.notary_fee_rate > Decimal::ONE_HUNDRED {
        return Err(SuccessionError::RateOutOfRange {
            field: "notary_fee_rate".into(),
            value: input.notary_fee_rate,
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    let itcmd_rates = generate_sweep_values(&input.itcmd_rate)?;
    let legal_fee_rates = generate_sweep_values(&input.legal_fee_rate)?;
    if itcmd_rates.len() * legal_fee_rates.len() > MAX_GRID_CELLS {
        return Err(SuccessionError::InvalidInput {
            field: "grid".into(),
            reason: format!("Grid exceeds {MAX_GRID_CELLS} cells"),
        });
    }

    let matrix: Vec<Vec<Money>> = itcmd_rates
        .iter()
        .map(|itcmd_rate| {
            legal_fee_rates
                .iter()
                .map(|legal_fee_rate| {
                    let fees = FeeRates {
                        legal_fee_rate: *legal_fee_rate,
                        notary_fee_rate: input.notary_fee_rate,
                    };
                    let itcmd_amount = flat_itcmd(input.taxable_base, *itcmd_rate);
                    aggregate_costs(
                        *itcmd_rate,
                        itcmd_amount,
                        &fees,
                        input.taxable_base,
                        Decimal::ZERO,
                    )
                    .total_cost
                })
                .collect()
        })
        .collect();

    let base_row = closest_index(&itcmd_rates, input.base_itcmd_rate);
    let base_col = closest_index(&legal_fee_rates, input.base_legal_fee_rate);
    if itcmd_rates[base_row] != input.base_itcmd_rate
        || legal_fee_rates[base_col] != input.base_legal_fee_rate
    {
        warnings.push(format!(
            "Base case ({}%, {}%) is not on the grid; nearest cell ({}%, {}%) used.",
            input.base_itcmd_rate,
            input.base_legal_fee_rate,
            itcmd_rates[base_row],
            legal_fee_rates[base_col]
        ));
    }
    let base_case_value = matrix[base_row][base_col];

    // Costs grow with both rates, so the corners bound the grid
    let min_total_cost = matrix[0][0];
    let max_total_cost = matrix[itcmd_rates.len() - 1][legal_fee_rates.len() - 1];

    let output = CostSensitivityOutput {
        itcmd_rates,
        legal_fee_rates,
        matrix,
        base_case_value,
        base_case_position: (base_row, base_col),
        min_total_cost,
        max_total_cost,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "2-Way Sensitivity: total succession cost over ITCMD rate and legal fee rate",
        &serde_json::json!({
            "taxable_base": input.taxable_base.to_string(),
            "itcmd_rate": input.itcmd_rate.name,
            "legal_fee_rate": input.legal_fee_rate.name,
            "notary_fee_rate": input.notary_fee_rate.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> CostSensitivityInput {
        CostSensitivityInput {
            taxable_base: dec!(4_000_000),
            itcmd_rate: SensitivityVariable {
                name: "ITCMD".into(),
                min: dec!(2),
                max: dec!(8),
                step: dec!(2),
            },
            legal_fee_rate: SensitivityVariable {
                name: "Legal fees".into(),
                min: dec!(4),
                max: dec!(8),
                step: dec!(1),
            },
            notary_fee_rate: dec!(2),
            base_itcmd_rate: dec!(4),
            base_legal_fee_rate: dec!(6),
        }
    }

    #[test]
    fn test_grid_dimensions() {
        let out = sweep_cost_sensitivity(&sample_input()).unwrap().result;
        // ITCMD: 2, 4, 6, 8
        assert_eq!(out.itcmd_rates.len(), 4);
        // Legal: 4, 5, 6, 7, 8
        assert_eq!(out.legal_fee_rates.len(), 5);
        assert_eq!(out.matrix.len(), 4);
        assert_eq!(out.matrix[0].len(), 5);
    }

    #[test]
    fn test_base_case_matches_default_scenario() {
        let result = sweep_cost_sensitivity(&sample_input()).unwrap();
        let out = &result.result;
        assert_eq!(out.base_case_position, (1, 2));
        // 4% + 6% + 2% of 4M
        assert_eq!(out.base_case_value, dec!(480_000));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_corners_bound_the_grid() {
        let out = sweep_cost_sensitivity(&sample_input()).unwrap().result;
        // 2 + 4 + 2 = 8% ; 8 + 8 + 2 = 18%
        assert_eq!(out.min_total_cost, dec!(320_000));
        assert_eq!(out.max_total_cost, dec!(720_000));
        for row in &out.matrix {
            for cell in row {
                assert!(*cell >= out.min_total_cost && *cell <= out.max_total_cost);
            }
        }
    }

    #[test]
    fn test_off_grid_base_case_warns() {
        let mut input = sample_input();
        input.base_itcmd_rate = dec!(5);
        let result = sweep_cost_sensitivity(&input).unwrap();
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_max_included_when_step_overshoots() {
        let mut input = sample_input();
        input.itcmd_rate.max = dec!(7);
        let out = sweep_cost_sensitivity(&input).unwrap().result;
        assert_eq!(out.itcmd_rates, vec![dec!(2), dec!(4), dec!(6), dec!(7)]);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let mut input = sample_input();
        input.legal_fee_rate.step = Decimal::ZERO;
        let err = sweep_cost_sensitivity(&input).unwrap_err();
        match err {
            SuccessionError::InvalidInput { field, .. } => {
                assert_eq!(field, "variable:Legal fees");
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_min_above_max_rejected() {
        let mut input = sample_input();
        input.itcmd_rate.min = dec!(9);
        assert!(sweep_cost_sensitivity(&input).is_err());
    }

    #[test]
    fn test_sweep_beyond_hundred_percent_rejected() {
        let mut input = sample_input();
        input.itcmd_rate.max = Decimal::MAX;
        input.itcmd_rate.step = Decimal::MAX / dec!(2);
        assert!(sweep_cost_sensitivity(&input).is_err());

        let mut input = sample_input();
        input.notary_fee_rate = dec!(1_000_000);
        match sweep_cost_sensitivity(&input).unwrap_err() {
            SuccessionError::RateOutOfRange { field, .. } => assert_eq!(field, "notary_fee_rate"),
            other => panic!("Expected RateOutOfRange, got {other:?}"),
        }
    }
}
