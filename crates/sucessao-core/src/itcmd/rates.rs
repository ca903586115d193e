use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Jurisdictions and regime toggle
// ---------------------------------------------------------------------------

/// States with a known ITCMD default; everything else falls under `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[default]
    SaoPaulo,
    RioDeJaneiro,
    MinasGerais,
    Other,
}

impl Jurisdiction {
    /// Current-law flat rate for the state, in percent.
    pub fn default_rate(&self) -> Percent {
        match self {
            Jurisdiction::MinasGerais => dec!(5),
            Jurisdiction::SaoPaulo | Jurisdiction::RioDeJaneiro | Jurisdiction::Other => dec!(4),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Jurisdiction::SaoPaulo => "São Paulo (SP)",
            Jurisdiction::RioDeJaneiro => "Rio de Janeiro (RJ)",
            Jurisdiction::MinasGerais => "Minas Gerais (MG)",
            Jurisdiction::Other => "Outros",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeSelection {
    pub jurisdiction: Jurisdiction,
    /// Simulate the proposed progressive law (PL 7/2024, SP) instead of the
    /// state's current flat rate.
    pub use_proposed_law: bool,
}

// ---------------------------------------------------------------------------
// Proposed-law bracket schedule
// ---------------------------------------------------------------------------

/// One bracket of the proposed schedule. `upper_bound` is inclusive; the top
/// bracket is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItcmdBracket {
    pub upper_bound: Option<Money>,
    pub rate: Percent,
}

pub static PROPOSED_LAW_BRACKETS: [ItcmdBracket; 4] = [
    ItcmdBracket {
        upper_bound: Some(dec!(353_600.00)),
        rate: dec!(2),
    },
    ItcmdBracket {
        upper_bound: Some(dec!(3_005_600.00)),
        rate: dec!(4),
    },
    ItcmdBracket {
        upper_bound: Some(dec!(9_900_800.00)),
        rate: dec!(6),
    },
    ItcmdBracket {
        upper_bound: None,
        rate: dec!(8),
    },
];

/// The bracket the whole base falls into.
pub fn bracket_for(taxable_base: Money) -> ItcmdBracket {
    let top = PROPOSED_LAW_BRACKETS[PROPOSED_LAW_BRACKETS.len() - 1];
    PROPOSED_LAW_BRACKETS
        .iter()
        .find(|b| b.upper_bound.map_or(true, |upper| taxable_base <= upper))
        .copied()
        .unwrap_or(top)
}

// ---------------------------------------------------------------------------
// Rate resolution
// ---------------------------------------------------------------------------

/// Suggested ITCMD rate (percent) for the editable rate field.
///
/// Under the proposed law the entire base is taxed at the rate of the single
/// bracket it falls into (flat-bracket, not marginal). Otherwise the state's
/// flat default applies.
pub fn suggest_rate(
    jurisdiction: Jurisdiction,
    use_proposed_law: bool,
    taxable_base: Money,
) -> Percent {
    if use_proposed_law {
        bracket_for(taxable_base).rate
    } else {
        jurisdiction.default_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_state_defaults() {
        assert_eq!(suggest_rate(Jurisdiction::SaoPaulo, false, dec!(1_000_000)), dec!(4));
        assert_eq!(suggest_rate(Jurisdiction::RioDeJaneiro, false, dec!(1_000_000)), dec!(4));
        assert_eq!(suggest_rate(Jurisdiction::MinasGerais, false, dec!(1_000_000)), dec!(5));
        assert_eq!(suggest_rate(Jurisdiction::Other, false, dec!(1_000_000)), dec!(4));
    }

    #[test]
    fn test_state_default_ignores_base() {
        assert_eq!(suggest_rate(Jurisdiction::MinasGerais, false, dec!(50_000_000)), dec!(5));
        assert_eq!(suggest_rate(Jurisdiction::SaoPaulo, false, Decimal::ZERO), dec!(4));
    }

    #[test]
    fn test_flat_bracket_boundaries_are_inclusive() {
        let cases = [
            (Decimal::ZERO, dec!(2)),
            (dec!(353_600.00), dec!(2)),
            (dec!(353_600.01), dec!(4)),
            (dec!(3_005_600.00), dec!(4)),
            (dec!(3_005_600.01), dec!(6)),
            (dec!(9_900_800.00), dec!(6)),
            (dec!(9_900_800.01), dec!(8)),
            (dec!(100_000_000), dec!(8)),
        ];
        for (base, expected) in cases {
            assert_eq!(
                suggest_rate(Jurisdiction::SaoPaulo, true, base),
                expected,
                "base {base}"
            );
        }
    }

    #[test]
    fn test_proposed_law_overrides_state_default() {
        // MG default is 5, but the proposed schedule decides once toggled
        assert_eq!(suggest_rate(Jurisdiction::MinasGerais, true, dec!(4_000_000)), dec!(6));
    }

    #[test]
    fn test_schedule_is_ascending() {
        for pair in PROPOSED_LAW_BRACKETS.windows(2) {
            assert!(pair[0].rate < pair[1].rate);
            if let (Some(a), Some(b)) = (pair[0].upper_bound, pair[1].upper_bound) {
                assert!(a < b);
            }
        }
    }
}
