//! Edge-triggered synchronisation of the editable ITCMD rate field.
//!
//! The rate field is "editable but defaulted": the advisor may overwrite it
//! at any time, and the engine only replaces it with a fresh suggestion when
//! the proposed-law toggle actually flips. Every other recomputation pass
//! (asset edits, fee edits, repeated renders) leaves the field alone.
//!
//! The state lives in an explicit [`RateSyncState`] value that the caller
//! threads from one pass to the next, so independent sessions never share
//! anything.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::itcmd::rates::{suggest_rate, RegimeSelection};
use crate::types::{Money, Percent};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSyncState {
    /// Toggle value seen on the previous pass.
    pub last_toggle_value: bool,
    /// Current content of the editable ITCMD field, in percent.
    pub rate_field: Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// No toggle transition; the field keeps its value.
    Retained,
    /// The toggle flipped and the field was replaced by the suggestion.
    Overwritten {
        previous: Percent,
        suggested: Percent,
    },
}

impl SyncOutcome {
    pub fn was_overwritten(&self) -> bool {
        matches!(self, SyncOutcome::Overwritten { .. })
    }
}

impl RateSyncState {
    /// State for the first observed selection: the toggle is recorded as-is
    /// and the field starts at the jurisdiction's current-law default, so the
    /// first pass never counts as a transition.
    pub fn initial(selection: &RegimeSelection) -> Self {
        Self {
            last_toggle_value: selection.use_proposed_law,
            rate_field: selection.jurisdiction.default_rate(),
        }
    }

    /// Direct user edit of the rate field. Range checks belong to the input
    /// boundary.
    pub fn edit_rate(self, rate: Percent) -> Self {
        Self {
            rate_field: rate,
            ..self
        }
    }
}

/// One recomputation pass of the controller.
///
/// Compares the current toggle with the remembered one; on a transition in
/// either direction the field is overwritten with
/// [`suggest_rate`] for the current base and the new toggle value is
/// remembered. Without a transition the state is returned unchanged.
pub fn reconcile(
    state: RateSyncState,
    selection: &RegimeSelection,
    taxable_base: Money,
) -> (RateSyncState, SyncOutcome) {
    if selection.use_proposed_law == state.last_toggle_value {
        debug!(rate_field = %state.rate_field, "rate field retained");
        return (state, SyncOutcome::Retained);
    }

    let suggested = suggest_rate(
        selection.jurisdiction,
        selection.use_proposed_law,
        taxable_base,
    );
    info!(
        previous = %state.rate_field,
        suggested = %suggested,
        use_proposed_law = selection.use_proposed_law,
        "regime toggle flipped, rate field overwritten"
    );

    let next = RateSyncState {
        last_toggle_value: selection.use_proposed_law,
        rate_field: suggested,
    };
    (
        next,
        SyncOutcome::Overwritten {
            previous: state.rate_field,
            suggested,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itcmd::rates::Jurisdiction;
    use rust_decimal_macros::dec;

    fn sp(use_proposed_law: bool) -> RegimeSelection {
        RegimeSelection {
            jurisdiction: Jurisdiction::SaoPaulo,
            use_proposed_law,
        }
    }

    #[test]
    fn test_initial_state_uses_regime_default() {
        let state = RateSyncState::initial(&sp(false));
        assert!(!state.last_toggle_value);
        assert_eq!(state.rate_field, dec!(4));

        let mg = RateSyncState::initial(&RegimeSelection {
            jurisdiction: Jurisdiction::MinasGerais,
            use_proposed_law: false,
        });
        assert_eq!(mg.rate_field, dec!(5));
    }

    #[test]
    fn test_first_pass_does_not_overwrite() {
        // Toggle already on at first observation: no transition yet
        let state = RateSyncState::initial(&sp(true));
        let (next, outcome) = reconcile(state, &sp(true), dec!(4_000_000));
        assert_eq!(outcome, SyncOutcome::Retained);
        assert_eq!(next.rate_field, dec!(4));
    }

    #[test]
    fn test_user_edit_survives_unchanged_toggle() {
        let state = RateSyncState::initial(&sp(false)).edit_rate(dec!(7.5));
        let (next, outcome) = reconcile(state, &sp(false), dec!(4_000_000));
        assert_eq!(outcome, SyncOutcome::Retained);
        assert_eq!(next.rate_field, dec!(7.5));
    }

    #[test]
    fn test_toggle_on_overwrites_with_bracket_rate() {
        let state = RateSyncState::initial(&sp(false)).edit_rate(dec!(3));
        let (next, outcome) = reconcile(state, &sp(true), dec!(4_000_000));
        assert_eq!(
            outcome,
            SyncOutcome::Overwritten {
                previous: dec!(3),
                suggested: dec!(6),
            }
        );
        assert!(next.last_toggle_value);
        assert_eq!(next.rate_field, dec!(6));
    }

    #[test]
    fn test_toggle_off_restores_state_default() {
        let state = RateSyncState {
            last_toggle_value: true,
            rate_field: dec!(6),
        };
        let (next, outcome) = reconcile(state, &sp(false), dec!(4_000_000));
        assert!(outcome.was_overwritten());
        assert_eq!(next.rate_field, dec!(4));
        assert!(!next.last_toggle_value);
    }
}
