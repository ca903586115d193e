use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::costs::breakdown::FeeRates;
use crate::itcmd::rates::Jurisdiction;
use crate::patrimony::assets::AssetSnapshot;
use crate::patrimony::marital::MaritalContext;
use crate::session::rate_sync::RateSyncState;
use crate::succession::pipeline::{simulate_succession, SimulationPass, SuccessionInput};
use crate::types::Percent;
use crate::SuccessionResult;

/// A single UI interaction. Each event is followed by one recomputation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Re-render with nothing changed.
    Render,
    SetToggle { use_proposed_law: bool },
    SetJurisdiction { jurisdiction: Jurisdiction },
    EditRate { rate: Percent },
    SetAssets { assets: AssetSnapshot },
    SetMarital { marital: MaritalContext },
    SetFees { fees: FeeRates },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionScript {
    pub initial: SuccessionInput,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStep {
    /// `None` for the opening pass.
    pub event: Option<SessionEvent>,
    pub pass: SimulationPass,
}

/// Replay a scripted session: one opening pass, then one pass per event,
/// threading the rate-sync state from step to step.
pub fn replay_session(script: &SessionScript) -> SuccessionResult<Vec<SessionStep>> {
    let mut input = script.initial.clone();
    let mut state = RateSyncState::initial(&input.selection);
    let mut steps = Vec::with_capacity(script.events.len() + 1);

    let pass = simulate_succession(&input, state)?;
    state = pass.state;
    input.itcmd_rate_override = None;
    steps.push(SessionStep { event: None, pass });

    for event in &script.events {
        apply_event(&mut input, event);
        debug!(?event, "session event applied");

        let pass = simulate_succession(&input, state)?;
        state = pass.state;
        // Edits live in the session state from here on
        input.itcmd_rate_override = None;
        steps.push(SessionStep {
            event: Some(event.clone()),
            pass,
        });
    }

    Ok(steps)
}

fn apply_event(input: &mut SuccessionInput, event: &SessionEvent) {
    match event {
        SessionEvent::Render => {}
        SessionEvent::SetToggle { use_proposed_law } => {
            input.selection.use_proposed_law = *use_proposed_law;
        }
        SessionEvent::SetJurisdiction { jurisdiction } => {
            input.selection.jurisdiction = *jurisdiction;
        }
        SessionEvent::EditRate { rate } => input.itcmd_rate_override = Some(*rate),
        SessionEvent::SetAssets { assets } => input.assets = assets.clone(),
        SessionEvent::SetMarital { marital } => input.marital = *marital,
        SessionEvent::SetFees { fees } => input.fees = *fees,
    }
}
