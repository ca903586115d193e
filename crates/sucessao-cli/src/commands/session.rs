use clap::Args;
use serde_json::{json, Value};

use sucessao_core::session::replay::{self, SessionScript};

use crate::input;

/// Arguments for replaying a scripted UI session
#[derive(Args)]
pub struct SessionArgs {
    /// Path to JSON/YAML script: `{ "initial": {...}, "events": [...] }`
    #[arg(long)]
    pub input: Option<String>,

    /// Emit only the final pass instead of every step
    #[arg(long)]
    pub last: bool,
}

pub fn run_session(args: SessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let script: SessionScript = input::resolve(args.input.as_deref(), "session script")?
        .ok_or("--input <script.json> or stdin required for session replay")?;

    let steps = replay::replay_session(&script)?;

    if args.last {
        let last = steps.last().ok_or("session produced no passes")?;
        return Ok(serde_json::to_value(&last.pass.output)?);
    }

    let results: Vec<Value> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let r = &step.pass.output.result;
            json!({
                "step": i,
                "event": step.event.as_ref().map(|e| serde_json::to_value(e).unwrap_or_default()),
                "use_proposed_law": r.use_proposed_law,
                "rate_field": step.pass.state.rate_field,
                "overwritten": r.rate_sync.was_overwritten(),
                "taxable_base": r.taxable_base,
                "itcmd_amount": r.costs.itcmd_amount,
                "total_cost": r.costs.total_cost,
            })
        })
        .collect();

    Ok(json!({ "results": results }))
}
