use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use sucessao_core::costs::breakdown::FeeRates;
use sucessao_core::insurance::leverage::InsuranceRequest;
use sucessao_core::itcmd::rates::RegimeSelection;
use sucessao_core::patrimony::assets::AssetSnapshot;
use sucessao_core::patrimony::marital::MaritalContext;
use sucessao_core::succession::pipeline::{self, Assumptions, SuccessionInput};

use super::{RegimeArg, StateArg};
use crate::input;

/// Arguments for a full succession cost estimate
#[derive(Args)]
pub struct SimulateArgs {
    /// Real estate (imóveis)
    #[arg(long, default_value = "0")]
    pub real_estate: Decimal,

    /// Financial investments (aplicações financeiras)
    #[arg(long, default_value = "0")]
    pub financial: Decimal,

    /// Vehicles (veículos)
    #[arg(long, default_value = "0")]
    pub vehicles: Decimal,

    /// Business equity (participação em empresas)
    #[arg(long, default_value = "0")]
    pub business: Decimal,

    /// Other assets (outros bens)
    #[arg(long, default_value = "0")]
    pub other: Decimal,

    /// Private pension balance (VGBL/PGBL)
    #[arg(long, default_value = "0")]
    pub pension: Decimal,

    /// Count the pension balance in the inventory
    #[arg(long)]
    pub include_pension: bool,

    /// Married; the regime decides the spousal share
    #[arg(long)]
    pub married: bool,

    /// Marital property regime
    #[arg(long, value_enum, default_value = "community-partial")]
    pub regime: RegimeArg,

    /// State
    #[arg(long, value_enum, default_value = "sp")]
    pub state: StateArg,

    /// Simulate the proposed progressive law
    #[arg(long)]
    pub proposed_law: bool,

    /// ITCMD rate override in percent (0–20); defaults to the suggestion
    #[arg(long)]
    pub itcmd_rate: Option<Decimal>,

    /// Legal fees in percent
    #[arg(long)]
    pub legal_fee_rate: Option<Decimal>,

    /// Notary and other fees in percent
    #[arg(long)]
    pub notary_fee_rate: Option<Decimal>,

    /// Insurance coverage; defaults to the total succession cost
    #[arg(long)]
    pub coverage: Option<Decimal>,

    /// Annual premium; defaults to 4% of coverage
    #[arg(long)]
    pub premium: Option<Decimal>,

    /// Premium payment horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Assumptions file (JSON or YAML) overriding the built-in defaults
    #[arg(long)]
    pub assumptions: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut sim_input: SuccessionInput = match input::resolve(args.input.as_deref(), "simulation")? {
        Some(parsed) => parsed,
        None => from_flags(&args),
    };

    if let Some(ref path) = args.assumptions {
        let assumptions: Assumptions = input::file::read_input(path)?;
        info!(path = %path, "assumptions loaded");
        sim_input.assumptions = assumptions;
    }

    let result = pipeline::estimate_succession_cost(&sim_input)?;
    Ok(serde_json::to_value(result)?)
}

fn from_flags(args: &SimulateArgs) -> SuccessionInput {
    let defaults = FeeRates::default();
    SuccessionInput {
        assets: AssetSnapshot {
            real_estate: args.real_estate,
            financial_investments: args.financial,
            vehicles: args.vehicles,
            business_equity: args.business,
            other: args.other,
            private_pension: args.pension,
            include_pension: args.include_pension,
        },
        marital: MaritalContext {
            is_married: args.married,
            regime: args.regime.into(),
        },
        selection: RegimeSelection {
            jurisdiction: args.state.into(),
            use_proposed_law: args.proposed_law,
        },
        fees: FeeRates {
            legal_fee_rate: args.legal_fee_rate.unwrap_or(defaults.legal_fee_rate),
            notary_fee_rate: args.notary_fee_rate.unwrap_or(defaults.notary_fee_rate),
        },
        itcmd_rate_override: args.itcmd_rate,
        insurance: InsuranceRequest {
            coverage_override: args.coverage,
            annual_premium: args.premium,
            years: args.years,
        },
        assumptions: Assumptions::default(),
    }
}
