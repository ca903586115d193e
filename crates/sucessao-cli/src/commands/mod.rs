pub mod benchmark;
pub mod itcmd;
pub mod leverage;
pub mod sensitivity;
pub mod session;
pub mod simulate;

use clap::ValueEnum;

use sucessao_core::itcmd::engine::TaxMode;
use sucessao_core::itcmd::rates::Jurisdiction;
use sucessao_core::patrimony::marital::MaritalRegime;

/// Brazilian state selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StateArg {
    Sp,
    Rj,
    Mg,
    Other,
}

impl From<StateArg> for Jurisdiction {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Sp => Jurisdiction::SaoPaulo,
            StateArg::Rj => Jurisdiction::RioDeJaneiro,
            StateArg::Mg => Jurisdiction::MinasGerais,
            StateArg::Other => Jurisdiction::Other,
        }
    }
}

/// Marital property regime selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegimeArg {
    CommunityPartial,
    CommunityUniversal,
    TotalSeparation,
    FinalParticipation,
}

impl From<RegimeArg> for MaritalRegime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::CommunityPartial => MaritalRegime::CommunityPartial,
            RegimeArg::CommunityUniversal => MaritalRegime::CommunityUniversal,
            RegimeArg::TotalSeparation => MaritalRegime::TotalSeparation,
            RegimeArg::FinalParticipation => MaritalRegime::FinalParticipation,
        }
    }
}

/// ITCMD computation mode
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Flat,
    Progressive,
}

impl From<ModeArg> for TaxMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Flat => TaxMode::Flat,
            ModeArg::Progressive => TaxMode::Progressive,
        }
    }
}
