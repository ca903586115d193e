use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Spousal half-share under community-like regimes.
pub const COMMUNITY_SHARE: Rate = dec!(0.5);

/// Marital property regime (regime de bens).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaritalRegime {
    #[default]
    CommunityPartial,
    CommunityUniversal,
    TotalSeparation,
    FinalParticipation,
}

impl MaritalRegime {
    pub fn label(&self) -> &'static str {
        match self {
            MaritalRegime::CommunityPartial => "Comunhão Parcial",
            MaritalRegime::CommunityUniversal => "Comunhão Universal",
            MaritalRegime::TotalSeparation => "Separação Total",
            MaritalRegime::FinalParticipation => "Participação Final nos Aquestos",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaritalContext {
    pub is_married: bool,
    pub regime: MaritalRegime,
}

impl MaritalContext {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn married(regime: MaritalRegime) -> Self {
        Self {
            is_married: true,
            regime,
        }
    }

    /// Fraction of the gross estate owned by the surviving spouse (meação).
    pub fn co_ownership_share(&self) -> Rate {
        if !self.is_married {
            return Decimal::ZERO;
        }
        match self.regime {
            MaritalRegime::TotalSeparation => Decimal::ZERO,
            MaritalRegime::CommunityPartial
            | MaritalRegime::CommunityUniversal
            | MaritalRegime::FinalParticipation => COMMUNITY_SHARE,
        }
    }
}

/// Gross estate and the individually taxable portion after the spousal share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxableBase {
    pub gross_estate: Money,
    pub co_ownership_share: Rate,
    pub taxable_base: Money,
}

impl TaxableBase {
    pub fn new(gross_estate: Money, co_ownership_share: Rate) -> Self {
        Self {
            gross_estate,
            co_ownership_share,
            taxable_base: apply_marital(gross_estate, co_ownership_share),
        }
    }

    pub fn spouse_share(&self) -> Money {
        self.gross_estate - self.taxable_base
    }
}

/// `gross_estate * (1 - co_ownership_share)`.
pub fn apply_marital(gross_estate: Money, co_ownership_share: Rate) -> Money {
    gross_estate * (Decimal::ONE - co_ownership_share)
}
