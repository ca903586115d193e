use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{validate_amount, Money};
use crate::SuccessionResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Asset categories declared for the estate survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    RealEstate,
    FinancialInvestments,
    Vehicles,
    BusinessEquity,
    Other,
    PrivatePension,
}

/// Point-in-time declaration of the estate, one amount per category.
///
/// The private-pension balance (VGBL/PGBL) is carried separately from the
/// probate assets and only counts when `include_pension` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSnapshot {
    pub real_estate: Money,
    pub financial_investments: Money,
    pub vehicles: Money,
    pub business_equity: Money,
    pub other: Money,
    pub private_pension: Money,
    pub include_pension: bool,
}

impl AssetSnapshot {
    pub fn categories(&self) -> [(AssetCategory, Money); 6] {
        [
            (AssetCategory::RealEstate, self.real_estate),
            (AssetCategory::FinancialInvestments, self.financial_investments),
            (AssetCategory::Vehicles, self.vehicles),
            (AssetCategory::BusinessEquity, self.business_equity),
            (AssetCategory::Other, self.other),
            (AssetCategory::PrivatePension, self.private_pension),
        ]
    }

    /// Pension balance that exists but stays outside the inventory.
    pub fn excluded_pension(&self) -> Money {
        if self.include_pension {
            Decimal::ZERO
        } else {
            self.private_pension
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Gross estate (monte mor): the sum of every category, with the pension
/// balance counted only when it is flagged for inclusion.
///
/// Saturates at `Decimal::MAX` instead of overflowing; validated snapshots
/// never get near it.
pub fn aggregate(assets: &AssetSnapshot) -> Money {
    let pension = if assets.include_pension {
        assets.private_pension
    } else {
        Decimal::ZERO
    };

    [
        assets.real_estate,
        assets.financial_investments,
        assets.vehicles,
        assets.business_equity,
        assets.other,
        pension,
    ]
    .iter()
    .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
    .unwrap_or(Decimal::MAX)
}

pub fn validate_assets(assets: &AssetSnapshot) -> SuccessionResult<()> {
    for (category, amount) in assets.categories() {
        validate_amount(&format!("assets.{}", field_name(category)), amount)?;
    }
    Ok(())
}

fn field_name(category: AssetCategory) -> &'static str {
    match category {
        AssetCategory::RealEstate => "real_estate",
        AssetCategory::FinancialInvestments => "financial_investments",
        AssetCategory::Vehicles => "vehicles",
        AssetCategory::BusinessEquity => "business_equity",
        AssetCategory::Other => "other",
        AssetCategory::PrivatePension => "private_pension",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
