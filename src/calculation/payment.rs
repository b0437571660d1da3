//! Monthly payment calculation

use crate::regime::PensionRegime;
use crate::request::PensionType;
use serde::Serialize;

/// Monthly pension payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPayment {
    /// Amount paid each month
    pub amount: f64,

    /// rate / 100 * base income, before any floor
    pub unfloored: f64,

    /// Whether the old-age minimum wage floor raised the amount
    pub minimum_wage_floor_applied: bool,
}

/// Apply a replacement rate (in percent) to the base income
///
/// Old-age payments below the regime's minimum wage are raised to exactly the
/// minimum wage. Survivor and disability payments are never adjusted.
pub fn compute_payment(
    rate_percent: f64,
    base_income: f64,
    pension_type: PensionType,
    regime: &PensionRegime,
) -> MonthlyPayment {
    let unfloored = (rate_percent / 100.0) * base_income;

    let floor_applies = pension_type == PensionType::OldAge && unfloored < regime.minimum_wage;
    let amount = if floor_applies { regime.minimum_wage } else { unfloored };

    MonthlyPayment {
        amount,
        unfloored,
        minimum_wage_floor_applied: floor_applies,
    }
}
