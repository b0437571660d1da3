//! Legal constants for one pension regime: minimum wage and per-type rules

mod rules;

pub use rules::{
    DisabilityRules, DisabilityTier, OldAgeRules, RateBand, SurvivorRules, WeeksIncrement,
};

use chrono::NaiveDate;
use serde::Serialize;

/// Legal monthly minimum wage (SMMLV) in force for 2026, in pesos
pub const MINIMUM_WAGE_2026: f64 = 1_750_905.0;

/// Container for every constant the calculators depend on
///
/// Passed explicitly to the calculators so a future period only needs a new
/// constructor, never a change to the formulas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PensionRegime {
    /// Human-readable label
    pub name: String,

    /// First day the constants apply
    pub effective_from: NaiveDate,

    /// Legal monthly minimum wage, also the old-age payment floor
    pub minimum_wage: f64,

    pub old_age: OldAgeRules,
    pub survivor: SurvivorRules,
    pub disability: DisabilityRules,
}

impl PensionRegime {
    /// Colombian regime with the 2026 minimum wage
    pub fn colombia_2026() -> Self {
        Self {
            name: "Colombia 2026".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            minimum_wage: MINIMUM_WAGE_2026,
            old_age: OldAgeRules::default(),
            survivor: SurvivorRules::default(),
            disability: DisabilityRules::default(),
        }
    }

    /// Same rules with a different minimum wage
    pub fn with_minimum_wage(mut self, minimum_wage: f64) -> Self {
        self.minimum_wage = minimum_wage;
        self
    }
}

impl Default for PensionRegime {
    fn default() -> Self {
        Self::colombia_2026()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colombia_2026_constants() {
        let regime = PensionRegime::colombia_2026();

        assert_eq!(regime.minimum_wage, 1_750_905.0);
        assert_eq!(regime.effective_from, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(regime.old_age.min_weeks, 1300);
        assert_eq!(regime.old_age.min_age_male, 62);
        assert_eq!(regime.old_age.min_age_female, 57);
        assert_eq!(regime.survivor.band.ceiling, 75.0);
        assert_eq!(regime.disability.band, RateBand::new(45.0, 75.0));
    }

    #[test]
    fn test_with_minimum_wage() {
        let regime = PensionRegime::default().with_minimum_wage(2_000_000.0);
        assert_eq!(regime.minimum_wage, 2_000_000.0);
        assert_eq!(regime.old_age, OldAgeRules::default());
    }
}
