//! Replacement-rate calculation
//!
//! Each pension type has its own pure function. Preconditions are checked in a
//! fixed order (income, then weeks, then age for old-age; income, then loss for
//! disability) and the first failure is returned.

use crate::error::{PensionError, PensionResult};
use crate::regime::{PensionRegime, RateBand};
use crate::request::{Gender, PensionRequest};
use serde::Serialize;

/// Replacement rate with the components that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplacementRate {
    /// Rate before the weeks increment, in percent
    pub base_rate: f64,

    /// Points added for weeks above the type's threshold
    pub weeks_increment: f64,

    /// base_rate + weeks_increment
    pub unclamped: f64,

    /// Final rate after clamping to the type's band, in percent
    pub rate: f64,
}

impl ReplacementRate {
    fn from_components(base_rate: f64, weeks_increment: f64, band: &RateBand) -> Self {
        let unclamped = base_rate + weeks_increment;
        Self {
            base_rate,
            weeks_increment,
            unclamped,
            rate: band.clamp(unclamped),
        }
    }

    /// Final rate in percent (e.g. 64.64)
    pub fn percent(&self) -> f64 {
        self.rate
    }

    /// Whether the band changed the rate
    pub fn is_clamped(&self) -> bool {
        self.rate != self.unclamped
    }
}

/// Compute the replacement rate for a request under the given regime
pub fn compute_replacement_rate(
    request: &PensionRequest,
    regime: &PensionRegime,
) -> PensionResult<ReplacementRate> {
    check_income(request.base_income())?;

    match *request {
        PensionRequest::OldAge { base_income, weeks_contributed, gender, age } => {
            old_age_rate(base_income, weeks_contributed, gender, age, regime)
        }
        PensionRequest::Survivor { weeks_contributed, .. } => {
            Ok(survivor_rate(weeks_contributed, regime))
        }
        PensionRequest::Disability { weeks_contributed, loss_percent, .. } => {
            disability_rate(weeks_contributed, loss_percent, regime)
        }
    }
}

/// NaN compares false, so it is rejected along with zero and negatives
fn check_income(base_income: f64) -> PensionResult<()> {
    if base_income > 0.0 {
        Ok(())
    } else {
        Err(PensionError::InvalidIncome { base_income })
    }
}

/// Old-age rate: 65.50 - (income / minimum wage) * 0.50, plus 1.5 points per
/// 50 weeks beyond 1300, clamped to [55, 80]
pub fn old_age_rate(
    base_income: f64,
    weeks_contributed: u32,
    gender: Gender,
    age: u32,
    regime: &PensionRegime,
) -> PensionResult<ReplacementRate> {
    let rules = &regime.old_age;

    check_income(base_income)?;

    if weeks_contributed < rules.min_weeks {
        return Err(PensionError::InsufficientWeeks {
            weeks: weeks_contributed,
            required: rules.min_weeks,
        });
    }

    match gender {
        Gender::Male if age < rules.min_age_male => {
            return Err(PensionError::BelowMinimumAgeMale {
                age,
                required: rules.min_age_male,
            });
        }
        Gender::Female if age < rules.min_age_female => {
            return Err(PensionError::BelowMinimumAgeFemale {
                age,
                required: rules.min_age_female,
            });
        }
        Gender::Male | Gender::Female => {}
    }

    let base_rate = rules.income_adjusted_rate(base_income, regime.minimum_wage);
    let increment = rules.weeks_increment.points(weeks_contributed);

    Ok(ReplacementRate::from_components(base_rate, increment, &rules.band))
}

/// Survivor rate: 45 plus 2 points per 50 weeks beyond 500, capped at 75
pub fn survivor_rate(weeks_contributed: u32, regime: &PensionRegime) -> ReplacementRate {
    let rules = &regime.survivor;
    let increment = rules.weeks_increment.points(weeks_contributed);

    ReplacementRate::from_components(rules.base_rate, increment, &rules.band)
}

/// Disability rate by loss tier, clamped to [45, 75]
pub fn disability_rate(
    weeks_contributed: u32,
    loss_percent: f64,
    regime: &PensionRegime,
) -> PensionResult<ReplacementRate> {
    let rules = &regime.disability;

    if !rules.qualifies(loss_percent) {
        return Err(PensionError::InvalidDisabilityLoss {
            loss_percent,
            threshold: rules.min_loss_percent,
        });
    }

    let tier = rules.tier(loss_percent);
    let increment = tier.weeks_increment.points(weeks_contributed);

    Ok(ReplacementRate::from_components(tier.base_rate, increment, &rules.band))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn regime() -> PensionRegime {
        PensionRegime::colombia_2026()
    }

    #[test]
    fn test_old_age_at_minimums() {
        let regime = regime();

        // Male at 62, Female at 57, both with exactly 1300 weeks
        let male = old_age_rate(3_000_000.0, 1300, Gender::Male, 62, &regime).unwrap();
        assert_abs_diff_eq!(male.percent(), 64.64, epsilon = 0.005);
        assert_eq!(male.weeks_increment, 0.0);

        let female = old_age_rate(5_000_000.0, 1300, Gender::Female, 57, &regime).unwrap();
        assert_abs_diff_eq!(female.percent(), 64.07, epsilon = 0.005);

        for income in [500_000.0, 1_750_905.0, 7_000_000.0, 30_000_000.0] {
            let rate = old_age_rate(income, 1300, Gender::Male, 62, &regime).unwrap();
            let expected = (65.50 - (income / 1_750_905.0) * 0.50).clamp(55.0, 80.0);
            assert_abs_diff_eq!(rate.percent(), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_old_age_extra_weeks() {
        let rate = old_age_rate(2_500_000.0, 1500, Gender::Male, 62, &regime()).unwrap();

        // 200 extra weeks = 4 blocks of 1.5 points
        assert_abs_diff_eq!(rate.weeks_increment, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rate.percent(), 70.79, epsilon = 0.005);
    }

    #[test]
    fn test_old_age_band() {
        let regime = regime();

        let high = old_age_rate(10_000_000.0, 2000, Gender::Male, 62, &regime).unwrap();
        assert_eq!(high.percent(), 80.0);
        assert!(high.is_clamped());

        // Very high income pushes the base rate under the floor
        let low = old_age_rate(40_000_000.0, 1300, Gender::Female, 60, &regime).unwrap();
        assert!(low.unclamped < 55.0);
        assert_eq!(low.percent(), 55.0);
    }

    #[test]
    fn test_old_age_check_order() {
        let regime = regime();

        // Income is checked before weeks and age
        let err = old_age_rate(0.0, 100, Gender::Male, 20, &regime).unwrap_err();
        assert_eq!(err, PensionError::InvalidIncome { base_income: 0.0 });

        // Weeks before age
        let err = old_age_rate(2_000_000.0, 400, Gender::Female, 20, &regime).unwrap_err();
        assert_eq!(err, PensionError::InsufficientWeeks { weeks: 400, required: 1300 });

        let err = old_age_rate(2_700_000.0, 1300, Gender::Male, 50, &regime).unwrap_err();
        assert_eq!(err, PensionError::BelowMinimumAgeMale { age: 50, required: 62 });

        let err = old_age_rate(2_700_000.0, 1300, Gender::Female, 56, &regime).unwrap_err();
        assert_eq!(err, PensionError::BelowMinimumAgeFemale { age: 56, required: 57 });

        // A 60-year-old woman qualifies where a man does not
        assert!(old_age_rate(2_700_000.0, 1300, Gender::Female, 60, &regime).is_ok());
        assert!(old_age_rate(2_700_000.0, 1300, Gender::Male, 60, &regime).is_err());
    }

    #[test]
    fn test_survivor_rate() {
        let regime = regime();

        let rate = survivor_rate(700, &regime);
        assert_abs_diff_eq!(rate.percent(), 53.0, epsilon = 1e-12);

        // No floor clamp, but nothing can go under the base
        let rate = survivor_rate(0, &regime);
        assert_eq!(rate.percent(), 45.0);
        assert!(!rate.is_clamped());

        let rate = survivor_rate(5000, &regime);
        assert_eq!(rate.percent(), 75.0);
    }

    #[test]
    fn test_disability_tiers() {
        let regime = regime();

        let moderate = disability_rate(900, 65.0, &regime).unwrap();
        assert_abs_diff_eq!(moderate.percent(), 57.0, epsilon = 1e-12);

        let boundary = disability_rate(500, 66.0, &regime).unwrap();
        assert_eq!(boundary.base_rate, 45.0);

        let severe = disability_rate(1000, 70.0, &regime).unwrap();
        assert_abs_diff_eq!(severe.percent(), 74.0, epsilon = 1e-12);

        let capped = disability_rate(3000, 90.0, &regime).unwrap();
        assert_eq!(capped.percent(), 75.0);
    }

    #[test]
    fn test_disability_loss_threshold() {
        let regime = regime();

        let err = disability_rate(900, 50.0, &regime).unwrap_err();
        assert_eq!(
            err,
            PensionError::InvalidDisabilityLoss { loss_percent: 50.0, threshold: 50.0 }
        );
        assert!(disability_rate(900, 50.5, &regime).is_ok());
    }

    #[test]
    fn test_dispatch_checks_income_first() {
        let regime = regime();

        let request = PensionRequest::disability(-1.0, 900, 40, 10.0);
        let err = compute_replacement_rate(&request, &regime).unwrap_err();
        assert_eq!(err.code(), "invalid_income");

        let request = PensionRequest::survivor(f64::NAN, 900);
        let err = compute_replacement_rate(&request, &regime).unwrap_err();
        assert_eq!(err.code(), "invalid_income");
    }

    #[test]
    fn test_rates_stay_in_band() {
        let regime = regime();

        for weeks in (0..=4000).step_by(37) {
            let survivor = survivor_rate(weeks, &regime);
            assert!((45.0..=75.0).contains(&survivor.percent()));

            for loss in [50.1, 60.0, 66.0, 66.1, 80.0, 100.0] {
                let rate = disability_rate(weeks, loss, &regime).unwrap();
                assert!((45.0..=75.0).contains(&rate.percent()));
            }

            if weeks >= 1300 {
                for income in [100_000.0, 2_000_000.0, 20_000_000.0, 90_000_000.0] {
                    let rate = old_age_rate(income, weeks, Gender::Male, 70, &regime).unwrap();
                    assert!((55.0..=80.0).contains(&rate.percent()));
                }
            }
        }
    }

    #[test]
    fn test_more_weeks_never_lowers_rate() {
        let regime = regime();

        let mut previous = (0.0, 0.0, 0.0, 0.0);
        for weeks in 1300..=3000 {
            let current = (
                old_age_rate(4_000_000.0, weeks, Gender::Female, 57, &regime).unwrap().percent(),
                survivor_rate(weeks, &regime).percent(),
                disability_rate(weeks, 60.0, &regime).unwrap().percent(),
                disability_rate(weeks, 75.0, &regime).unwrap().percent(),
            );
            assert!(current.0 >= previous.0);
            assert!(current.1 >= previous.1);
            assert!(current.2 >= previous.2);
            assert!(current.3 >= previous.3);
            previous = current;
        }
    }
}
