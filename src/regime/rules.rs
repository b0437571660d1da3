//! Rate rules per pension type: base rates, weeks increments, and rate bands

use serde::Serialize;

/// Extra percentage points earned for weeks contributed above a threshold
///
/// Points accrue per block of weeks, pro rata: 75 extra weeks with a 50-week
/// block count as 1.5 blocks. Fractions are kept in floating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeksIncrement {
    /// Weeks that must be exceeded before points accrue
    pub threshold: u32,

    /// Size of one block of weeks
    pub block_weeks: u32,

    /// Percentage points granted per full block
    pub points_per_block: f64,
}

impl WeeksIncrement {
    /// Weeks above the threshold (zero when at or below it)
    pub fn extra_weeks(&self, weeks_contributed: u32) -> u32 {
        weeks_contributed.saturating_sub(self.threshold)
    }

    /// Percentage points earned for the given weeks contributed
    pub fn points(&self, weeks_contributed: u32) -> f64 {
        let extra = self.extra_weeks(weeks_contributed);
        if extra == 0 || self.block_weeks == 0 {
            return 0.0;
        }
        extra as f64 / self.block_weeks as f64 * self.points_per_block
    }
}

/// Closed interval a replacement rate is clamped into
///
/// `floor` is optional: survivor pensions only cap the rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateBand {
    pub floor: Option<f64>,
    pub ceiling: f64,
}

impl RateBand {
    pub fn new(floor: f64, ceiling: f64) -> Self {
        Self { floor: Some(floor), ceiling }
    }

    pub fn ceiling_only(ceiling: f64) -> Self {
        Self { floor: None, ceiling }
    }

    /// Clamp a rate into the band
    pub fn clamp(&self, rate: f64) -> f64 {
        let capped = rate.min(self.ceiling);
        match self.floor {
            Some(floor) => capped.max(floor),
            None => capped,
        }
    }
}

/// Old-age (vejez) pension rules
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OldAgeRules {
    /// Minimum weeks contributed to qualify
    pub min_weeks: u32,

    /// Minimum age for men
    pub min_age_male: u32,

    /// Minimum age for women
    pub min_age_female: u32,

    /// Rate before the income adjustment, in percent
    pub base_rate: f64,

    /// Points deducted per minimum wage of base income
    pub income_slope: f64,

    /// Increment for weeks beyond `min_weeks`
    pub weeks_increment: WeeksIncrement,

    pub band: RateBand,
}

impl Default for OldAgeRules {
    fn default() -> Self {
        Self {
            min_weeks: 1300,
            min_age_male: 62,
            min_age_female: 57,
            base_rate: 65.50,
            income_slope: 0.50,
            weeks_increment: WeeksIncrement {
                threshold: 1300,
                block_weeks: 50,
                points_per_block: 1.5,
            },
            band: RateBand::new(55.0, 80.0),
        }
    }
}

impl OldAgeRules {
    /// Base rate for an income expressed against the minimum wage
    ///
    /// 65.50 - (income / minimum_wage) * 0.50 under the default rules
    pub fn income_adjusted_rate(&self, base_income: f64, minimum_wage: f64) -> f64 {
        self.base_rate - (base_income / minimum_wage) * self.income_slope
    }
}

/// Survivor (sobreviviente) pension rules
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivorRules {
    pub base_rate: f64,
    pub weeks_increment: WeeksIncrement,
    pub band: RateBand,
}

impl Default for SurvivorRules {
    fn default() -> Self {
        Self {
            base_rate: 45.0,
            weeks_increment: WeeksIncrement {
                threshold: 500,
                block_weeks: 50,
                points_per_block: 2.0,
            },
            band: RateBand::ceiling_only(75.0),
        }
    }
}

/// Base rate and weeks increment for one disability-loss tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisabilityTier {
    pub base_rate: f64,
    pub weeks_increment: WeeksIncrement,
}

/// Disability (invalidez) pension rules
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisabilityRules {
    /// Loss percentage that must be exceeded to qualify
    pub min_loss_percent: f64,

    /// Upper bound (inclusive) of the moderate tier
    pub moderate_loss_ceiling: f64,

    /// Tier for losses in (min_loss_percent, moderate_loss_ceiling]
    pub moderate: DisabilityTier,

    /// Tier for losses above moderate_loss_ceiling
    pub severe: DisabilityTier,

    pub band: RateBand,
}

impl Default for DisabilityRules {
    fn default() -> Self {
        Self {
            min_loss_percent: 50.0,
            moderate_loss_ceiling: 66.0,
            moderate: DisabilityTier {
                base_rate: 45.0,
                weeks_increment: WeeksIncrement {
                    threshold: 500,
                    block_weeks: 50,
                    points_per_block: 1.5,
                },
            },
            severe: DisabilityTier {
                base_rate: 54.0,
                weeks_increment: WeeksIncrement {
                    threshold: 500,
                    block_weeks: 50,
                    points_per_block: 2.0,
                },
            },
            band: RateBand::new(45.0, 75.0),
        }
    }
}

impl DisabilityRules {
    /// Whether the loss percentage qualifies for a disability pension
    pub fn qualifies(&self, loss_percent: f64) -> bool {
        loss_percent > self.min_loss_percent
    }

    /// Tier for a qualifying loss percentage
    pub fn tier(&self, loss_percent: f64) -> &DisabilityTier {
        if loss_percent <= self.moderate_loss_ceiling {
            &self.moderate
        } else {
            &self.severe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weeks_increment() {
        let inc = SurvivorRules::default().weeks_increment;

        assert_eq!(inc.points(0), 0.0);
        assert_eq!(inc.points(500), 0.0);
        assert_eq!(inc.extra_weeks(700), 200);
        assert_abs_diff_eq!(inc.points(700), 8.0, epsilon = 1e-12);

        // Partial blocks are not rounded
        assert_abs_diff_eq!(inc.points(525), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rate_band_clamp() {
        let band = RateBand::new(55.0, 80.0);
        assert_eq!(band.clamp(90.0), 80.0);
        assert_eq!(band.clamp(40.0), 55.0);
        assert_eq!(band.clamp(64.5), 64.5);

        let ceiling = RateBand::ceiling_only(75.0);
        assert_eq!(ceiling.clamp(91.0), 75.0);
        assert_eq!(ceiling.clamp(20.0), 20.0);
    }

    #[test]
    fn test_old_age_income_adjustment() {
        let rules = OldAgeRules::default();

        // At exactly one minimum wage the rate drops by half a point
        assert_abs_diff_eq!(rules.income_adjusted_rate(1_000.0, 1_000.0), 65.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            rules.income_adjusted_rate(3_000_000.0, 1_750_905.0),
            64.6433,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_disability_tiers() {
        let rules = DisabilityRules::default();

        assert!(!rules.qualifies(50.0));
        assert!(rules.qualifies(50.01));
        assert_eq!(rules.tier(66.0).base_rate, 45.0);
        assert_eq!(rules.tier(66.5).base_rate, 54.0);
        assert_eq!(rules.tier(100.0).weeks_increment.points_per_block, 2.0);
    }
}
