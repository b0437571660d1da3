//! Pension calculator: replacement rate followed by monthly payment

use super::payment::{compute_payment, MonthlyPayment};
use super::rate::{compute_replacement_rate, ReplacementRate};
use crate::error::PensionResult;
use crate::regime::PensionRegime;
use crate::request::{PensionRequest, PensionType};
use log::debug;
use serde::Serialize;

/// Result of pricing one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PensionQuote {
    pub pension_type: PensionType,
    pub base_income: f64,
    pub rate: ReplacementRate,
    pub payment: MonthlyPayment,
}

impl PensionQuote {
    /// Replacement rate in percent
    pub fn rate_percent(&self) -> f64 {
        self.rate.percent()
    }

    /// Monthly payment amount
    pub fn monthly_payment(&self) -> f64 {
        self.payment.amount
    }
}

/// Stateless calculator bound to one regime
#[derive(Debug, Clone, Default)]
pub struct PensionCalculator {
    regime: PensionRegime,
}

impl PensionCalculator {
    pub fn new(regime: PensionRegime) -> Self {
        Self { regime }
    }

    /// Compute the rate and payment for a request
    pub fn calculate(&self, request: &PensionRequest) -> PensionResult<PensionQuote> {
        let pension_type = request.pension_type();
        let base_income = request.base_income();

        let rate = compute_replacement_rate(request, &self.regime).map_err(|err| {
            debug!("{} request rejected ({}): {}", pension_type, err.code(), err);
            err
        })?;
        let payment = compute_payment(rate.percent(), base_income, pension_type, &self.regime);

        debug!(
            "{} request: base={:.2} weeks={} rate={:.4} (base {:.4} + weeks {:.4}) payment={:.2}{}",
            pension_type,
            base_income,
            request.weeks_contributed(),
            rate.percent(),
            rate.base_rate,
            rate.weeks_increment,
            payment.amount,
            if payment.minimum_wage_floor_applied { " [minimum wage floor]" } else { "" },
        );

        Ok(PensionQuote {
            pension_type,
            base_income,
            rate,
            payment,
        })
    }

    pub fn regime(&self) -> &PensionRegime {
        &self.regime
    }
}
