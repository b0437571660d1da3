//! Batch runner for pricing many requests at once
//!
//! Every calculation is pure, so records are evaluated in parallel and the
//! results collected back in input order.

use crate::calculation::{PensionCalculator, PensionQuote};
use crate::error::PensionResult;
use crate::format::{format_currency, format_rate};
use crate::regime::PensionRegime;
use crate::request::{PensionType, RequestRecord};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Outcome for one batch record
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub id: String,
    pub pension_type: Option<PensionType>,
    pub result: PensionResult<PensionQuote>,
}

/// Flat CSV representation of a [`BatchOutcome`]
#[derive(Debug, Serialize)]
struct BatchRow<'a> {
    #[serde(rename = "RequestID")]
    request_id: &'a str,
    #[serde(rename = "PensionType")]
    pension_type: Option<&'static str>,
    #[serde(rename = "Status")]
    status: &'static str,
    #[serde(rename = "ReplacementRate")]
    replacement_rate: Option<String>,
    #[serde(rename = "MonthlyPayment")]
    monthly_payment: Option<String>,
    #[serde(rename = "MinimumWageFloor")]
    minimum_wage_floor: Option<bool>,
    #[serde(rename = "ErrorKind")]
    error_kind: Option<&'static str>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl<'a> From<&'a BatchOutcome> for BatchRow<'a> {
    fn from(outcome: &'a BatchOutcome) -> Self {
        let pension_type = outcome.pension_type.map(|t| t.as_str());
        match &outcome.result {
            Ok(quote) => BatchRow {
                request_id: &outcome.id,
                pension_type,
                status: "ok",
                replacement_rate: Some(format!("{:.2}", quote.rate_percent())),
                monthly_payment: Some(format!("{:.0}", quote.monthly_payment().round())),
                minimum_wage_floor: Some(quote.payment.minimum_wage_floor_applied),
                error_kind: None,
                error: None,
            },
            Err(err) => BatchRow {
                request_id: &outcome.id,
                pension_type,
                status: "error",
                replacement_rate: None,
                monthly_payment: None,
                minimum_wage_floor: None,
                error_kind: Some(err.code()),
                error: Some(err.to_string()),
            },
        }
    }
}

/// Aggregate figures for a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub regime: String,
    pub effective_from: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub total_requests: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures_by_kind: BTreeMap<String, usize>,
    pub requests_by_type: BTreeMap<String, usize>,
    pub total_monthly_payments: f64,
    pub floored_payments: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch Summary ({}, effective {}):", self.regime, self.effective_from)?;
        writeln!(f, "  Requests: {}", self.total_requests)?;
        writeln!(f, "  Succeeded: {}", self.succeeded)?;
        writeln!(f, "  Failed: {}", self.failed)?;
        for (kind, count) in &self.failures_by_kind {
            writeln!(f, "    {}: {}", kind, count)?;
        }
        for (pension_type, count) in &self.requests_by_type {
            writeln!(f, "  {}: {}", pension_type, count)?;
        }
        writeln!(f, "  Minimum wage floor applied: {}", self.floored_payments)?;
        write!(f, "  Total monthly payments: {}", format_currency(self.total_monthly_payments))
    }
}

/// Pre-configured runner for batch pricing
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::new();
/// let records = load_default_requests()?;
/// let outcomes = runner.run(&records);
/// println!("{}", runner.summarize(&outcomes));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    calculator: PensionCalculator,
}

impl BatchRunner {
    /// Runner using the current default regime
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regime(regime: PensionRegime) -> Self {
        Self {
            calculator: PensionCalculator::new(regime),
        }
    }

    /// Price every record; rows that failed to parse keep their shape error
    pub fn run(&self, records: &[RequestRecord]) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = records
            .par_iter()
            .map(|record| BatchOutcome {
                id: record.id.clone(),
                pension_type: record.pension_type,
                result: record
                    .request
                    .as_ref()
                    .map_err(Clone::clone)
                    .and_then(|request| self.calculator.calculate(request)),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!("Priced {} requests ({} failed)", outcomes.len(), failed);

        outcomes
    }

    /// Build aggregate figures for a set of outcomes
    pub fn summarize(&self, outcomes: &[BatchOutcome]) -> BatchSummary {
        let regime = self.calculator.regime();
        let mut summary = BatchSummary {
            regime: regime.name.clone(),
            effective_from: regime.effective_from,
            generated_at: Utc::now(),
            total_requests: outcomes.len(),
            succeeded: 0,
            failed: 0,
            failures_by_kind: BTreeMap::new(),
            requests_by_type: BTreeMap::new(),
            total_monthly_payments: 0.0,
            floored_payments: 0,
        };

        for outcome in outcomes {
            if let Some(pension_type) = outcome.pension_type {
                *summary.requests_by_type.entry(pension_type.to_string()).or_insert(0) += 1;
            }

            match &outcome.result {
                Ok(quote) => {
                    summary.succeeded += 1;
                    summary.total_monthly_payments += quote.monthly_payment();
                    if quote.payment.minimum_wage_floor_applied {
                        summary.floored_payments += 1;
                    }
                }
                Err(err) => {
                    summary.failed += 1;
                    *summary.failures_by_kind.entry(err.code().to_string()).or_insert(0) += 1;
                }
            }
        }

        summary
    }
}

/// Write one CSV row per outcome
pub fn write_outcomes<W: Write>(outcomes: &[BatchOutcome], writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        csv_writer.serialize(BatchRow::from(outcome))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write outcomes to a CSV file
pub fn write_outcomes_to_path<P: AsRef<Path>>(outcomes: &[BatchOutcome], path: P) -> csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_outcomes(outcomes, file)
}

/// One-line description of an outcome for console listings
pub fn describe_outcome(outcome: &BatchOutcome) -> String {
    match &outcome.result {
        Ok(quote) => format!(
            "{:>8} {:<10} {:>8} {:>14}{}",
            outcome.id,
            quote.pension_type.as_str(),
            format_rate(quote.rate_percent()),
            format_currency(quote.monthly_payment()),
            if quote.payment.minimum_wage_floor_applied { " (minimum wage)" } else { "" },
        ),
        Err(err) => format!(
            "{:>8} {:<10} error: {}",
            outcome.id,
            outcome.pension_type.map_or("-", |t| t.as_str()),
            err,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::load_requests_from_reader;

    const SAMPLE: &str = "\
RequestID,PensionType,BaseIncome,WeeksContributed,Gender,Age,LossPercent
1,OldAge,3000000,1300,Male,62,
2,Survivor,3500000,700,,,
3,OldAge,1400000,1400,Female,57,
4,OldAge,2700000,1300,Male,50,
5,Disability,abc,900,,53,65
";

    fn outcomes() -> Vec<BatchOutcome> {
        let records = load_requests_from_reader(SAMPLE.as_bytes()).unwrap();
        BatchRunner::new().run(&records)
    }

    #[test]
    fn test_run_preserves_order() {
        let outcomes = outcomes();
        let ids: Vec<_> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

        assert!(outcomes[0].result.is_ok());
        assert_eq!(outcomes[3].result.as_ref().unwrap_err().code(), "below_minimum_age_male");
        assert_eq!(outcomes[4].result.as_ref().unwrap_err().code(), "invalid_request_shape");
    }

    #[test]
    fn test_summary() {
        let runner = BatchRunner::new();
        let summary = runner.summarize(&outcomes());

        assert_eq!(summary.total_requests, 5);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.failures_by_kind.get("below_minimum_age_male"), Some(&1));
        assert_eq!(summary.requests_by_type.get("OldAge"), Some(&3));
        assert_eq!(summary.floored_payments, 1);
        assert!((summary.total_monthly_payments - (1_939_299.005 + 1_855_000.0 + 1_750_905.0)).abs() < 0.01);

        let text = summary.to_string();
        assert!(text.contains("Succeeded: 3"));
        assert!(text.contains("$5,545,204"));
    }

    #[test]
    fn test_write_outcomes_csv() {
        let mut buffer = Vec::new();
        write_outcomes(&outcomes(), &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(
            lines[0],
            "RequestID,PensionType,Status,ReplacementRate,MonthlyPayment,MinimumWageFloor,ErrorKind,Error"
        );
        assert_eq!(lines[1], "1,OldAge,ok,64.64,1939299,false,,");
        assert_eq!(lines[3], "3,OldAge,ok,68.10,1750905,true,,");
        assert!(lines[4].starts_with("4,OldAge,error,,,,below_minimum_age_male,"));
        assert!(lines[5].starts_with("5,Disability,error,,,,invalid_request_shape,"));
    }

    #[test]
    fn test_describe_outcome() {
        let outcomes = outcomes();
        assert!(describe_outcome(&outcomes[2]).contains("$1,750,905 (minimum wage)"));
        assert!(describe_outcome(&outcomes[3]).contains("error: men must be at least 62"));
    }
}
