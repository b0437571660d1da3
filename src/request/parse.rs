//! Text-to-value coercion shared by the console, CLI and CSV loader
//!
//! All failures are `InvalidRequestShape`. Eligibility checks (income > 0,
//! loss above threshold, ...) are left to the rate calculator.

use super::{Gender, PensionType};
use crate::error::{PensionError, PensionResult};

/// Strip whitespace, a leading currency sign and thousands separators
fn normalize_number(input: &str) -> String {
    input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect()
}

fn parse_decimal(input: &str, field: &str) -> PensionResult<f64> {
    let cleaned = normalize_number(input);
    let value: f64 = cleaned
        .parse()
        .map_err(|_| PensionError::shape(format!("{} must be a number (got '{}')", field, input.trim())))?;

    if !value.is_finite() {
        return Err(PensionError::shape(format!("{} must be a finite number", field)));
    }
    Ok(value)
}

fn parse_whole(input: &str, field: &str) -> PensionResult<u32> {
    normalize_number(input).parse().map_err(|_| {
        PensionError::shape(format!("{} must be a non-negative whole number (got '{}')", field, input.trim()))
    })
}

/// Base liquidation income. Zero and negative values parse; the calculator rejects them.
pub fn parse_base_income(input: &str) -> PensionResult<f64> {
    parse_decimal(input, "base income")
}

pub fn parse_weeks(input: &str) -> PensionResult<u32> {
    parse_whole(input, "weeks contributed")
}

pub fn parse_age(input: &str) -> PensionResult<u32> {
    parse_whole(input, "age")
}

/// Disability-loss percentage, restricted to [0, 100]
pub fn parse_loss_percent(input: &str) -> PensionResult<f64> {
    let value = parse_decimal(input.trim().trim_end_matches('%'), "disability loss percent")?;
    if !(0.0..=100.0).contains(&value) {
        return Err(PensionError::shape(format!(
            "disability loss percent must be between 0 and 100 (got {})",
            value
        )));
    }
    Ok(value)
}

pub fn parse_pension_type(input: &str) -> PensionResult<PensionType> {
    input.parse()
}

pub fn parse_gender(input: &str) -> PensionResult<Gender> {
    input.parse()
}
