//! Print the reference pension scenarios with their computed rate and payment
//!
//! Each case lists the expected figures next to the computed ones so drift in
//! the rules shows up at a glance.

use pension_system::format::{format_currency, format_rate};
use pension_system::{Gender, PensionCalculator, PensionRegime, PensionRequest};

/// Reference scenario configuration
struct Scenario {
    name: &'static str,
    request: PensionRequest,
    /// Expected (rate, payment), or None when the request must be rejected
    expected: Option<(f64, f64)>,
}

fn main() {
    env_logger::init();

    let regime = PensionRegime::colombia_2026();
    println!("Reference scenarios ({}, minimum wage {})\n", regime.name, format_currency(regime.minimum_wage));

    let scenarios = vec![
        Scenario {
            name: "Old-age, male at minimum age",
            request: PensionRequest::old_age(3_000_000.0, 1300, Gender::Male, 62),
            expected: Some((64.64, 1_939_299.0)),
        },
        Scenario {
            name: "Old-age, female at minimum age",
            request: PensionRequest::old_age(5_000_000.0, 1300, Gender::Female, 57),
            expected: Some((64.07, 3_203_608.0)),
        },
        Scenario {
            name: "Old-age, rate capped at 80%",
            request: PensionRequest::old_age(10_000_000.0, 2000, Gender::Male, 62),
            expected: Some((80.00, 8_000_000.0)),
        },
        Scenario {
            name: "Survivor, 200 extra weeks",
            request: PensionRequest::survivor(3_500_000.0, 700),
            expected: Some((53.00, 1_855_000.0)),
        },
        Scenario {
            name: "Disability, moderate loss",
            request: PensionRequest::disability(2_800_000.0, 900, 53, 65.0),
            expected: Some((57.00, 1_596_000.0)),
        },
        Scenario {
            name: "Old-age, minimum wage floor",
            request: PensionRequest::old_age(1_400_000.0, 1400, Gender::Female, 57),
            expected: Some((68.10, 1_750_905.0)),
        },
        Scenario {
            name: "Old-age, male under minimum age",
            request: PensionRequest::old_age(2_700_000.0, 1300, Gender::Male, 50),
            expected: None,
        },
        Scenario {
            name: "Old-age, extra weeks",
            request: PensionRequest::old_age(2_500_000.0, 1500, Gender::Male, 62),
            expected: Some((70.79, 1_769_652.0)),
        },
        Scenario {
            name: "Disability, severe loss",
            request: PensionRequest::disability(4_000_000.0, 1000, 55, 70.0),
            expected: Some((74.00, 2_960_000.0)),
        },
    ];

    let calculator = PensionCalculator::new(regime);

    println!("{:<34} {:>9} {:>9} {:>14} {:>14}  {}",
        "Scenario", "Rate", "Expected", "Payment", "Expected", "Check");
    println!("{}", "-".repeat(92));

    let mut mismatches = 0;
    for scenario in &scenarios {
        match (calculator.calculate(&scenario.request), scenario.expected) {
            (Ok(quote), Some((rate, payment))) => {
                let ok = (quote.rate_percent() - rate).abs() < 0.005
                    && (quote.monthly_payment() - payment).abs() < 0.5;
                if !ok {
                    mismatches += 1;
                }
                println!("{:<34} {:>9} {:>9} {:>14} {:>14}  {}",
                    scenario.name,
                    format_rate(quote.rate_percent()),
                    format_rate(rate),
                    format_currency(quote.monthly_payment()),
                    format_currency(payment),
                    if ok { "ok" } else { "MISMATCH" },
                );
            }
            (Err(err), None) => {
                println!("{:<34} rejected as expected: {}", scenario.name, err);
            }
            (Ok(quote), None) => {
                mismatches += 1;
                println!("{:<34} expected rejection, got {}  MISMATCH",
                    scenario.name, format_rate(quote.rate_percent()));
            }
            (Err(err), Some(_)) => {
                mismatches += 1;
                println!("{:<34} unexpected error: {}  MISMATCH", scenario.name, err);
            }
        }
    }

    println!("\n{} scenarios, {} mismatches", scenarios.len(), mismatches);
}
