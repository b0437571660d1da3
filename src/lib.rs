//! Pension System - replacement-rate and monthly-payment calculator
//!
//! This library provides:
//! - Old-age, survivor and disability replacement-rate rules
//! - Monthly payment calculation with the old-age minimum wage floor
//! - Legal constants grouped per regime
//! - An interactive console menu and a parallel batch runner

pub mod error;
pub mod regime;
pub mod request;
pub mod calculation;
pub mod format;
pub mod console;
pub mod batch;

// Re-export commonly used types
pub use error::{PensionError, PensionResult};
pub use regime::{PensionRegime, MINIMUM_WAGE_2026};
pub use request::{Gender, PensionRequest, PensionType};
pub use calculation::{
    compute_payment, compute_replacement_rate, MonthlyPayment, PensionCalculator, PensionQuote,
    ReplacementRate,
};
pub use batch::BatchRunner;
