//! Rate and payment calculators and the engine that chains them

mod engine;
mod payment;
mod rate;

pub use engine::{PensionCalculator, PensionQuote};
pub use payment::{compute_payment, MonthlyPayment};
pub use rate::{
    compute_replacement_rate, disability_rate, old_age_rate, survivor_rate, ReplacementRate,
};
