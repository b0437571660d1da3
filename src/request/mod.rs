//! Pension request data structures, input coercion and batch loading

mod data;
pub mod loader;
pub mod parse;

pub use data::{Gender, PensionRequest, PensionType, RequestFields};
pub use loader::{load_default_requests, load_requests, load_requests_from_reader, RequestRecord};
