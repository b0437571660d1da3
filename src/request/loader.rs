//! Load pension requests from a batch CSV file

use super::parse::{
    parse_age, parse_base_income, parse_gender, parse_loss_percent, parse_pension_type,
    parse_weeks,
};
use super::{PensionRequest, PensionType, RequestFields};
use crate::error::{PensionError, PensionResult};
use csv::{ReaderBuilder, Trim};
use log::warn;
use std::path::Path;

/// Default location of the sample batch
pub const DEFAULT_REQUESTS_PATH: &str = "data/sample_requests.csv";

/// Raw CSV row matching the batch request columns
///
/// Everything is read as text so a bad value becomes a per-row shape error
/// instead of failing the whole file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct CsvRow {
    #[serde(rename = "RequestID")]
    request_id: Option<String>,
    #[serde(rename = "PensionType")]
    pension_type: Option<String>,
    #[serde(rename = "BaseIncome")]
    base_income: Option<String>,
    #[serde(rename = "WeeksContributed")]
    weeks_contributed: Option<String>,
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "Age")]
    age: Option<String>,
    #[serde(rename = "LossPercent")]
    loss_percent: Option<String>,
}

/// One row of a batch: its identifier and either a request or the reason it could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub id: String,
    pub pension_type: Option<PensionType>,
    pub request: PensionResult<PensionRequest>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_optional<T>(
    field: &Option<String>,
    parse: fn(&str) -> PensionResult<T>,
) -> PensionResult<Option<T>> {
    present(field).map(parse).transpose()
}

impl CsvRow {
    fn to_record(self, line: usize) -> RequestRecord {
        let id = present(&self.request_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{}", line));

        let pension_type = present(&self.pension_type)
            .ok_or_else(|| PensionError::shape("pension type is required"))
            .and_then(parse_pension_type);

        let request = pension_type
            .clone()
            .and_then(|pension_type| self.fields(pension_type)?.build(pension_type));

        if let Err(ref err) = request {
            warn!("Request {}: {}", id, err);
        }

        RequestRecord {
            id,
            pension_type: pension_type.ok(),
            request,
        }
    }

    /// Parse only the columns the pension type uses; stray values in unused
    /// columns are ignored.
    fn fields(&self, pension_type: PensionType) -> PensionResult<RequestFields> {
        Ok(RequestFields {
            base_income: parse_optional(&self.base_income, parse_base_income)?,
            weeks_contributed: parse_optional(&self.weeks_contributed, parse_weeks)?,
            gender: if pension_type.requires_gender() {
                parse_optional(&self.gender, parse_gender)?
            } else {
                None
            },
            age: if pension_type.requires_age() {
                parse_optional(&self.age, parse_age)?
            } else {
                None
            },
            loss_percent: if pension_type.requires_loss_percent() {
                parse_optional(&self.loss_percent, parse_loss_percent)?
            } else {
                None
            },
        })
    }
}

fn read_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> csv::Result<Vec<RequestRecord>> {
    let mut records = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        records.push(row.to_record(idx + 1));
    }

    Ok(records)
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.trim(Trim::All).flexible(true);
    builder
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> csv::Result<Vec<RequestRecord>> {
    read_records(builder().from_path(path)?)
}

/// Load requests from any reader (e.g., string buffer, stdin)
pub fn load_requests_from_reader<R: std::io::Read>(reader: R) -> csv::Result<Vec<RequestRecord>> {
    read_records(builder().from_reader(reader))
}

/// Load requests from the default sample location
pub fn load_default_requests() -> csv::Result<Vec<RequestRecord>> {
    load_requests(DEFAULT_REQUESTS_PATH)
}
