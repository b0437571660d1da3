//! Pension request data structures

use crate::error::{PensionError, PensionResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of pension being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PensionType {
    /// Vejez
    OldAge,
    /// Sobreviviente
    Survivor,
    /// Invalidez
    Disability,
}

impl PensionType {
    pub const ALL: [PensionType; 3] = [
        PensionType::OldAge,
        PensionType::Survivor,
        PensionType::Disability,
    ];

    /// Identifier used in CSV files and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            PensionType::OldAge => "OldAge",
            PensionType::Survivor => "Survivor",
            PensionType::Disability => "Disability",
        }
    }

    /// Label shown to people
    pub fn label(&self) -> &'static str {
        match self {
            PensionType::OldAge => "Old-age pension",
            PensionType::Survivor => "Survivor pension",
            PensionType::Disability => "Disability pension",
        }
    }

    /// Position in the console menu
    pub fn menu_option(&self) -> u8 {
        match self {
            PensionType::OldAge => 1,
            PensionType::Survivor => 2,
            PensionType::Disability => 3,
        }
    }

    pub fn from_menu_option(option: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.menu_option() == option)
    }

    /// Whether the request must carry a gender
    pub fn requires_gender(&self) -> bool {
        matches!(self, PensionType::OldAge)
    }

    /// Whether the request must carry an age
    pub fn requires_age(&self) -> bool {
        matches!(self, PensionType::OldAge | PensionType::Disability)
    }

    /// Whether the request must carry a disability-loss percentage
    pub fn requires_loss_percent(&self) -> bool {
        matches!(self, PensionType::Disability)
    }
}

impl fmt::Display for PensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PensionType {
    type Err = PensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "1" | "oldage" => Ok(PensionType::OldAge),
            "2" | "survivor" => Ok(PensionType::Survivor),
            "3" | "disability" => Ok(PensionType::Disability),
            _ => Err(PensionError::shape(format!("unknown pension type '{}'", s.trim()))),
        }
    }
}

/// Gender of the affiliate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Position in the gender sub-menu
    pub fn menu_option(&self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = PensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "m" | "male" => Ok(Gender::Male),
            "2" | "f" | "female" => Ok(Gender::Female),
            _ => Err(PensionError::shape(format!("unknown gender '{}'", s.trim()))),
        }
    }
}

/// A single pension request
///
/// One variant per pension type, each carrying exactly the fields its rules
/// read. Eligibility (positive income, minimum weeks, minimum age, loss
/// threshold) is checked by the rate calculator, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PensionRequest {
    OldAge {
        base_income: f64,
        weeks_contributed: u32,
        gender: Gender,
        age: u32,
    },
    Survivor {
        base_income: f64,
        weeks_contributed: u32,
    },
    Disability {
        base_income: f64,
        weeks_contributed: u32,
        age: u32,
        loss_percent: f64,
    },
}

impl PensionRequest {
    pub fn old_age(base_income: f64, weeks_contributed: u32, gender: Gender, age: u32) -> Self {
        PensionRequest::OldAge { base_income, weeks_contributed, gender, age }
    }

    pub fn survivor(base_income: f64, weeks_contributed: u32) -> Self {
        PensionRequest::Survivor { base_income, weeks_contributed }
    }

    pub fn disability(base_income: f64, weeks_contributed: u32, age: u32, loss_percent: f64) -> Self {
        PensionRequest::Disability { base_income, weeks_contributed, age, loss_percent }
    }

    pub fn pension_type(&self) -> PensionType {
        match self {
            PensionRequest::OldAge { .. } => PensionType::OldAge,
            PensionRequest::Survivor { .. } => PensionType::Survivor,
            PensionRequest::Disability { .. } => PensionType::Disability,
        }
    }

    pub fn base_income(&self) -> f64 {
        match *self {
            PensionRequest::OldAge { base_income, .. }
            | PensionRequest::Survivor { base_income, .. }
            | PensionRequest::Disability { base_income, .. } => base_income,
        }
    }

    pub fn weeks_contributed(&self) -> u32 {
        match *self {
            PensionRequest::OldAge { weeks_contributed, .. }
            | PensionRequest::Survivor { weeks_contributed, .. }
            | PensionRequest::Disability { weeks_contributed, .. } => weeks_contributed,
        }
    }
}

/// Loosely-typed request fields as gathered by an input layer
///
/// Every surface (console, CLI flags, CSV rows) fills this in and calls
/// [`RequestFields::build`], so a missing field is reported the same way
/// everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFields {
    pub base_income: Option<f64>,
    pub weeks_contributed: Option<u32>,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub loss_percent: Option<f64>,
}

impl RequestFields {
    /// Assemble a request of the given type, failing with a shape error when a
    /// required field is absent. Fields the type does not use are ignored.
    pub fn build(self, pension_type: PensionType) -> PensionResult<PensionRequest> {
        let base_income = required(self.base_income, "base income", pension_type)?;
        let weeks_contributed = required(self.weeks_contributed, "weeks contributed", pension_type)?;

        let request = match pension_type {
            PensionType::OldAge => PensionRequest::OldAge {
                base_income,
                weeks_contributed,
                gender: required(self.gender, "gender", pension_type)?,
                age: required(self.age, "age", pension_type)?,
            },
            PensionType::Survivor => PensionRequest::Survivor {
                base_income,
                weeks_contributed,
            },
            PensionType::Disability => PensionRequest::Disability {
                base_income,
                weeks_contributed,
                age: required(self.age, "age", pension_type)?,
                loss_percent: required(self.loss_percent, "disability loss percent", pension_type)?,
            },
        };

        Ok(request)
    }
}

fn required<T>(value: Option<T>, field: &str, pension_type: PensionType) -> PensionResult<T> {
    value.ok_or_else(|| {
        PensionError::shape(format!("{} is required for {}", field, pension_type.label().to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pension_type_parsing() {
        assert_eq!("OldAge".parse::<PensionType>().unwrap(), PensionType::OldAge);
        assert_eq!("old-age".parse::<PensionType>().unwrap(), PensionType::OldAge);
        assert_eq!(" survivor ".parse::<PensionType>().unwrap(), PensionType::Survivor);
        assert_eq!("3".parse::<PensionType>().unwrap(), PensionType::Disability);
        assert!(matches!(
            "retirement".parse::<PensionType>(),
            Err(PensionError::InvalidRequestShape(_))
        ));
    }

    #[test]
    fn test_menu_options() {
        for t in PensionType::ALL {
            assert_eq!(PensionType::from_menu_option(t.menu_option()), Some(t));
        }
        assert_eq!(PensionType::from_menu_option(4), None);
        assert_eq!("2".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(Gender::Male.menu_option(), 1);
    }

    #[test]
    fn test_request_accessors() {
        let request = PensionRequest::disability(2_800_000.0, 900, 53, 65.0);
        assert_eq!(request.pension_type(), PensionType::Disability);
        assert_eq!(request.base_income(), 2_800_000.0);
        assert_eq!(request.weeks_contributed(), 900);
    }

    #[test]
    fn test_build_ignores_unused_fields() {
        let fields = RequestFields {
            base_income: Some(3_500_000.0),
            weeks_contributed: Some(700),
            gender: Some(Gender::Male),
            age: Some(40),
            loss_percent: None,
        };

        let request = fields.build(PensionType::Survivor).unwrap();
        assert_eq!(request, PensionRequest::survivor(3_500_000.0, 700));
    }

    #[test]
    fn test_build_reports_missing_fields() {
        let fields = RequestFields {
            base_income: Some(3_000_000.0),
            weeks_contributed: Some(1300),
            gender: None,
            age: Some(62),
            loss_percent: None,
        };

        let err = fields.clone().build(PensionType::OldAge).unwrap_err();
        assert_eq!(
            err,
            PensionError::shape("gender is required for old-age pension")
        );

        let err = fields.build(PensionType::Disability).unwrap_err();
        assert_eq!(err.code(), "invalid_request_shape");
    }
}
