// Report handed to the presentation layer

use serde::Serialize;

use crate::config::PhysicalConstants;
use crate::sizing::{
    CalculationResult, DriveInputs, RawInputs, TorqueCalculator, ValidationErrors, WheelType,
};

/// Either every field error, or the full set of results. Never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Ok { results: CalculationResult },
    Invalid { errors: ValidationErrors },
}

impl Report {
    pub fn is_ok(&self) -> bool {
        matches!(self, Report::Ok { .. })
    }

    pub fn results(&self) -> Option<&CalculationResult> {
        match self {
            Report::Ok { results } => Some(results),
            Report::Invalid { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Report::Ok { .. } => None,
            Report::Invalid { errors } => Some(errors),
        }
    }
}

impl From<Result<CalculationResult, ValidationErrors>> for Report {
    fn from(outcome: Result<CalculationResult, ValidationErrors>) -> Self {
        match outcome {
            Ok(results) => Report::Ok { results },
            Err(errors) => Report::Invalid { errors },
        }
    }
}

/// Validate, then calculate only if nothing failed
pub fn evaluate(raw: &RawInputs, wheel: WheelType, constants: &PhysicalConstants) -> Report {
    let calculator = TorqueCalculator::new(*constants);
    DriveInputs::from_raw(raw, wheel)
        .map(|inputs| calculator.calculate(&inputs, wheel))
        .into()
}
