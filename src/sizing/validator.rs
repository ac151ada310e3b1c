// Field checks for drive inputs
//
// Every field is checked on every call so the caller can show all problems
// at once. Failures are returned as data, never as `Err` from `validate`.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::debug;

use super::inputs::{DriveInputs, InputField, ParsedInputs, RawInputs, Reading};
use super::wheel::WheelType;

/// Motor count a Kiwi base must have
pub const KIWI_MOTORS: u32 = 3;

/// Per-field validation failure. The display text is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Must be a positive number")]
    PositiveNumber,

    #[error("Must be a positive integer")]
    PositiveInteger,

    #[error("Kiwi Drive requires exactly 3 motors")]
    KiwiMotorCount,

    #[error("Must be a number")]
    Number,

    #[error("Must be true or false")]
    Boolean,
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Field-keyed error map, one entry per failing field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<InputField, ValidationError>,
}

impl ValidationErrors {
    /// Record an error, replacing any earlier one for the same field
    pub fn insert(&mut self, field: InputField, error: ValidationError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: InputField) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: InputField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failing fields in form order
    pub fn fields(&self) -> impl Iterator<Item = InputField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InputField, ValidationError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }
}

/// Outcome of [`validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    /// Never holds an empty map
    Invalid(ValidationErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(errors) => Some(errors),
        }
    }
}

/// Check raw inputs for the given wheel type
pub fn validate(raw: &RawInputs, wheel: WheelType) -> ValidationResult {
    validate_parsed(&ParsedInputs::parse(raw), wheel)
}

/// Check already-parsed inputs for the given wheel type
pub fn validate_parsed(parsed: &ParsedInputs, wheel: WheelType) -> ValidationResult {
    match check(parsed, wheel) {
        Ok(_) => ValidationResult::Valid,
        Err(errors) => ValidationResult::Invalid(errors),
    }
}

/// Run every check, returning typed inputs only when nothing failed
pub(crate) fn check(
    parsed: &ParsedInputs,
    wheel: WheelType,
) -> Result<DriveInputs, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let mut require = |field: InputField, value: Option<f64>, error: ValidationError| {
        if value.is_none() {
            errors.insert(field, error);
        }
        value
    };

    let mass = require(
        InputField::Mass,
        positive_number(parsed.mass),
        ValidationError::PositiveNumber,
    );
    let vmax = require(
        InputField::Vmax,
        positive_number(parsed.vmax),
        ValidationError::PositiveNumber,
    );
    let wheel_diameter = require(
        InputField::WheelDiameter,
        positive_number(parsed.wheel_diameter),
        ValidationError::PositiveNumber,
    );
    let accel_time = require(
        InputField::AccelTime,
        positive_number(parsed.accel_time),
        ValidationError::PositiveNumber,
    );
    let num_motors = positive_count(parsed.num_motors);
    if num_motors.is_none() {
        errors.insert(InputField::NumMotors, ValidationError::PositiveInteger);
    }

    let (alignment, kiwi_drive) = if wheel.is_omni() {
        let alignment = match parsed.alignment {
            Reading::Absent => Some(0.0),
            Reading::Value(v) if v.is_finite() => Some(v),
            _ => {
                errors.insert(InputField::Alignment, ValidationError::Number);
                None
            }
        };

        // The Kiwi variant implies the flag; plain Omni reads it from the inputs
        let kiwi_drive = match (wheel, parsed.kiwi_drive) {
            (WheelType::Kiwi, _) => true,
            (_, Some(flag)) => flag,
            (_, None) => {
                errors.insert(InputField::KiwiDrive, ValidationError::Boolean);
                false
            }
        };

        // Runs after the base check and replaces its message when both fail.
        // Only the whole part counts, so "3.5" keeps the integer message.
        let kiwi_count = match parsed.num_motors {
            Reading::Value(v) => v.trunc() == KIWI_MOTORS as f64,
            Reading::Absent | Reading::Unparsable => false,
        };
        if kiwi_drive && !kiwi_count {
            errors.insert(InputField::NumMotors, ValidationError::KiwiMotorCount);
        }
        (alignment, kiwi_drive)
    } else {
        (Some(0.0), false)
    };

    match (mass, vmax, wheel_diameter, accel_time, num_motors, alignment) {
        (
            Some(mass),
            Some(vmax),
            Some(wheel_diameter_mm),
            Some(accel_time),
            Some(num_motors),
            Some(alignment_deg),
        ) if errors.is_empty() => Ok(DriveInputs {
            mass,
            vmax,
            wheel_diameter_mm,
            accel_time,
            num_motors,
            alignment_deg,
            kiwi_drive,
        }),
        _ => {
            debug_assert!(!errors.is_empty());
            debug!("Validation failed for {} field(s) ({})", errors.len(), wheel);
            Err(errors)
        }
    }
}

/// Strictly positive and finite
fn positive_number(reading: Reading) -> Option<f64> {
    reading.value().filter(|v| v.is_finite() && *v > 0.0)
}

/// Whole number >= 1 that fits a motor count
fn positive_count(reading: Reading) -> Option<u32> {
    reading
        .value()
        .filter(|v| v.fract() == 0.0 && *v >= 1.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
}
