// Drive motor sizing for Mecanum, Omni and Kiwi robots
//
// Provides:
// - One-time parsing of raw field text into numbers
// - Field validation with a complete, field-keyed error map
// - Torque and speed requirements for each wheel type

pub mod calculator;
pub mod inputs;
pub mod validator;
mod wheel;

pub use calculator::{CalculationResult, KIWI_EFFECTIVE_MOTORS, OmniDetails, TorqueCalculator};
pub use inputs::{DriveInputs, InputField, ParsedInputs, RawInputs, Reading};
pub use validator::{
    KIWI_MOTORS, ValidationError, ValidationErrors, ValidationResult, validate, validate_parsed,
};
pub use wheel::WheelType;
