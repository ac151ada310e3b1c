pub mod cli;
pub mod config;
pub mod error;
pub mod messages;
pub mod render;
pub mod runtime;
pub mod sizing;

pub use config::PhysicalConstants;
pub use error::{Error, Result};
pub use messages::{Report, evaluate};
pub use sizing::{
    CalculationResult, DriveInputs, RawInputs, TorqueCalculator, ValidationResult, WheelType,
    validate,
};
