// Command-line arguments
//
// Field values are taken as text and handed to the library untouched, so the
// command line goes through the same parsing and validation as any other
// source of raw inputs.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::config::{ConfigError, ConstantOverrides, PhysicalConstants};
use crate::sizing::{InputField, RawInputs, WheelType};

/// Motor torque and speed sizing for Mecanum, Omni and Kiwi drive robots
#[derive(Parser, Debug, Clone)]
#[command(name = "drive-torque-calc", version)]
pub struct Cli {
    /// Wheel configuration
    #[arg(long, value_enum, default_value_t = WheelType::Mecanum)]
    pub wheel: WheelType,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// JSON object of raw field values ("-" reads stdin). Flags given on the
    /// command line take precedence over values in the file.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Prompt for missing fields, then re-prompt any that fail validation
    #[arg(long, short = 'i', default_value_t = false)]
    pub interactive: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub physics: ConstantArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Raw field values
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Robot mass (kg)
    #[arg(long, allow_hyphen_values = true)]
    pub mass: Option<String>,

    /// Target top speed (m/s)
    #[arg(long, allow_hyphen_values = true)]
    pub vmax: Option<String>,

    /// Wheel diameter (mm)
    #[arg(long, allow_hyphen_values = true)]
    pub wheel_diameter: Option<String>,

    /// Time to reach top speed from rest (s)
    #[arg(long, allow_hyphen_values = true)]
    pub accel_time: Option<String>,

    /// Number of drive motors
    #[arg(long, allow_hyphen_values = true)]
    pub num_motors: Option<String>,

    /// Roller alignment angle in degrees (omni wheels)
    #[arg(long, allow_hyphen_values = true)]
    pub alignment: Option<String>,

    /// Three-wheel Kiwi base (omni wheels)
    #[arg(long, default_value_t = false)]
    pub kiwi_drive: bool,
}

impl FieldArgs {
    /// Values given on the command line, keyed like any other raw input
    pub fn to_raw(&self) -> RawInputs {
        let mut raw = RawInputs::new();
        let values = [
            (InputField::Mass, &self.mass),
            (InputField::Vmax, &self.vmax),
            (InputField::WheelDiameter, &self.wheel_diameter),
            (InputField::AccelTime, &self.accel_time),
            (InputField::NumMotors, &self.num_motors),
            (InputField::Alignment, &self.alignment),
        ];
        for (field, value) in values {
            if let Some(text) = value {
                raw.set(field, text.clone());
            }
        }
        // Absent flag leaves any value from an input file in place
        if self.kiwi_drive {
            raw.set(InputField::KiwiDrive, "true");
        }
        raw
    }
}

/// Physical constant sources
#[derive(Args, Debug, Clone, Default)]
pub struct ConstantArgs {
    /// JSON file with any of: g, mu, eta, safetyFactor
    #[arg(long, value_name = "FILE")]
    pub constants: Option<PathBuf>,

    /// Gravitational acceleration (m/s²)
    #[arg(long, allow_negative_numbers = true)]
    pub gravity: Option<f64>,

    /// Kinetic friction coefficient
    #[arg(long, allow_negative_numbers = true)]
    pub friction: Option<f64>,

    /// Drivetrain efficiency, 0 < eta <= 1
    #[arg(long, allow_negative_numbers = true)]
    pub efficiency: Option<f64>,

    /// Safety factor applied to the per-motor torque, >= 1
    #[arg(long, allow_negative_numbers = true)]
    pub safety_factor: Option<f64>,
}

impl ConstantArgs {
    /// Defaults, then the constants file, then individual flags
    pub fn load(&self) -> Result<PhysicalConstants, ConfigError> {
        let base = match &self.constants {
            Some(path) => PhysicalConstants::from_json_file(path)?,
            None => PhysicalConstants::default(),
        };
        base.with_overrides(&ConstantOverrides {
            g: self.gravity,
            mu: self.friction,
            eta: self.efficiency,
            safety_factor: self.safety_factor,
        })
    }
}
