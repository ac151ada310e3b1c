// Physical constants and their configuration
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// Default physical constants
pub const GRAVITY: f64 = 9.8; // m/s²
pub const FRICTION_COEFFICIENT: f64 = 0.04; // kinetic, wheel on floor
pub const EFFICIENCY: f64 = 0.8; // drivetrain, 0 < eta <= 1
pub const SAFETY_FACTOR: f64 = 1.5; // applied to the per-motor torque, >= 1

/// Error types for physical constant configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {name}: {value} ({requirement})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },
}

/// Immutable set of constants used by the torque calculation.
///
/// Files may name any subset of the fields; missing ones keep their default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicalConstants {
    /// Gravitational acceleration (m/s²)
    pub g: f64,
    /// Kinetic friction coefficient
    pub mu: f64,
    /// Drivetrain efficiency
    pub eta: f64,
    /// Multiplier on the per-motor torque
    pub safety_factor: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            g: GRAVITY,
            mu: FRICTION_COEFFICIENT,
            eta: EFFICIENCY,
            safety_factor: SAFETY_FACTOR,
        }
    }
}

/// Optional per-constant replacements, typically from command-line flags
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantOverrides {
    pub g: Option<f64>,
    pub mu: Option<f64>,
    pub eta: Option<f64>,
    pub safety_factor: Option<f64>,
}

impl PhysicalConstants {
    /// Create a checked set of constants
    pub fn new(g: f64, mu: f64, eta: f64, safety_factor: f64) -> Result<Self, ConfigError> {
        Self {
            g,
            mu,
            eta,
            safety_factor,
        }
        .validated()
    }

    /// Load constants from a JSON object file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        let constants: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: shown.clone(),
            source,
        })?;

        info!("Loaded physical constants from {}", shown);
        constants.validated()
    }

    /// Replace any constant named in `overrides`, then re-check the set
    pub fn with_overrides(self, overrides: &ConstantOverrides) -> Result<Self, ConfigError> {
        let mut out = self;
        if let Some(g) = overrides.g {
            warn!("Overriding gravity: {} -> {}", out.g, g);
            out.g = g;
        }
        if let Some(mu) = overrides.mu {
            warn!("Overriding friction coefficient: {} -> {}", out.mu, mu);
            out.mu = mu;
        }
        if let Some(eta) = overrides.eta {
            warn!("Overriding efficiency: {} -> {}", out.eta, eta);
            out.eta = eta;
        }
        if let Some(safety_factor) = overrides.safety_factor {
            warn!(
                "Overriding safety factor: {} -> {}",
                out.safety_factor, safety_factor
            );
            out.safety_factor = safety_factor;
        }
        out.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        check("g", self.g, self.g > 0.0, "must be > 0")?;
        check("mu", self.mu, self.mu >= 0.0, "must be >= 0")?;
        check(
            "eta",
            self.eta,
            self.eta > 0.0 && self.eta <= 1.0,
            "must be in (0, 1]",
        )?;
        check(
            "safetyFactor",
            self.safety_factor,
            self.safety_factor >= 1.0,
            "must be >= 1",
        )?;
        Ok(self)
    }
}

fn check(
    name: &'static str,
    value: f64,
    ok: bool,
    requirement: &'static str,
) -> Result<(), ConfigError> {
    // NaN fails every comparison, infinities are rejected explicitly
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value,
            requirement,
        })
    }
}
