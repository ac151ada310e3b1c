// Wheel geometry variants understood by the validator and calculator

use std::fmt;

use serde::{Deserialize, Serialize};

/// Drive wheel configuration
///
/// Standard and Mecanum share the plain rolling model. Omni adds the roller
/// alignment projection, and Kiwi is an Omni base with three wheels at 120°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WheelType {
    Standard,
    Mecanum,
    Omni,
    Kiwi,
}

impl WheelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WheelType::Standard => "standard",
            WheelType::Mecanum => "mecanum",
            WheelType::Omni => "omni",
            WheelType::Kiwi => "omni",
        }
    }

    /// True for variants that take an alignment angle and Kiwi flag
    pub fn is_omni(&self) -> bool {
        matches!(self, WheelType::Omni | WheelType::Kiwi)
    }

    /// Variant reported in results: Kiwi is an Omni base with the Kiwi flag set
    pub fn reported(&self) -> WheelType {
        match self {
            WheelType::Kiwi => WheelType::Omni,
            other => *other,
        }
    }
}

impl fmt::Display for WheelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelType::Kiwi => f.write_str("kiwi"),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omni_variants() {
        assert!(!WheelType::Standard.is_omni());
        assert!(!WheelType::Mecanum.is_omni());
        assert!(WheelType::Omni.is_omni());
        assert!(WheelType::Kiwi.is_omni());
    }

    #[test]
    fn test_kiwi_reports_as_omni() {
        assert_eq!(WheelType::Kiwi.reported(), WheelType::Omni);
        assert_eq!(WheelType::Mecanum.reported(), WheelType::Mecanum);
        assert_eq!(
            serde_json::to_string(&WheelType::Kiwi.reported()).unwrap(),
            "\"omni\""
        );
        assert_eq!(WheelType::Kiwi.to_string(), "kiwi");
    }
}
