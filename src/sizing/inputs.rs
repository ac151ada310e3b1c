// Raw form values and their one-time conversion into numbers
//
// Text arrives from a form, a JSON document or the command line. It is read
// exactly once here; the validator and calculator only see typed values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validator::{self, ValidationErrors};
use super::wheel::WheelType;

/// Every field a caller may supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    Mass,
    Vmax,
    WheelDiameter,
    AccelTime,
    NumMotors,
    Alignment,
    KiwiDrive,
}

impl InputField {
    /// Fields every wheel type needs
    pub const BASE: [InputField; 5] = [
        InputField::Mass,
        InputField::Vmax,
        InputField::WheelDiameter,
        InputField::AccelTime,
        InputField::NumMotors,
    ];

    /// Fields only read for omni wheels
    pub const OMNI: [InputField; 2] = [InputField::Alignment, InputField::KiwiDrive];

    /// Key used in raw input maps and error reports
    pub fn key(&self) -> &'static str {
        match self {
            InputField::Mass => "mass",
            InputField::Vmax => "vmax",
            InputField::WheelDiameter => "wheelDiameter",
            InputField::AccelTime => "accelTime",
            InputField::NumMotors => "numMotors",
            InputField::Alignment => "alignment",
            InputField::KiwiDrive => "kiwiDrive",
        }
    }

    /// Human label with units, for prompts and text output
    pub fn label(&self) -> &'static str {
        match self {
            InputField::Mass => "Robot mass (kg)",
            InputField::Vmax => "Max speed (m/s)",
            InputField::WheelDiameter => "Wheel diameter (mm)",
            InputField::AccelTime => "Time to max speed (s)",
            InputField::NumMotors => "Number of motors",
            InputField::Alignment => "Roller alignment (deg)",
            InputField::KiwiDrive => "Kiwi drive (yes/no)",
        }
    }

    /// Fields read for a given wheel type, in form order
    pub fn for_wheel(wheel: WheelType) -> Vec<InputField> {
        let mut fields = InputField::BASE.to_vec();
        if wheel.is_omni() {
            fields.extend_from_slice(&InputField::OMNI);
        }
        fields
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Flat field name -> text mapping as received from outside
///
/// JSON documents may use numbers or booleans for values; they are kept as
/// their text form. `null` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct RawInputs {
    fields: BTreeMap<String, String>,
}

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and hosts
    pub fn with(mut self, field: InputField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        self.fields.insert(field.key().to_string(), value.into());
    }

    pub fn remove(&mut self, field: InputField) -> Option<String> {
        self.fields.remove(field.key())
    }

    pub fn get(&self, field: InputField) -> Option<&str> {
        self.fields.get(field.key()).map(String::as_str)
    }

    /// Copy every value from `other` over this one
    pub fn merge(&mut self, other: RawInputs) {
        self.fields.extend(other.fields);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for RawInputs {
    fn from(map: BTreeMap<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Result of reading one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Missing or blank
    Absent,
    /// Present but not a decimal number
    Unparsable,
    Value(f64),
}

impl Reading {
    pub fn parse(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            None | Some("") => Reading::Absent,
            Some(s) => s.parse::<f64>().map_or(Reading::Unparsable, Reading::Value),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Read a boolean-like flag. Missing or blank means off, unknown words give `None`.
pub fn parse_flag(text: Option<&str>) -> Option<bool> {
    let Some(text) = text.map(str::trim) else {
        return Some(false);
    };
    match text.to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Some(false),
        "true" | "1" | "yes" | "on" => Some(true),
        _ => None,
    }
}

/// Raw inputs after the single boundary parse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedInputs {
    pub mass: Reading,
    pub vmax: Reading,
    pub wheel_diameter: Reading,
    pub accel_time: Reading,
    pub num_motors: Reading,
    pub alignment: Reading,
    /// `None` when the flag text is not a recognised boolean
    pub kiwi_drive: Option<bool>,
}

impl ParsedInputs {
    pub fn parse(raw: &RawInputs) -> Self {
        Self {
            mass: Reading::parse(raw.get(InputField::Mass)),
            vmax: Reading::parse(raw.get(InputField::Vmax)),
            wheel_diameter: Reading::parse(raw.get(InputField::WheelDiameter)),
            accel_time: Reading::parse(raw.get(InputField::AccelTime)),
            num_motors: Reading::parse(raw.get(InputField::NumMotors)),
            alignment: Reading::parse(raw.get(InputField::Alignment)),
            kiwi_drive: parse_flag(raw.get(InputField::KiwiDrive)),
        }
    }
}

/// Validated, typed inputs for the calculator
///
/// Produced by [`DriveInputs::from_raw`]. Values built by hand skip
/// validation; the calculator does not re-check them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveInputs {
    /// kg
    pub mass: f64,
    /// m/s
    pub vmax: f64,
    pub wheel_diameter_mm: f64,
    /// s
    pub accel_time: f64,
    pub num_motors: u32,
    /// Roller alignment in degrees, 0 for non-omni wheels
    pub alignment_deg: f64,
    pub kiwi_drive: bool,
}

impl DriveInputs {
    /// Parse and validate in one step
    pub fn from_raw(raw: &RawInputs, wheel: WheelType) -> Result<Self, ValidationErrors> {
        Self::from_parsed(&ParsedInputs::parse(raw), wheel)
    }

    pub fn from_parsed(parsed: &ParsedInputs, wheel: WheelType) -> Result<Self, ValidationErrors> {
        validator::check(parsed, wheel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_parse() {
        assert_eq!(Reading::parse(None), Reading::Absent);
        assert_eq!(Reading::parse(Some("")), Reading::Absent);
        assert_eq!(Reading::parse(Some("   ")), Reading::Absent);
        assert_eq!(Reading::parse(Some("12.5")), Reading::Value(12.5));
        assert_eq!(Reading::parse(Some(" -3 ")), Reading::Value(-3.0));
        assert_eq!(Reading::parse(Some("1e2")), Reading::Value(100.0));
        assert_eq!(Reading::parse(Some("abc")), Reading::Unparsable);
        assert_eq!(Reading::parse(Some("10kg")), Reading::Unparsable);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(None), Some(false));
        assert_eq!(parse_flag(Some("")), Some(false));
        assert_eq!(parse_flag(Some("TRUE")), Some(true));
        assert_eq!(parse_flag(Some("yes")), Some(true));
        assert_eq!(parse_flag(Some("1")), Some(true));
        assert_eq!(parse_flag(Some("off")), Some(false));
        assert_eq!(parse_flag(Some("maybe")), None);
    }

    #[test]
    fn test_raw_inputs_from_json_values() {
        let raw: RawInputs = serde_json::from_str(
            r#"{ "mass": 10, "vmax": "1.5", "kiwiDrive": true, "alignment": null }"#,
        )
        .unwrap();
        assert_eq!(raw.get(InputField::Mass), Some("10"));
        assert_eq!(raw.get(InputField::Vmax), Some("1.5"));
        assert_eq!(raw.get(InputField::KiwiDrive), Some("true"));
        assert_eq!(raw.get(InputField::Alignment), None);
    }

    #[test]
    fn test_raw_inputs_merge_overrides() {
        let mut base = RawInputs::new()
            .with(InputField::Mass, "10")
            .with(InputField::Vmax, "1");
        base.merge(RawInputs::new().with(InputField::Mass, "12"));
        assert_eq!(base.get(InputField::Mass), Some("12"));
        assert_eq!(base.get(InputField::Vmax), Some("1"));
    }

    #[test]
    fn test_fields_for_wheel() {
        assert_eq!(InputField::for_wheel(WheelType::Mecanum).len(), 5);
        let omni = InputField::for_wheel(WheelType::Kiwi);
        assert_eq!(omni.len(), 7);
        assert_eq!(omni[5], InputField::Alignment);
    }

    #[test]
    fn test_field_keys_match_serde_names() {
        for field in InputField::BASE.iter().chain(InputField::OMNI.iter()) {
            let json = serde_json::to_string(field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.key()));
        }
    }

    #[test]
    fn test_parsed_inputs_reads_all_fields() {
        let raw: RawInputs = [
            ("mass", "10"),
            ("vmax", "x"),
            ("numMotors", "4"),
            ("kiwiDrive", "on"),
        ]
        .into_iter()
        .collect();
        let parsed = ParsedInputs::parse(&raw);
        assert_eq!(parsed.mass, Reading::Value(10.0));
        assert_eq!(parsed.vmax, Reading::Unparsable);
        assert_eq!(parsed.wheel_diameter, Reading::Absent);
        assert_eq!(parsed.num_motors.value(), Some(4.0));
        assert_eq!(parsed.kiwi_drive, Some(true));
    }
}
