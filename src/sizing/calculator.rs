// Drive motor torque and speed requirements
//
// Plain rolling model: the wheel turns 1:1 with the motor shaft, the robot
// accelerates uniformly from rest to top speed, and the load is shared evenly
// across the driving motors.
//
// Omni wheels project the travel speed onto the roller rolling direction by
// cos(alignment). A Kiwi base has three wheels but only two push along any
// instantaneous direction of travel.

use std::f64::consts::PI;

use serde::Serialize;
use tracing::debug;

use super::inputs::DriveInputs;
use super::wheel::WheelType;
use crate::config::PhysicalConstants;

/// Motors assumed to deliver torque at once on a Kiwi base
pub const KIWI_EFFECTIVE_MOTORS: u32 = 2;

/// Derived quantities for one calculation, SI units unless noted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Motor shaft speed (rev/min)
    pub rpm: f64,
    pub friction_force: f64,     // N
    pub acceleration_force: f64, // N
    pub total_force: f64,        // N
    pub wheel_radius: f64,       // m
    pub total_torque: f64,       // N·m, all wheels together
    pub torque_per_motor: f64,   // N·m, before the safety factor
    pub final_torque: f64,       // N·m, rated torque to look for
    pub wheel_type: WheelType,
    #[serde(flatten)]
    pub omni: Option<OmniDetails>,
}

/// Extra values reported for omni wheels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OmniDetails {
    /// Degrees, as given
    pub alignment_angle: f64,
    pub cos_theta: f64,
    pub kiwi_drive: bool,
    pub effective_motors: u32,
}

/// Calculator over a fixed set of physical constants
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TorqueCalculator {
    constants: PhysicalConstants,
}

impl TorqueCalculator {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Compute requirements for any wheel type
    pub fn calculate(&self, inputs: &DriveInputs, wheel: WheelType) -> CalculationResult {
        let result = match wheel {
            WheelType::Standard | WheelType::Mecanum => {
                let mut result = self.calculate_standard(inputs);
                result.wheel_type = wheel;
                result
            }
            WheelType::Omni => self.calculate_omni(inputs),
            WheelType::Kiwi => self.calculate_omni(&DriveInputs {
                kiwi_drive: true,
                ..*inputs
            }),
        };

        debug!(
            "{} drive: rpm={:.2}, total_force={:.4} N, final_torque={:.4} N·m",
            wheel, result.rpm, result.total_force, result.final_torque
        );
        result
    }

    /// Standard and Mecanum wheels: full speed along the wheel, every motor driving
    pub fn calculate_standard(&self, inputs: &DriveInputs) -> CalculationResult {
        self.solve(inputs, 1.0, inputs.num_motors, WheelType::Mecanum)
    }

    /// Omni wheels, with the Kiwi rule when `inputs.kiwi_drive` is set
    pub fn calculate_omni(&self, inputs: &DriveInputs) -> CalculationResult {
        let theta = inputs.alignment_deg.to_radians();
        let cos_theta = theta.cos();

        let effective_motors = if inputs.kiwi_drive {
            KIWI_EFFECTIVE_MOTORS
        } else {
            inputs.num_motors
        };

        let mut result = self.solve(inputs, cos_theta, effective_motors, WheelType::Omni);
        result.omni = Some(OmniDetails {
            alignment_angle: inputs.alignment_deg,
            cos_theta,
            kiwi_drive: inputs.kiwi_drive,
            effective_motors,
        });
        result
    }

    /// Shared force and torque chain
    ///
    /// `projection` scales the travel speed seen by the wheel; 1.0 leaves the
    /// plain rolling formulas unchanged.
    fn solve(
        &self,
        inputs: &DriveInputs,
        projection: f64,
        driving_motors: u32,
        wheel_type: WheelType,
    ) -> CalculationResult {
        let PhysicalConstants {
            g,
            mu,
            eta,
            safety_factor,
        } = self.constants;

        // mm -> m
        let diameter = inputs.wheel_diameter_mm / 1000.0;
        let radius = diameter / 2.0;

        let rpm = (inputs.vmax * projection * 60.0) / (PI * diameter);

        let friction_force = inputs.mass * mu * g;
        let acceleration_force = inputs.mass * (inputs.vmax * projection / inputs.accel_time);
        let total_force = friction_force + acceleration_force;

        let total_torque = total_force * radius;
        let torque_per_motor = total_torque / (driving_motors as f64 * eta);
        let final_torque = safety_factor * torque_per_motor;

        CalculationResult {
            rpm,
            friction_force,
            acceleration_force,
            total_force,
            wheel_radius: radius,
            total_torque,
            torque_per_motor,
            final_torque,
            wheel_type,
            omni: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample_inputs() -> DriveInputs {
        DriveInputs {
            mass: 10.0,
            vmax: 1.0,
            wheel_diameter_mm: 100.0,
            accel_time: 2.0,
            num_motors: 4,
            alignment_deg: 0.0,
            kiwi_drive: false,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_standard_literal_case() {
        let result = TorqueCalculator::default().calculate(&sample_inputs(), WheelType::Standard);
        println!("Standard: {:?}", result);

        assert!(close(result.wheel_radius, 0.05));
        assert!(close(result.rpm, 60.0 / (PI * 0.1)));
        assert!((result.rpm - 190.99).abs() < 0.01);
        assert!(close(result.friction_force, 3.92));
        assert!(close(result.acceleration_force, 5.0));
        assert!(close(result.total_force, 8.92));
        assert!(close(result.total_torque, 0.446));
        assert!(close(result.torque_per_motor, 0.139375));
        assert!(close(result.final_torque, 0.2090625));
        assert_eq!(result.wheel_type, WheelType::Standard);
        assert!(result.omni.is_none());
    }

    #[test]
    fn test_mecanum_matches_standard() {
        let calc = TorqueCalculator::default();
        let standard = calc.calculate(&sample_inputs(), WheelType::Standard);
        let mecanum = calc.calculate(&sample_inputs(), WheelType::Mecanum);
        assert_eq!(mecanum.wheel_type, WheelType::Mecanum);
        assert_eq!(
            CalculationResult {
                wheel_type: WheelType::Standard,
                ..mecanum
            },
            standard
        );
    }

    #[test]
    fn test_omni_zero_alignment_equals_standard() {
        let calc = TorqueCalculator::default();
        let standard = calc.calculate(&sample_inputs(), WheelType::Standard);
        let omni = calc.calculate(&sample_inputs(), WheelType::Omni);

        // Bit-identical, not just close
        assert_eq!(omni.rpm.to_bits(), standard.rpm.to_bits());
        assert_eq!(omni.friction_force.to_bits(), standard.friction_force.to_bits());
        assert_eq!(omni.acceleration_force.to_bits(), standard.acceleration_force.to_bits());
        assert_eq!(omni.total_force.to_bits(), standard.total_force.to_bits());
        assert_eq!(omni.wheel_radius.to_bits(), standard.wheel_radius.to_bits());
        assert_eq!(omni.total_torque.to_bits(), standard.total_torque.to_bits());
        assert_eq!(omni.torque_per_motor.to_bits(), standard.torque_per_motor.to_bits());
        assert_eq!(omni.final_torque.to_bits(), standard.final_torque.to_bits());

        let details = omni.omni.unwrap();
        assert_eq!(details.cos_theta, 1.0);
        assert_eq!(details.effective_motors, 4);
        assert!(!details.kiwi_drive);
        assert_eq!(omni.wheel_type, WheelType::Omni);
    }

    #[test]
    fn test_omni_perpendicular_rollers() {
        let inputs = DriveInputs {
            alignment_deg: 90.0,
            ..sample_inputs()
        };
        let result = TorqueCalculator::default().calculate(&inputs, WheelType::Omni);
        println!("Omni 90deg: {:?}", result);

        assert!(result.omni.unwrap().cos_theta.abs() < 1e-12);
        assert!(result.rpm.abs() < 1e-9);
        assert!(result.acceleration_force.abs() < 1e-9);
        assert!(close(result.friction_force, 3.92));
        assert_eq!(result.omni.unwrap().alignment_angle, 90.0);
    }

    #[test]
    fn test_omni_45_degrees_scales_speed_terms() {
        let inputs = DriveInputs {
            alignment_deg: 45.0,
            ..sample_inputs()
        };
        let calc = TorqueCalculator::default();
        let standard = calc.calculate(&sample_inputs(), WheelType::Standard);
        let omni = calc.calculate(&inputs, WheelType::Omni);
        let cos45 = (PI / 4.0).cos();

        assert!(close(omni.rpm, standard.rpm * cos45));
        assert!(close(omni.acceleration_force, standard.acceleration_force * cos45));
        assert!(close(omni.friction_force, standard.friction_force));
    }

    #[test]
    fn test_kiwi_uses_two_effective_motors() {
        let inputs = DriveInputs {
            num_motors: 3,
            ..sample_inputs()
        };
        let calc = TorqueCalculator::default();
        let kiwi = calc.calculate(&inputs, WheelType::Kiwi);
        let details = kiwi.omni.unwrap();

        assert!(details.kiwi_drive);
        assert_eq!(details.effective_motors, KIWI_EFFECTIVE_MOTORS);
        assert_eq!(kiwi.wheel_type, WheelType::Omni);
        assert!(close(kiwi.torque_per_motor, 0.446 / (2.0 * 0.8)));

        // Omni with the flag set is the same thing
        let flagged = calc.calculate(
            &DriveInputs {
                kiwi_drive: true,
                ..inputs
            },
            WheelType::Omni,
        );
        assert_eq!(flagged, kiwi);
    }

    #[test]
    fn test_repeated_calls_identical() {
        let calc = TorqueCalculator::default();
        let inputs = DriveInputs {
            alignment_deg: 30.0,
            ..sample_inputs()
        };
        let first = calc.calculate(&inputs, WheelType::Omni);
        let second = calc.calculate(&inputs, WheelType::Omni);
        assert_eq!(first.final_torque.to_bits(), second.final_torque.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_alternate_constants() {
        let constants = PhysicalConstants::new(9.8, 0.04, 1.0, 1.0).unwrap();
        let result =
            TorqueCalculator::new(constants).calculate(&sample_inputs(), WheelType::Standard);
        // No losses and no margin: final torque is the even share of the load
        assert!(close(result.final_torque, 0.446 / 4.0));
        assert!(close(result.torque_per_motor, result.final_torque));

        let steep = PhysicalConstants::new(9.8, 0.08, 0.8, 1.5).unwrap();
        let result = TorqueCalculator::new(steep).calculate(&sample_inputs(), WheelType::Standard);
        assert!(close(result.friction_force, 7.84));
    }

    #[test]
    fn test_result_json_shape() {
        let calc = TorqueCalculator::default();
        let standard =
            serde_json::to_value(calc.calculate(&sample_inputs(), WheelType::Mecanum)).unwrap();
        assert_eq!(standard["wheelType"], "mecanum");
        assert!(standard.get("finalTorque").is_some());
        assert!(standard.get("wheelRadius").is_some());
        assert!(standard.get("cosTheta").is_none());

        let inputs = DriveInputs {
            num_motors: 3,
            ..sample_inputs()
        };
        let kiwi = serde_json::to_value(calc.calculate(&inputs, WheelType::Kiwi)).unwrap();
        assert_eq!(kiwi["wheelType"], "omni");
        assert_eq!(kiwi["kiwiDrive"], true);
        assert_eq!(kiwi["effectiveMotors"], 2);
        assert_eq!(kiwi["alignmentAngle"], 0.0);
        assert_eq!(kiwi["cosTheta"], 1.0);
    }
}
