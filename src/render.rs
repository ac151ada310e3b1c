// Text and JSON rendering of reports
//
// Text output keeps the precision of the original form: RPM to 2 decimals,
// every other quantity to 4 decimals with its unit.

use crossterm::style::Stylize;

use crate::cli::OutputFormat;
use crate::config::PhysicalConstants;
use crate::messages::Report;
use crate::sizing::{CalculationResult, ValidationErrors};

const LABEL_WIDTH: usize = 20;

pub fn render(
    report: &Report,
    format: OutputFormat,
    constants: &PhysicalConstants,
    styled: bool,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Text => Ok(render_text(report, constants, styled)),
    }
}

pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn render_text(report: &Report, constants: &PhysicalConstants, styled: bool) -> String {
    match report {
        Report::Ok { results } => render_results(results, constants, styled),
        Report::Invalid { errors } => render_errors(errors, styled),
    }
}

/// One line per failing field, labelled the way the prompts are
pub fn render_errors(errors: &ValidationErrors, styled: bool) -> String {
    let mut out = heading("Invalid inputs", styled);
    out.push('\n');
    for (field, error) in errors.iter() {
        let message = failure(&error.to_string(), styled);
        out.push_str(&format!("  {}: {}\n", field.label(), message));
    }
    out
}

pub fn render_results(
    results: &CalculationResult,
    constants: &PhysicalConstants,
    styled: bool,
) -> String {
    let mut out = String::new();

    out.push_str(&heading(&title(results), styled));
    out.push('\n');
    row(
        &mut out,
        "Motor speed",
        highlight(format!("{:.2} RPM", results.rpm), styled),
    );
    row(
        &mut out,
        "Required torque",
        highlight(format!("{:.4} N·m per motor", results.final_torque), styled),
    );

    out.push('\n');
    out.push_str(&heading("Forces", styled));
    out.push('\n');
    row(&mut out, "Friction force", format!("{:.4} N", results.friction_force));
    row(&mut out, "Acceleration force", format!("{:.4} N", results.acceleration_force));
    row(&mut out, "Total force", format!("{:.4} N", results.total_force));

    out.push('\n');
    out.push_str(&heading("Torque", styled));
    out.push('\n');
    row(&mut out, "Wheel radius", format!("{:.4} m", results.wheel_radius));
    row(&mut out, "Total torque", format!("{:.4} N·m", results.total_torque));
    row(&mut out, "Torque per motor", format!("{:.4} N·m", results.torque_per_motor));
    row(&mut out, "Safety factor", format!("{}x", constants.safety_factor));

    if let Some(omni) = &results.omni {
        out.push('\n');
        out.push_str(&heading("Omni geometry", styled));
        out.push('\n');
        row(&mut out, "Roller alignment", format!("{:.2} deg", omni.alignment_angle));
        row(&mut out, "cos(theta)", format!("{:.4}", omni.cos_theta));
        row(&mut out, "Kiwi drive", if omni.kiwi_drive { "yes" } else { "no" }.to_string());
        row(&mut out, "Effective motors", omni.effective_motors.to_string());
    }

    out
}

fn title(results: &CalculationResult) -> String {
    let kiwi = results.omni.is_some_and(|omni| omni.kiwi_drive);
    let name = if kiwi {
        "Kiwi".to_string()
    } else {
        capitalize(results.wheel_type.as_str())
    };
    format!("{} drive requirements", name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn row(out: &mut String, label: &str, value: String) {
    out.push_str(&format!("  {:<width$} {}\n", label, value, width = LABEL_WIDTH));
}

fn heading(text: &str, styled: bool) -> String {
    if styled {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn highlight(text: String, styled: bool) -> String {
    if styled {
        text.green().bold().to_string()
    } else {
        text
    }
}

fn failure(text: &str, styled: bool) -> String {
    if styled {
        text.red().to_string()
    } else {
        text.to_string()
    }
}
