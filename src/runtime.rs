// Host pipeline: collect raw inputs, validate, calculate, print
//
// The core never sees where the text came from. This is the only place that
// touches files, stdin or stdout. Stdout carries only the report; prompts and
// re-prompt errors go to stderr so `--format json` output stays parseable.

use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::cli::{Cli, OutputFormat};
use crate::error::{Error, Result};
use crate::messages::{Report, evaluate};
use crate::render;
use crate::sizing::{DriveInputs, InputField, RawInputs, TorqueCalculator, WheelType};

/// How a run ended when no host error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Calculated,
    /// Inputs failed validation; errors were printed instead of results
    Rejected,
}

pub fn run(cli: &Cli) -> Result<Outcome> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let styled = cli.format == OutputFormat::Text && stdout.is_terminal();
    run_with(
        cli,
        &mut stdin.lock(),
        &mut io::stderr(),
        &mut stdout.lock(),
        styled,
    )
}

/// [`run`] over explicit streams: `input` feeds `--input -` and the prompts,
/// `prompts` receives the interactive dialogue, `out` receives the report.
pub fn run_with<R: BufRead, P: Write, W: Write>(
    cli: &Cli,
    input: &mut R,
    prompts: &mut P,
    out: &mut W,
    styled: bool,
) -> Result<Outcome> {
    let constants = cli.physics.load()?;
    info!(
        "Physical constants: g={}, mu={}, eta={}, safety_factor={}",
        constants.g, constants.mu, constants.eta, constants.safety_factor
    );

    let raw = collect_inputs(cli, input)?;

    let report = if cli.interactive {
        let inputs = prompt_until_valid(input, prompts, cli.wheel, raw, styled)?;
        Report::Ok {
            results: TorqueCalculator::new(constants).calculate(&inputs, cli.wheel),
        }
    } else {
        evaluate(&raw, cli.wheel, &constants)
    };

    let rendered = render::render(&report, cli.format, &constants, styled)?;
    writeln!(out, "{}", rendered)?;

    Ok(if report.is_ok() {
        Outcome::Calculated
    } else {
        Outcome::Rejected
    })
}

/// Input document (if any) with command-line values laid over it
fn collect_inputs<R: Read>(cli: &Cli, stdin: &mut R) -> Result<RawInputs> {
    let mut raw = match cli.input.as_deref() {
        Some(path) if path == Path::new("-") => {
            if cli.interactive {
                return Err(Error::StdinInUse);
            }
            info!("Reading inputs from stdin");
            read_inputs(stdin)?
        }
        Some(path) => {
            info!("Reading inputs from {}", path.display());
            read_inputs(std::fs::File::open(path)?)?
        }
        None => RawInputs::new(),
    };
    raw.merge(cli.fields.to_raw());
    Ok(raw)
}

/// Read a JSON object of raw field values
pub fn read_inputs<R: Read>(reader: R) -> Result<RawInputs> {
    Ok(serde_json::from_reader(reader)?)
}

/// Prompt for every field `raw` lacks, then keep re-prompting the fields that
/// fail validation until the whole set is valid.
///
/// A blank answer counts as no value. For omni wheels that means 0° alignment
/// and no Kiwi drive.
pub fn prompt_until_valid<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    wheel: WheelType,
    mut raw: RawInputs,
    styled: bool,
) -> Result<DriveInputs> {
    let mut pending: Vec<InputField> = InputField::for_wheel(wheel)
        .into_iter()
        // Kiwi variant implies the flag
        .filter(|field| !(wheel == WheelType::Kiwi && *field == InputField::KiwiDrive))
        .filter(|field| raw.get(*field).is_none())
        .collect();

    loop {
        for field in &pending {
            write!(output, "{}: ", field.label())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }
            raw.set(*field, line.trim());
        }

        match DriveInputs::from_raw(&raw, wheel) {
            Ok(inputs) => return Ok(inputs),
            Err(errors) => {
                debug!("Re-prompting {} field(s)", errors.len());
                writeln!(output, "{}", render::render_errors(&errors, styled))?;
                pending = errors.fields().collect();
            }
        }
    }
}
