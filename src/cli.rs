//! Command-line parsing and execution for the `seamcheck` binary

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use log::{info, LevelFilter};

use crate::components::{
    check_abort, check_abort_decision, ComponentA, CHECK_ABORT_CONDITIONS, CHECK_ABORT_MCDC_VECTORS,
};
use crate::coverage::{analyze, parse_vector};
use crate::seam::{MemoryDataAccess, MyDataType, MY_DATA_ARRAY_SIZE};

const USAGE: &str = "\
SEAMCHECK - data-access seam, mock harness and MC/DC analysis
Usage: seamcheck [options] <command> [args...]

Options:
  -h, --help            Display this help message
  -v, --version         Display version information
  --log-level <level>   off, error, warn, info, debug or trace

Commands:
  check-abort <off_course> <abort_commanded> <valid_abort_command>
  mcdc [VECTOR...]      MC/DC of check_abort, vectors like TFF
  demo                  Run ComponentA against an in-memory source
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CheckAbort {
        off_course: bool,
        abort_commanded: bool,
        valid_abort_command: bool,
    },
    /// Analyse `check_abort` against the given vectors
    Mcdc { vectors: Vec<Vec<bool>> },
    Demo,
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub log_level: LevelFilter,
    pub command: Command,
}

/// Parse `true/false`, `1/0` or `T/F`
pub fn parse_bool(text: &str) -> Result<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(anyhow!("Invalid boolean: {}", text)),
    }
}

/// Parse the arguments that follow the program name
pub fn parse_args(args: &[String]) -> Result<Cli> {
    let mut log_level = LevelFilter::Info;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-v" | "--version" => {
                return Ok(Cli {
                    log_level,
                    command: Command::Version,
                });
            }
            "-h" | "--help" => {
                return Ok(Cli {
                    log_level,
                    command: Command::Help,
                });
            }
            "--log-level" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow!("--log-level needs a value"))?;
                log_level = value
                    .parse::<LevelFilter>()
                    .with_context(|| format!("Invalid log level: {}", value))?;
                i += 2;
            }
            _ => break,
        }
    }

    let rest = &args[i..];
    let command = match rest.first().map(String::as_str) {
        None => return Err(anyhow!("No command given")),
        Some("check-abort") => {
            if rest.len() != 4 {
                return Err(anyhow!("check-abort takes exactly three booleans"));
            }
            Command::CheckAbort {
                off_course: parse_bool(&rest[1])?,
                abort_commanded: parse_bool(&rest[2])?,
                valid_abort_command: parse_bool(&rest[3])?,
            }
        }
        Some("mcdc") => {
            let vectors = if rest.len() > 1 {
                rest[1..]
                    .iter()
                    .map(|v| parse_vector(v))
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                CHECK_ABORT_MCDC_VECTORS.iter().map(|v| v.to_vec()).collect()
            };
            Command::Mcdc { vectors }
        }
        Some("demo") => Command::Demo,
        Some(other) => return Err(anyhow!("Unknown command: {}", other)),
    };

    Ok(Cli { log_level, command })
}

/// Execute a command, writing its report to `out`.
///
/// Returns `false` when the command ran but its check did not pass (an
/// `mcdc` run that misses a condition).
pub fn run(command: &Command, out: &mut dyn Write) -> Result<bool> {
    match command {
        Command::CheckAbort {
            off_course,
            abort_commanded,
            valid_abort_command,
        } => {
            let abort = check_abort(*off_course, *abort_commanded, *valid_abort_command);
            writeln!(out, "{}", if abort { "TRUE" } else { "FALSE" })?;
            Ok(true)
        }
        Command::Mcdc { vectors } => {
            let decision = check_abort_decision();
            let report = analyze(&decision, vectors)?;
            writeln!(out, "decision: {}", decision.render(&CHECK_ABORT_CONDITIONS))?;
            writeln!(out, "{}", report)?;
            Ok(report.is_covered())
        }
        Command::Demo => {
            run_demo(out)?;
            Ok(true)
        }
        Command::Help => {
            print_usage(out)?;
            Ok(true)
        }
        Command::Version => {
            writeln!(out, "{} v{}", crate::PKG_NAME, crate::VERSION)?;
            writeln!(out, "{}", crate::PKG_DESCRIPTION)?;
            Ok(true)
        }
    }
}

fn run_demo(out: &mut dyn Write) -> Result<()> {
    let source = MemoryDataAccess::new();
    source.set_some_data(13);
    source.set_multiple_data(5, 8);
    source.set_record(MyDataType::new(13, 'a'));
    source.set_records([
        MyDataType::new(11, 'a'),
        MyDataType::new(22, 'b'),
        MyDataType::new(33, 'c'),
    ]);
    source.set_my_input(10);
    info!("Running demo against an in-memory source");

    let component = ComponentA::new(&source);
    writeln!(
        out,
        "check_read_some_data: {}",
        component.check_read_some_data()
    )?;
    writeln!(
        out,
        "check_read_some_data_and_return: {}",
        component.check_read_some_data_and_return()
    )?;
    writeln!(
        out,
        "check_read_multiple_data_and_return: {}",
        component.check_read_multiple_data_and_return()
    )?;

    let mut record = MyDataType::default();
    component.check_read_data_structure(&mut record);
    writeln!(out, "check_read_data_structure: {}", record)?;

    let mut records = [MyDataType::default(); MY_DATA_ARRAY_SIZE];
    component.check_read_data_structure_array(&mut records);
    let rendered: Vec<String> = records.iter().map(ToString::to_string).collect();
    writeln!(
        out,
        "check_read_data_structure_array: [{}]",
        rendered.join(", ")
    )?;

    component.calculate_square();
    writeln!(out, "calculate_square: {:?}", source.written())?;

    source.set_status(1);
    writeln!(
        out,
        "check_read_some_data_and_return (status 1): {}",
        component.check_read_some_data_and_return()
    )?;
    Ok(())
}

pub fn print_usage(out: &mut dyn Write) -> Result<()> {
    out.write_all(USAGE.as_bytes())?;
    Ok(())
}
