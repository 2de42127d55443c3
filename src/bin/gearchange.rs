//! Command line front end of the green number calculator.
//!
//! Usage:
//!   gearchange --green 270 --sud 100 --lift 50 --bpm 120
//!   gearchange --query "green=270&sud=100&lift=50&bpm=120" --format csv
//!
//! Set `RUST_LOG=debug` to see the derived highspeed and table size.

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use gearchange::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "gearchange")]
#[command(about = "Projects green numbers over BPMs and gear changes", long_about = None)]
struct Config {
    /// Green number at the initial BPM
    #[arg(short, long, value_name = "GREEN")]
    green: Option<String>,

    /// SUD+ length
    #[arg(short, long, value_name = "LENGTH")]
    sud: Option<String>,

    /// LIFT height
    #[arg(short, long, value_name = "HEIGHT")]
    lift: Option<String>,

    /// Initial BPM of the chart
    #[arg(short, long, value_name = "BPM")]
    bpm: Option<String>,

    /// Query string to read inputs from; flags override its values
    #[arg(short, long, value_name = "QUERY")]
    query: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the query string of the inputs before the table
    #[arg(long)]
    print_query: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned plain text
    Text,
    /// Plain text with colored cells
    Ansi,
    /// Comma separated values
    #[cfg(feature = "csv")]
    Csv,
    /// JSON with intensities
    #[cfg(feature = "json")]
    Json,
}

impl Config {
    fn raw_inputs(&self) -> RawInputs {
        let mut raw = self
            .query
            .as_deref()
            .map(|query| RawInputs::load(&MemoryQueryStore::parse(query)))
            .unwrap_or_default();
        let flags = [
            (Field::GreenNumber, &self.green),
            (Field::SudPlus, &self.sud),
            (Field::Lift, &self.lift),
            (Field::InitialBpm, &self.bpm),
        ];
        for (field, flag) in flags {
            if flag.is_some() {
                raw.slot_mut(field).clone_from(flag);
            }
        }
        raw
    }
}

/// Exit status when the inputs cannot be used.
const INVALID_INPUT: u8 = 2;

fn main() -> ExitCode {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init();

    let config = Config::parse();
    execute(&config, &mut std::io::stdout().lock())
}

/// Validates the inputs of `config` and writes the table into `out`.
fn execute(config: &Config, out: &mut impl Write) -> ExitCode {
    let inputs = match config.raw_inputs().validate() {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(INVALID_INPUT);
        }
    };

    match run(config, &inputs, out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("failed to write table: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, inputs: &Inputs, out: &mut impl Write) -> Result<(), RenderError> {
    let table = build_table(inputs);
    if config.print_query {
        writeln!(out, "?{}", inputs.to_query())?;
    }
    match config.format {
        Format::Text => write!(out, "{}", render_text(&table))?,
        Format::Ansi => write!(out, "{}", render_ansi(&table))?,
        #[cfg(feature = "csv")]
        Format::Csv => write_csv(&table, &mut *out)?,
        #[cfg(feature = "json")]
        Format::Json => writeln!(out, "{}", render_json(&table)?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("gearchange").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    fn execute_to_string(config: &Config) -> (ExitCode, String) {
        let mut out = Vec::new();
        let code = execute(config, &mut out);
        (code, String::from_utf8(out).expect("output should be UTF-8"))
    }

    #[test]
    fn test_flags_override_query() {
        let config = config(&["--query", "green=270&sud=100&lift=50&bpm=120", "--sud", "0"]);
        let raw = config.raw_inputs();
        assert_eq!(raw.get(Field::SudPlus), Some("0"));
        assert_eq!(raw.get(Field::GreenNumber), Some("270"));
        assert_eq!(raw.validate(), Inputs::new(270, 0, 50, 120));
    }

    #[test]
    fn test_flags_alone() {
        let config = config(&["-g", "310", "-s", "120", "-l", "0", "-b", "155"]);
        assert_eq!(config.raw_inputs().validate(), Inputs::new(310, 120, 0, 155));
    }

    #[test]
    fn test_closed_window_exits_with_invalid_input() {
        let config = config(&["--query", "green=270&sud=600&lift=400&bpm=120"]);
        let (code, out) = execute_to_string(&config);
        assert_eq!(code, ExitCode::from(INVALID_INPUT));
        assert_eq!(out, "");

        let (code, _) = execute_to_string(&self::config(&["--green", "270"]));
        assert_eq!(code, ExitCode::from(INVALID_INPUT));
    }

    #[test]
    fn test_print_query_line() {
        let config = config(&[
            "--query",
            "lang=ja&bpm=150",
            "-g",
            "270",
            "-s",
            "100",
            "-l",
            "50",
            "-b",
            "120",
            "--print-query",
        ]);
        let (code, out) = execute_to_string(&config);
        assert_eq!(code, ExitCode::SUCCESS);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("?green=270&sud=100&lift=50&bpm=120"));
        assert_eq!(
            lines.next(),
            Some("green 270 / SUD+ 100 / LIFT 50 / BPM 120 => HS 4.58")
        );
    }

    #[cfg(feature = "csv")]
    #[test]
    fn test_csv_format() {
        let config = config(&["-q", "green=270&sud=100&lift=50&bpm=120", "-f", "csv"]);
        let (code, out) = execute_to_string(&config);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.starts_with("bpm,-8,"));
        assert_eq!(out.lines().count(), 46);
    }
}
