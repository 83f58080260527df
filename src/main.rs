use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use docschema::cmd::validate::{self, ValidateCommandArgs, ValidateOutcome};
use docschema::domain::report::{PipelineReport, ValidationReport};
use docschema::engine::validate::SchemaDraft;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "docschema",
    version,
    about = "Validate a YAML or JSON document against a JSON Schema"
)]
struct Cli {
    /// Reference to the source YAML/JSON document (local path or http(s) URL).
    #[arg(long)]
    source: Option<String>,

    /// Reference to the JSON Schema document (local path or http(s) URL).
    #[arg(long)]
    schema: Option<String>,

    /// Force a schema draft instead of detecting it from `$schema`.
    #[arg(long, value_enum)]
    draft: Option<CliDraft>,

    /// Timeout in seconds for each remote request.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Result format printed on stdout.
    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    output: OutputMode,

    /// Print pipeline diagnostics as one JSON line on stderr.
    #[arg(long, default_value_t = false)]
    emit_pipeline: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDraft {
    #[value(name = "4")]
    Draft4,
    #[value(name = "6")]
    Draft6,
    #[value(name = "7")]
    Draft7,
    #[value(name = "2019-09")]
    Draft201909,
    #[value(name = "2020-12")]
    Draft202012,
}

impl From<CliDraft> for SchemaDraft {
    fn from(value: CliDraft) -> Self {
        match value {
            CliDraft::Draft4 => Self::Draft4,
            CliDraft::Draft6 => Self::Draft6,
            CliDraft::Draft7 => Self::Draft7,
            CliDraft::Draft201909 => Self::Draft201909,
            CliDraft::Draft202012 => Self::Draft202012,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Text,
    Json,
}

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };
    init_tracing(cli.verbose);

    let args = ValidateCommandArgs {
        source: cli.source,
        schema: cli.schema,
        draft: cli.draft.map(Into::into),
        timeout: Duration::from_secs(cli.timeout),
    };
    let response = validate::run(&args);

    let exit_code = match &response.outcome {
        ValidateOutcome::Report(report) => emit_report(report, cli.output, response.exit_code),
        ValidateOutcome::Error { message } => {
            eprintln!("{message}");
            response.exit_code
        }
    };

    if cli.emit_pipeline {
        emit_pipeline_report(&response.pipeline);
    }
    exit_code
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            eprint!("{error}");
            1
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn emit_report(report: &ValidationReport, mode: OutputMode, exit_code: i32) -> i32 {
    let lines = match mode {
        OutputMode::Text => report.text_lines(),
        OutputMode::Json => match serde_json::to_string(report) {
            Ok(serialized) => vec![serialized],
            Err(error) => {
                eprintln!("failed to serialize validation report: {error}");
                return 1;
            }
        },
    };

    match write_lines(&mut io::stdout().lock(), &lines) {
        Ok(()) => exit_code,
        // The reader went away; nothing left to report to.
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => 1,
        Err(error) => {
            eprintln!("failed to write validation report: {error}");
            1
        }
    }
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn emit_pipeline_report(report: &PipelineReport) {
    match serde_json::to_string(report) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(error) => eprintln!("failed to serialize pipeline report: {error}"),
    }
}
