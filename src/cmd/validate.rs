use std::time::Duration;

use crate::cmd::stage_trace::StageTrace;
use crate::domain::error::ValidateError;
use crate::domain::report::{PipelineInput, PipelineInputSource, PipelineReport, ValidationReport};
use crate::engine::validate::{self, SchemaDraft, ValidateOptions};
use crate::io::remote::DEFAULT_TIMEOUT;
use crate::io::{self, Loader, Reference};

struct InputStages {
    load: &'static str,
    normalize: &'static str,
}

const SOURCE_STAGES: InputStages = InputStages {
    load: "load_source",
    normalize: "normalize_source",
};

const SCHEMA_STAGES: InputStages = InputStages {
    load: "load_schema",
    normalize: "normalize_schema",
};

/// Input arguments for validate command execution API.
#[derive(Debug, Clone)]
pub struct ValidateCommandArgs {
    pub source: Option<String>,
    pub schema: Option<String>,
    pub draft: Option<SchemaDraft>,
    pub timeout: Duration,
}

impl Default for ValidateCommandArgs {
    fn default() -> Self {
        Self {
            source: None,
            schema: None,
            draft: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Result of one run: a validation report or a message for standard error.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidateOutcome {
    Report(ValidationReport),
    Error { message: String },
}

/// Structured command response that carries exit-code mapping, outcome and
/// pipeline diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateCommandResponse {
    pub exit_code: i32,
    pub outcome: ValidateOutcome,
    pub pipeline: PipelineReport,
}

pub fn run(args: &ValidateCommandArgs) -> ValidateCommandResponse {
    let mut trace = StageTrace::default();
    let mut sources = Vec::with_capacity(2);
    let result = execute(args, &mut trace, &mut sources);

    let (exit_code, outcome) = match result {
        Ok(report) => {
            let exit_code = if report.valid { 0 } else { 1 };
            (exit_code, ValidateOutcome::Report(report))
        }
        Err(error) => {
            tracing::debug!(?error, "validate command failed");
            (
                1,
                ValidateOutcome::Error {
                    message: error.to_string(),
                },
            )
        }
    };

    let pipeline = PipelineReport::new("validate", PipelineInput::new(sources), pipeline_steps())
        .with_stage_diagnostics(trace.into_diagnostics());
    ValidateCommandResponse {
        exit_code,
        outcome,
        pipeline,
    }
}

fn execute(
    args: &ValidateCommandArgs,
    trace: &mut StageTrace,
    sources: &mut Vec<PipelineInputSource>,
) -> Result<ValidationReport, ValidateError> {
    let source = required_reference(args.source.as_deref(), "--source")?;
    let schema = required_reference(args.schema.as_deref(), "--schema")?;
    sources.push(PipelineInputSource::from_reference("source", &source));
    sources.push(PipelineInputSource::from_reference("schema", &schema));

    let loader = Loader::new(args.timeout).map_err(ValidateError::Setup)?;
    let source_json = load_json(&loader, &source, &SOURCE_STAGES, trace)?;
    let schema_json = load_json(&loader, &schema, &SCHEMA_STAGES, trace)?;

    let options = ValidateOptions { draft: args.draft };
    let report = trace.run(
        "validate_document",
        report_json_bytes,
        || validate::execute_validate(&schema_json, &source_json, options, &loader),
    )?;
    Ok(report)
}

fn required_reference(
    raw: Option<&str>,
    flag: &'static str,
) -> Result<Reference, ValidateError> {
    match raw {
        Some(raw) if !raw.is_empty() => Ok(Reference::parse(raw)),
        _ => Err(ValidateError::MissingArgument { flag }),
    }
}

fn load_json(
    loader: &Loader,
    reference: &Reference,
    stages: &InputStages,
    trace: &mut StageTrace,
) -> Result<Vec<u8>, ValidateError> {
    let raw = trace
        .run(stages.load, Vec::len, || loader.resolve(reference))
        .map_err(ValidateError::load)?;
    trace
        .run(stages.normalize, Vec::len, || io::normalize_json_bytes(&raw, reference))
        .map_err(ValidateError::load)
}

fn report_json_bytes(report: &ValidationReport) -> usize {
    serde_json::to_vec(report).map_or(0, |bytes| bytes.len())
}

/// Planned pipeline steps for the `validate` command.
pub fn pipeline_steps() -> Vec<String> {
    vec![
        "load_source".to_string(),
        "normalize_source".to_string(),
        "load_schema".to_string(),
        "normalize_schema".to_string(),
        "validate_document".to_string(),
    ]
}
