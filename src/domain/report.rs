use serde::{Deserialize, Serialize};

use crate::io::Reference;

/// Outcome of checking one document against one schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub error_count: usize,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn new(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            error_count: errors.len(),
            errors,
        }
    }

    /// Human-readable lines: a success message, or a header followed by one
    /// `- ` line per error.
    pub fn text_lines(&self) -> Vec<String> {
        if self.valid {
            return vec!["The document is valid".to_string()];
        }
        let mut lines = Vec::with_capacity(self.errors.len() + 1);
        lines.push("The document is not valid. see errors :".to_string());
        lines.extend(self.errors.iter().map(|error| format!("- {error}")));
        lines
    }
}

/// Diagnostics report emitted when `--emit-pipeline` is enabled.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineReport {
    pub command: String,
    pub input: PipelineInput,
    pub steps: Vec<String>,
    pub stage_diagnostics: Vec<PipelineStageDiagnostic>,
}

impl PipelineReport {
    pub fn new(command: impl Into<String>, input: PipelineInput, steps: Vec<String>) -> Self {
        Self {
            command: command.into(),
            input,
            steps,
            stage_diagnostics: Vec::new(),
        }
    }

    pub fn with_stage_diagnostics(mut self, diagnostics: Vec<PipelineStageDiagnostic>) -> Self {
        self.stage_diagnostics = diagnostics;
        self
    }
}

/// Outcome of one executed pipeline stage.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineStageDiagnostic {
    pub order: usize,
    pub step: String,
    pub status: String,
    pub output_bytes: usize,
    pub duration_ms: u64,
}

impl PipelineStageDiagnostic {
    pub fn success(order: usize, step: &str, output_bytes: usize, duration_ms: u64) -> Self {
        Self {
            order,
            step: step.to_string(),
            status: "ok".to_string(),
            output_bytes,
            duration_ms,
        }
    }

    pub fn failure(order: usize, step: &str, duration_ms: u64) -> Self {
        Self {
            order,
            step: step.to_string(),
            status: "error".to_string(),
            output_bytes: 0,
            duration_ms,
        }
    }
}

/// Input-source descriptors used in pipeline diagnostics.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PipelineInput {
    pub sources: Vec<PipelineInputSource>,
}

impl PipelineInput {
    pub fn new(sources: Vec<PipelineInputSource>) -> Self {
        Self { sources }
    }
}

/// Single input source descriptor.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineInputSource {
    pub label: String,
    pub source: String,
    pub reference: String,
}

impl PipelineInputSource {
    pub fn from_reference(label: impl Into<String>, reference: &Reference) -> Self {
        Self {
            label: label.into(),
            source: reference.kind().to_string(),
            reference: reference.to_string(),
        }
    }
}
