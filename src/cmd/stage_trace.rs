use std::time::Instant;

use crate::domain::report::PipelineStageDiagnostic;

/// Records timing and outcome of pipeline stages in execution order.
#[derive(Debug, Default)]
pub(crate) struct StageTrace {
    diagnostics: Vec<PipelineStageDiagnostic>,
}

impl StageTrace {
    /// Runs one stage and records a diagnostic; `output_bytes` measures the
    /// stage's successful output.
    pub(crate) fn run<T, E, F, M>(
        &mut self,
        step: &'static str,
        output_bytes: M,
        run_stage: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        M: FnOnce(&T) -> usize,
    {
        let order = self.diagnostics.len() + 1;
        let started = Instant::now();
        let result = run_stage();
        let duration_ms = elapsed_ms(started);

        let diagnostic = match &result {
            Ok(output) => {
                PipelineStageDiagnostic::success(order, step, output_bytes(output), duration_ms)
            }
            Err(_) => PipelineStageDiagnostic::failure(order, step, duration_ms),
        };
        self.diagnostics.push(diagnostic);
        result
    }

    pub(crate) fn into_diagnostics(self) -> Vec<PipelineStageDiagnostic> {
        self.diagnostics
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
