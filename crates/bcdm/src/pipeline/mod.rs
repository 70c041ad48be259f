//! Streaming line driver shared by all pipeline tools.
//!
//! One input line is one unit of work. In streaming mode, accepted
//! records are emitted immediately and failures are reported and
//! skipped. In all-or-nothing mode, output is buffered and the first
//! failure discards the batch and aborts the run.

use std::io::{BufRead, Write};

use crate::error::{BcdmError, Result};

/// Severity tag for a diagnostic line on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// One human-readable diagnostic, tagged with severity and, when known,
/// the originating record's request id.
///
/// The rendered form (`[ERROR][Request 7] ...`) is a stable contract
/// consumed by calling pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub request_id: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(request_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            request_id: request_id.map(String::from),
            message: message.into(),
        }
    }

    pub fn warning(request_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            request_id: request_id.map(String::from),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.request_id {
            Some(id) => write!(f, "[{}][Request {}] {}", self.severity, id, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Batch transaction policy over the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Each record stands alone; failures are reported and skipped.
    #[default]
    Streaming,
    /// The whole stream is accepted or rejected as a unit.
    AllOrNothing,
}

/// Result of filtering one input line.
///
/// `output == None` marks the record as rejected; diagnostics are
/// written to stderr either way.
#[derive(Debug, Clone, Default)]
pub struct FilterResult {
    pub output: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FilterResult {
    pub fn accepted(output: String) -> Self {
        Self {
            output: Some(output),
            diagnostics: Vec::new(),
        }
    }

    pub fn rejected(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            output: None,
            diagnostics,
        }
    }
}

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub read: usize,
    pub emitted: usize,
    pub rejected: usize,
}

/// Drive a record filter over line-delimited input.
///
/// Empty lines are skipped. Returns the run counters, or the abort
/// error when all-or-nothing mode rejects the batch (after writing the
/// abort diagnostic to `err`).
pub fn run_pipeline<R, O, E, F>(
    input: R,
    mut out: O,
    mut err: E,
    mode: BatchMode,
    mut filter: F,
) -> Result<PipelineSummary>
where
    R: BufRead,
    O: Write,
    E: Write,
    F: FnMut(&str) -> FilterResult,
{
    let mut summary = PipelineSummary::default();
    let mut buffered: Vec<String> = Vec::new();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.read += 1;

        let result = filter(&line);
        for diagnostic in &result.diagnostics {
            writeln!(err, "{}", diagnostic)?;
        }

        match result.output {
            Some(output) => match mode {
                BatchMode::Streaming => {
                    writeln!(out, "{}", output)?;
                    summary.emitted += 1;
                }
                BatchMode::AllOrNothing => buffered.push(output),
            },
            None => {
                summary.rejected += 1;
                if mode == BatchMode::AllOrNothing {
                    writeln!(err, "[ABORT] all-or-nothing: detected invalid record.")?;
                    return Err(BcdmError::BatchAborted);
                }
            }
        }
    }

    // The batch is only released once the entire input stream succeeded.
    for output in buffered {
        writeln!(out, "{}", output)?;
        summary.emitted += 1;
    }
    out.flush()?;

    Ok(summary)
}
