//! Validation report types for structured error reporting.
//!
//! Reports can be printed for people (`Display`) or serialized to JSON for
//! tooling.

use serde::Serialize;
use std::fmt;

use crate::pose::LandmarkIndex;

/// All issues found while validating a recording.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if any issue carries `code`.
    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Stable code for filtering and tooling.
    pub code: IssueCode,
    pub message: String,
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Replay will work, but some frames will be skipped or look wrong.
    Warning,
    /// The recording is malformed.
    Error,
}

/// A stable code identifying the kind of issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Recording-level
    /// The recording has no frames.
    EmptyRecording,
    /// A frame's timestamp does not strictly follow the previous frame's.
    NonMonotonicTimestamp,

    // Frame-level
    /// A frame's image width or height is zero.
    InvalidFrameDimensions,
    /// A frame has no landmarks.
    EmptyFrame,
    /// A frame lacks one of the tracked hip/knee/ankle landmarks.
    MissingTrackedLandmark,
    /// Two landmarks in one frame share an index.
    DuplicateLandmarkIndex,

    // Landmark-level
    /// A landmark coordinate is NaN or infinite.
    LandmarkNotFinite,
    /// A landmark's x or y lies outside `[0, 1]`.
    LandmarkOutOfRange,
}

/// Where an issue was found.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum IssueContext {
    Recording,
    Frame { frame: usize },
    Landmark { frame: usize, index: LandmarkIndex },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Recording => write!(f, "recording"),
            IssueContext::Frame { frame } => write!(f, "frame {}", frame),
            IssueContext::Landmark { frame, index } => {
                write!(f, "frame {} landmark {}", frame, index)
            }
        }
    }
}
