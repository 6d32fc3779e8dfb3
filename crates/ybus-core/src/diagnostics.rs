//! Issue collection for the validation gate.
//!
//! The gate walks the whole request and records every problem instead of
//! stopping at the first one, so the user sees all rejected branches at once.
//! Issues carry:
//!
//! - a severity (errors halt computation, warnings do not)
//! - a category for grouping
//! - an optional branch reference (e.g., "Branch 3", or the branch name)
//!
//! # Example
//!
//! ```
//! use ybus_core::diagnostics::{Category, Diagnostics};
//!
//! let mut diag = Diagnostics::new();
//! diag.add_branch_warning(Category::Impedance, "Branch 1", "zero impedance, contributes no admittance");
//! diag.add_branch_error(Category::Topology, "Branch 2", "from node cannot be ground");
//!
//! assert_eq!(diag.warning_count(), 1);
//! assert_eq!(diag.error_count(), 1);
//! assert!(diag.clone().into_result().is_err());
//! ```

use serde::Serialize;
use std::fmt;

use crate::error::{YBusError, YBusResult};

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Computation proceeds
    Warning,
    /// Computation is refused
    Error,
}

/// What part of the request an issue concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Node count or branch list shape
    Input,
    /// Node number outside the matrix
    Range,
    /// Self-loops and illegal ground connections
    Topology,
    /// Impedance and susceptance values
    Impedance,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Input => "input",
            Category::Range => "range",
            Category::Topology => "topology",
            Category::Impedance => "impedance",
        };
        f.write_str(s)
    }
}

/// A single issue found by the gate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticIssue {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    /// Branch label, when the issue belongs to one branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl DiagnosticIssue {
    /// Create a new diagnostic issue
    pub fn new(severity: Severity, category: Category, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            branch: None,
        }
    }

    /// Tag the issue with a branch label
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

impl fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        write!(f, "[{}:{}] {}", severity, self.category, self.message)?;
        if let Some(branch) = &self.branch {
            write!(f, " ({})", branch)?;
        }
        Ok(())
    }
}

/// Ordered collection of issues from one validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    /// Create new empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue
    pub fn add(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    /// Add a request-level error
    pub fn add_error(&mut self, category: Category, message: impl Into<String>) {
        self.add(DiagnosticIssue::new(Severity::Error, category, message));
    }

    /// Add an error tagged with the offending branch
    pub fn add_branch_error(
        &mut self,
        category: Category,
        branch: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add(DiagnosticIssue::new(Severity::Error, category, message).with_branch(branch));
    }

    /// Add a warning tagged with the offending branch
    pub fn add_branch_warning(
        &mut self,
        category: Category,
        branch: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add(DiagnosticIssue::new(Severity::Warning, category, message).with_branch(branch));
    }

    /// Count of warnings
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Count of errors
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Whether anything was recorded
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Whether any error was recorded
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Error-severity issues, in insertion order
    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Warning-severity issues, in insertion order
    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Issues in one category
    pub fn issues_by_category(&self, category: Category) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    /// `Err(YBusError::Validation)` if any error was recorded, otherwise the
    /// (possibly warning-carrying) diagnostics.
    pub fn into_result(self) -> YBusResult<Self> {
        if self.has_errors() {
            Err(YBusError::Validation(self))
        } else {
            Ok(self)
        }
    }

    /// Counts as text, e.g. "1 warning, 2 errors"
    pub fn summary(&self) -> String {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match (self.warning_count(), self.error_count()) {
            (0, 0) => "No issues".to_string(),
            (w, 0) => format!("{} warning{}", w, plural(w)),
            (0, e) => format!("{} error{}", e, plural(e)),
            (w, e) => format!("{} warning{}, {} error{}", w, plural(w), e, plural(e)),
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Diagnostics: {}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}
