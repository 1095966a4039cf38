//! Source locations and the diagnostics attributed to them.
//!
//! The crate never renders diagnostics for a user. A rejected construction
//! produces a [`Diagnostic`] carrying the caller-supplied [`Location`] and a
//! deterministic message, which is handed to whatever sink the
//! [`Context`](crate::context::Context) has installed.
use std::{fmt, sync::Arc};

use strum::Display;

/// Where a construction request originates from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Location {
    /// No location information is available.
    #[default]
    Unknown,

    /// A position inside a source file (1-based line and column).
    FileLineCol {
        file: Arc<str>,
        line: u32,
        column: u32,
    },

    /// A named location, e.g. the symbol being compiled.
    Name(Arc<str>),
}

impl Location {
    pub fn unknown() -> Self {
        Location::Unknown
    }

    pub fn file_line_col(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Location::FileLineCol {
            file: file.into(),
            line,
            column,
        }
    }

    pub fn name(name: impl Into<Arc<str>>) -> Self {
        Location::Name(name.into())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unknown => write!(f, "loc(unknown)"),
            Location::FileLineCol { file, line, column } => {
                write!(f, "{}:{}:{}", file, line, column)
            }
            Location::Name(name) => write!(f, "{:?}", name),
        }
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Remark,
    Warning,
    Error,
}

/// A message attributed to a source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: Location, message: impl Into<String>) -> Self {
        Self {
            severity,
            location,
            message: message.into(),
        }
    }

    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, location, message)
    }

    pub fn warning(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, location, message)
    }

    pub fn remark(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Remark, location, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::unknown().to_string(), "loc(unknown)");
        assert_eq!(
            Location::file_line_col("kernel.mlir", 3, 14).to_string(),
            "kernel.mlir:3:14"
        );
        assert_eq!(Location::name("main").to_string(), "\"main\"");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(
            Location::file_line_col("a.mlir", 1, 2),
            "unknown storage class (got `9999`)",
        );
        assert_eq!(
            diag.to_string(),
            "a.mlir:1:2: error: unknown storage class (got `9999`)"
        );
    }

    #[test]
    fn test_diagnostic_severities() {
        let loc = Location::name("main");
        let remark = Diagnostic::remark(loc.clone(), "interned 3 records");
        let warning = Diagnostic::warning(loc.clone(), "deprecated extension");
        let error = Diagnostic::error(loc, "unknown version (got `42`)");

        assert_eq!(remark.severity, Severity::Remark);
        assert_eq!(warning.to_string(), "\"main\": warning: deprecated extension");
        assert_eq!(remark.to_string(), "\"main\": remark: interned 3 records");
        assert!(remark.severity < warning.severity && warning.severity < error.severity);
    }
}
