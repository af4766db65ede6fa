//! Diagnostic types for analysis results

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - potential issue
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// Source span with 1-based line/column endpoints.
///
/// For construction expressions the start position is the type-name token
/// itself, not the enclosing statement, so downstream tooling can highlight
/// the exact offending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start line (1-based)
    pub start_line: usize,
    /// Start column (1-based)
    pub start_col: usize,
    /// End line (1-based, inclusive)
    pub end_line: usize,
    /// End column (1-based, exclusive)
    pub end_col: usize,
}

impl Span {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Zero-width span at a single token start
    pub fn point(line: usize, col: usize) -> Self {
        Self::new(line, col, line, col)
    }

    /// Start position as a (line, column) pair
    pub fn start(&self) -> (usize, usize) {
        (self.start_line, self.start_col)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// An analysis diagnostic (warning, error, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule ID that triggered this diagnostic
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Name of the analyzed unit the diagnostic belongs to
    pub unit: String,
    /// Source span, pointing at the offending token
    pub span: Span,
    /// Help text (usually rule description)
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(rule_id: &str, severity: Severity, message: &str, unit: &str, span: Span) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            unit: unit.to_string(),
            span,
            help: None,
        }
    }

    /// Add help text
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("hint".parse::<Severity>(), Ok(Severity::Info));
    }

    #[test]
    fn test_span_start() {
        let span = Span::new(11, 33, 11, 46);
        assert_eq!(span.start(), (11, 33));
        assert_eq!(format!("{}", span), "11:33");
    }

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::new(
            "test-rule",
            Severity::Warning,
            "Test message",
            "unit.src",
            Span::point(10, 5),
        )
        .with_help("Route parsing through a secure reader");

        assert_eq!(diag.rule_id, "test-rule");
        assert!(diag.is_warning());
        assert!(!diag.is_error());
        assert!(diag.help.is_some());
    }
}
