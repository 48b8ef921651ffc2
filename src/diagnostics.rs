//! Conversion diagnostics
//!
//! Warnings raised while converting a file. None of them abort the run: the
//! offending line is either passed through unchanged or dropped, and
//! conversion continues with the next line.

use std::fmt;

/// Diagnostic category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A rule needed a registered type that does not exist or has the wrong shape
    UnresolvedType,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnresolvedType => write!(f, "unresolved-type"),
        }
    }
}

/// A warning tied to one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line number
    pub line: usize,
    /// The offending source text
    pub source: String,
    pub message: String,
}

impl Diagnostic {
    pub fn unresolved(line: usize, source: &str, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedType,
            line,
            source: source.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in line {}: {}", self.message, self.line, self.source.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_line_and_text() {
        let d = Diagnostic::unresolved(7, "  for (auto& [a, b] : xs) {", "Failed to parse 'UNKNOWN_TYPE'");
        assert_eq!(
            d.to_string(),
            "Failed to parse 'UNKNOWN_TYPE' in line 7: for (auto& [a, b] : xs) {"
        );
        assert_eq!(d.kind.to_string(), "unresolved-type");
    }
}
