//! Diagnostic codes for recoverable malformed input, and fatal transform errors.

/// Malformed-input kinds recovered locally as inline diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// `{` with no matching `}` before the end of the enclosing region.
    UnterminatedExpression,
    /// Opening tag with no `>`, or no matching closing tag.
    UnterminatedElement,
    /// `</name>` where a child was expected.
    UnexpectedClosingTag,
    /// `name=` followed by something other than a quoted string or an expression.
    MalformedAttribute,
    /// Top-level input matches neither an element nor a fragment.
    UnparseableMarkup,
    /// A child-list iteration consumed nothing.
    NoProgress,
}

impl DiagnosticCode {
    pub fn describe(self) -> &'static str {
        match self {
            DiagnosticCode::UnterminatedExpression => "unterminated expression",
            DiagnosticCode::UnterminatedElement => "unterminated element",
            DiagnosticCode::UnexpectedClosingTag => "unexpected closing tag",
            DiagnosticCode::MalformedAttribute => "malformed attribute",
            DiagnosticCode::UnparseableMarkup => "could not parse markup",
            DiagnosticCode::NoProgress => "scanner made no progress",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Fatal condition: the input is adversarial or corrupted, not merely malformed.
///
/// Aborts the whole `transform` call. Never produced for ordinary authoring mistakes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformError {
    StepLimitExceeded { limit: u64 },
    DepthLimitExceeded { limit: usize },
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::StepLimitExceeded { limit } => {
                write!(f, "scan step limit exceeded ({limit} steps)")
            }
            TransformError::DepthLimitExceeded { limit } => {
                write!(f, "nesting depth limit exceeded ({limit} levels)")
            }
        }
    }
}

impl std::error::Error for TransformError {}
