//! Diagnostics reported back to the front end.
//!
//! Every generator collects [`Diagnostic`]s instead of returning errors
//! through the call stack: a blocking error suppresses the declarations for
//! that one input, never the rest of the pass.

use std::fmt;

use thiserror::Error;

/// A byte range into the source text the front end handed over.
///
/// Offsets are in whatever coordinate space the caller used when building
/// the IR (see [`crate::expr::parse_at`]), so diagnostics can be mapped
/// straight back to the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Advisory; synthesis still produced declarations.
    Warning,
    /// Blocks synthesis for the offending declaration.
    Error,
}

/// Everything a generator can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("@{attr} can only be applied to a func")]
    FuncOnly { attr: &'static str },

    #[error("@{attr} can only be applied to a class")]
    ClassOnly { attr: &'static str },

    #[error("@{attr} can only be applied to a var")]
    VarOnly { attr: &'static str },

    #[error("@{attr} can only be applied to a single var")]
    SingleVarOnly { attr: &'static str },

    #[error("'{name}' must be marked with '@objc'")]
    MissingObjc { name: String },

    #[error("'{name}' must have an explicit type")]
    MissingTypeAnnotation { name: String },

    #[error("'{class_name}' must inherit '{superclass}'")]
    MustInherit {
        class_name: String,
        superclass: &'static str,
    },

    #[error("'{class_name}' must conform '{protocol}'")]
    MustConform {
        class_name: String,
        protocol: &'static str,
    },

    #[error("Return type must be any class type or 'Any'")]
    ReturnMustBeClass,

    #[error("'{type_name}' type is not supported")]
    UnsupportedType { type_name: String },

    #[error("Functions with a defined return type should be synchronous")]
    NonSync,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::NonSync => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A single finding tied to a source location.
///
/// Owned by the caller once returned; the generators keep no state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{label}[{}]: {}", self.span, self.kind)
    }
}
