//! Diagnostics for component lowering.
//!
//! This crate provides the diagnostic record reported by the component
//! lowering pipeline, the fixed registry of diagnostic descriptors, and one
//! constructor per diagnostic kind:
//! - Component attribute syntax
//! - Closing tag mismatches
//! - Ambiguous component matches
//! - Unsupported or unbound component attributes

pub mod factory;
pub mod registry;

pub use registry::{DiagnosticDescriptor, DESCRIPTORS};
pub use source_map::{Span, TextPosition};

use std::fmt;

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// The diagnostic code.
    pub code: DiagnosticCode,
    /// The severity level.
    pub severity: Severity,
    /// The formatted message.
    pub message: String,
    /// The span where the diagnostic applies. May be [`Span::undefined`].
    pub span: Span,
}

impl Diagnostic {
    /// Create a diagnostic from its registered descriptor.
    pub fn create(code: DiagnosticCode, span: Option<Span>, args: &[&str]) -> Self {
        let descriptor = code.descriptor();
        Self {
            code,
            severity: descriptor.severity,
            message: descriptor.format(args),
            span: span.unwrap_or_else(Span::undefined),
        }
    }

    /// Check if this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.span,
            self.severity.as_str(),
            self.code.as_str(),
            self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

impl miette::Diagnostic for Diagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code.as_str()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let range = self.span.to_text_range()?;
        let label = miette::LabeledSpan::new(
            Some(self.code.as_str().to_string()),
            u32::from(range.start()) as usize,
            u32::from(range.len()) as usize,
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// An error that prevents code generation from producing correct output.
    Error,
    /// A warning that indicates a potential issue.
    Warning,
}

impl Severity {
    /// Get the severity as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Diagnostic codes.
///
/// The discriminants index [`DESCRIPTORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCode {
    /// Component attribute value written as a literal instead of an expression.
    InvalidComponentAttributeSyntax = 0,
    /// Closing tag with no start tag.
    UnexpectedClosingTag = 1,
    /// Closing tag name does not match the open element.
    MismatchedClosingTag = 2,
    /// Closing tag closes an element of another kind.
    MismatchedClosingTagKind = 3,
    /// More than one component matches a tag.
    MultipleComponents = 4,
    /// Attribute value mixes markup and expressions.
    UnsupportedComplexContent = 5,
    /// Attribute does not map to a component property.
    UnboundComponentAttribute = 6,
}

impl DiagnosticCode {
    /// All codes, in registry order.
    pub const ALL: [DiagnosticCode; 7] = [
        Self::InvalidComponentAttributeSyntax,
        Self::UnexpectedClosingTag,
        Self::MismatchedClosingTag,
        Self::MismatchedClosingTagKind,
        Self::MultipleComponents,
        Self::UnsupportedComplexContent,
        Self::UnboundComponentAttribute,
    ];

    /// Get the code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidComponentAttributeSyntax => "InvalidComponentAttributeSyntax",
            Self::UnexpectedClosingTag => "UnexpectedClosingTag",
            Self::MismatchedClosingTag => "MismatchedClosingTag",
            Self::MismatchedClosingTagKind => "MismatchedClosingTagKind",
            Self::MultipleComponents => "MultipleComponents",
            Self::UnsupportedComplexContent => "UnsupportedComplexContent",
            Self::UnboundComponentAttribute => "UnboundComponentAttribute",
        }
    }

    /// Get the registered descriptor for this code.
    pub fn descriptor(self) -> &'static DiagnosticDescriptor {
        &DESCRIPTORS[self as usize]
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether any diagnostic in the list is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic as _;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_without_span() {
        let diag = Diagnostic::create(DiagnosticCode::UnexpectedClosingTag, None, &["div"]);
        assert!(diag.span.is_undefined());
        assert!(diag.is_error());
        assert_eq!(
            diag.message,
            "Unexpected closing tag 'div' with no matching start tag."
        );
    }

    #[test]
    fn test_display() {
        let span = Span::new(Some("Index.cshtml".to_string()), 12, 1, 4, 6);
        let diag = Diagnostic::create(DiagnosticCode::UnexpectedClosingTag, Some(span), &["p"]);
        assert_eq!(
            diag.to_string(),
            "Index.cshtml(2,5): error UnexpectedClosingTag: Unexpected closing tag 'p' with no matching start tag."
        );
    }

    #[test]
    fn test_miette_labels() {
        let span = Span::new(None, 12, 1, 4, 6);
        let diag = Diagnostic::create(DiagnosticCode::UnexpectedClosingTag, Some(span), &["p"]);
        let labels: Vec<_> = diag.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 12);
        assert_eq!(labels[0].len(), 6);
        assert_eq!(diag.code().unwrap().to_string(), "UnexpectedClosingTag");

        let undefined = Diagnostic::create(DiagnosticCode::UnexpectedClosingTag, None, &["p"]);
        assert!(undefined.labels().is_none());
    }

    #[test]
    fn test_codes_index_registry() {
        for code in DiagnosticCode::ALL {
            assert_eq!(code.descriptor().code, code);
            assert_eq!(code.descriptor().severity, Severity::Error);
        }
    }

    #[test]
    fn test_has_errors() {
        assert!(!has_errors(&[]));
        let diag = Diagnostic::create(DiagnosticCode::MultipleComponents, None, &["A", "B"]);
        assert!(has_errors(&[diag]));
    }
}
