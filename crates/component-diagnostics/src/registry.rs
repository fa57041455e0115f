//! The fixed table of diagnostic descriptors.

use crate::{DiagnosticCode, Severity};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Matches `{N}` placeholders in message templates.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\d+)\}").unwrap());

/// A registered diagnostic: its code, severity and message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    /// The diagnostic code.
    pub code: DiagnosticCode,
    /// The severity every diagnostic of this kind is reported with.
    pub severity: Severity,
    /// Message template with positional `{N}` placeholders.
    pub template: &'static str,
}

impl DiagnosticDescriptor {
    /// Format the message template with positional arguments.
    ///
    /// Placeholders without a matching argument are left as written.
    pub fn format(&self, args: &[&str]) -> String {
        PLACEHOLDER
            .replace_all(self.template, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| args.get(index))
                    .map(|arg| arg.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// All diagnostic descriptors, indexed by [`DiagnosticCode`] discriminant.
pub static DESCRIPTORS: [DiagnosticDescriptor; 7] = [
    DiagnosticDescriptor {
        code: DiagnosticCode::InvalidComponentAttributeSyntax,
        severity: Severity::Error,
        template: "Wrong syntax for '{0}' on '{1}': component attributes must be expressed \
                   with expression syntax. For example, SomeParam=@(\"Some value\") is allowed, \
                   but SomeParam=\"Some value\" is not.",
    },
    DiagnosticDescriptor {
        code: DiagnosticCode::UnexpectedClosingTag,
        severity: Severity::Error,
        template: "Unexpected closing tag '{0}' with no matching start tag.",
    },
    DiagnosticDescriptor {
        code: DiagnosticCode::MismatchedClosingTag,
        severity: Severity::Error,
        template: "Mismatching closing tag. Found '{0}' but expected '{1}'.",
    },
    DiagnosticDescriptor {
        code: DiagnosticCode::MismatchedClosingTagKind,
        severity: Severity::Error,
        template: "Mismatching closing tag. Found '{0}' of type '{1}' but expected type '{2}'.",
    },
    DiagnosticDescriptor {
        code: DiagnosticCode::MultipleComponents,
        severity: Severity::Error,
        template: "Multiple components use the tag '{0}'. Components: {1}",
    },
    DiagnosticDescriptor {
        code: DiagnosticCode::UnsupportedComplexContent,
        severity: Severity::Error,
        template: "Component attributes do not support complex content (mixed expressions \
                   and markup). Attribute: '{0}', text '{1}'",
    },
    DiagnosticDescriptor {
        code: DiagnosticCode::UnboundComponentAttribute,
        severity: Severity::Error,
        template: "The component '{0}' does not have an attribute named '{1}'.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format() {
        let descriptor = DiagnosticCode::MismatchedClosingTagKind.descriptor();
        assert_eq!(
            descriptor.format(&["p", "element", "component"]),
            "Mismatching closing tag. Found 'p' of type 'element' but expected type 'component'."
        );
    }

    #[test]
    fn test_format_missing_argument() {
        let descriptor = DiagnosticCode::MismatchedClosingTag.descriptor();
        assert_eq!(
            descriptor.format(&["div"]),
            "Mismatching closing tag. Found 'div' but expected '{1}'."
        );
    }

    #[test]
    fn test_format_does_not_reinterpret_arguments() {
        let descriptor = DiagnosticCode::UnexpectedClosingTag.descriptor();
        assert_eq!(
            descriptor.format(&["{0}"]),
            "Unexpected closing tag '{0}' with no matching start tag."
        );
    }
}
