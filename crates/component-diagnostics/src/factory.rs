//! Constructors for each diagnostic kind.
//!
//! Every constructor returns a value. A missing span becomes
//! [`Span::undefined`].

use crate::{Diagnostic, DiagnosticCode, Span, TextPosition};

impl Diagnostic {
    /// A component attribute value was written as a literal.
    ///
    /// `position` is the location inside the attribute's nested document,
    /// `span` the location of that document in the file.
    pub fn invalid_component_attribute_syntax(
        position: TextPosition,
        span: Option<&Span>,
        attribute_name: &str,
        component_name: &str,
    ) -> Self {
        Self::create(
            DiagnosticCode::InvalidComponentAttributeSyntax,
            source_map::compose(span, position),
            &[attribute_name, component_name],
        )
    }

    /// Create an unexpected closing tag error.
    pub fn unexpected_closing_tag(span: Option<Span>, tag_name: &str) -> Self {
        Self::create(DiagnosticCode::UnexpectedClosingTag, span, &[tag_name])
    }

    /// Create a mismatched closing tag error.
    pub fn mismatched_closing_tag(span: Option<Span>, found: &str, expected: &str) -> Self {
        Self::create(DiagnosticCode::MismatchedClosingTag, span, &[found, expected])
    }

    /// Create an error for a closing tag that closes an element of another kind.
    pub fn mismatched_closing_tag_kind(
        span: Option<Span>,
        tag_name: &str,
        kind: &str,
        expected_kind: &str,
    ) -> Self {
        Self::create(
            DiagnosticCode::MismatchedClosingTagKind,
            span,
            &[tag_name, kind, expected_kind],
        )
    }

    /// More than one component matched `tag_name`. Type names are listed in
    /// candidate order.
    pub fn multiple_components<I, S>(span: Option<Span>, tag_name: &str, type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let components = type_names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::create(
            DiagnosticCode::MultipleComponents,
            span,
            &[tag_name, components.as_str()],
        )
    }

    /// Create an unsupported complex content error. `text` is the
    /// concatenated text of the attribute value.
    pub fn unsupported_complex_content(
        span: Option<Span>,
        attribute_name: &str,
        text: &str,
    ) -> Self {
        Self::create(
            DiagnosticCode::UnsupportedComplexContent,
            span,
            &[attribute_name, text],
        )
    }

    /// Create an unbound component attribute error.
    pub fn unbound_component_attribute(
        span: Option<Span>,
        component_type: &str,
        attribute_name: &str,
    ) -> Self {
        Self::create(
            DiagnosticCode::UnboundComponentAttribute,
            span,
            &[component_type, attribute_name],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span() -> Span {
        Span::new(Some("Index.cshtml".to_string()), 100, 5, 10, 30)
    }

    #[test]
    fn test_invalid_attribute_syntax_composes_span() {
        let diag = Diagnostic::invalid_component_attribute_syntax(
            TextPosition::new(2, 1, 3),
            Some(&span()),
            "Title",
            "Test.Card",
        );
        assert_eq!(diag.code, DiagnosticCode::InvalidComponentAttributeSyntax);
        assert_eq!(
            diag.span,
            Span::new(Some("Index.cshtml".to_string()), 102, 5, 12, 1)
        );
        assert!(diag.message.starts_with("Wrong syntax for 'Title' on 'Test.Card':"));
    }

    #[test]
    fn test_invalid_attribute_syntax_without_span() {
        let diag = Diagnostic::invalid_component_attribute_syntax(
            TextPosition::new(2, 1, 3),
            None,
            "Title",
            "Test.Card",
        );
        assert!(diag.span.is_undefined());
    }

    #[test]
    fn test_closing_tag_errors() {
        let diag = Diagnostic::mismatched_closing_tag(Some(span()), "span", "div");
        assert_eq!(
            diag.message,
            "Mismatching closing tag. Found 'span' but expected 'div'."
        );
        assert_eq!(diag.span, span());

        let diag = Diagnostic::unexpected_closing_tag(None, "li");
        assert_eq!(diag.code, DiagnosticCode::UnexpectedClosingTag);
        assert!(diag.message.contains("'li'"));
    }

    #[test]
    fn test_closing_tag_kind_error() {
        let diag =
            Diagnostic::mismatched_closing_tag_kind(Some(span()), "Card", "element", "component");
        assert_eq!(diag.code, DiagnosticCode::MismatchedClosingTagKind);
        assert!(diag.is_error());
        assert_eq!(
            diag.message,
            "Mismatching closing tag. Found 'Card' of type 'element' but expected type \
             'component'."
        );
        assert_eq!(diag.span, span());

        let diag = Diagnostic::mismatched_closing_tag_kind(None, "Card", "element", "component");
        assert!(diag.span.is_undefined());
    }

    #[test]
    fn test_multiple_components() {
        let diag = Diagnostic::multiple_components(
            Some(span()),
            "Card",
            ["Test.Card", "Other.Card"],
        );
        assert_eq!(
            diag.message,
            "Multiple components use the tag 'Card'. Components: Test.Card, Other.Card"
        );
    }

    #[test]
    fn test_unsupported_complex_content() {
        let diag = Diagnostic::unsupported_complex_content(None, "Title", "Hello @name");
        assert_eq!(
            diag.message,
            "Component attributes do not support complex content (mixed expressions and markup). \
             Attribute: 'Title', text 'Hello @name'"
        );
    }

    #[test]
    fn test_unbound_component_attribute() {
        let diag = Diagnostic::unbound_component_attribute(Some(span()), "Test.Card", "Bar");
        assert_eq!(
            diag.message,
            "The component 'Test.Card' does not have an attribute named 'Bar'."
        );
        assert_eq!(diag.code.as_str(), "UnboundComponentAttribute");
    }
}
