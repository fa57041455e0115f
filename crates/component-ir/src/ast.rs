//! Node types for the intermediate tree.

use crate::descriptor::ComponentDescriptor;
use crate::render_tree::BuilderOperation;
use component_diagnostics::Diagnostic;
use smol_str::SmolStr;
use source_map::Span;
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// A node in the intermediate tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    /// Source span, if the node came from source text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Option<Span>,
    /// Child nodes in document order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Node>,
    /// Diagnostics reported against this node.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub diagnostics: Vec<Diagnostic>,
}

/// The kinds of node, each with its own payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Root of a document.
    Document,
    /// A namespace declaration.
    Namespace(NamespaceNode),
    /// A class declaration.
    Class(ClassNode),
    /// A tag bound to one or more component candidates.
    Usage(UsageNode),
    /// An attribute bound to a declared property.
    Property(PropertyNode),
    /// An attribute that matched no declared property.
    HtmlAttribute(HtmlAttributeNode),
    /// The inner content region of a usage.
    Body,
    /// Literal markup or an embedded expression.
    Content(ContentNode),
    /// Lowered: start of a component.
    Open(ComponentOpenNode),
    /// Lowered: end of a component.
    Close,
    /// Lowered: inner content region of a component.
    ComponentBody(ComponentBodyNode),
    /// Lowered: a property assignment.
    Attribute(ComponentAttributeNode),
}

/// A namespace declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamespaceNode {
    /// Namespace name.
    pub name: SmolStr,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassNode {
    /// Class name.
    pub name: SmolStr,
}

/// How a usage tag was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagMode {
    /// `<Tag>...</Tag>`
    Paired,
    /// `<Tag />`
    SelfClosing,
}

impl TagMode {
    /// Get the tag mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paired => "paired",
            Self::SelfClosing => "self-closing",
        }
    }
}

/// A component usage, before lowering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageNode {
    /// Tag name as written.
    pub tag_name: SmolStr,
    /// How the tag was written.
    pub tag_mode: TagMode,
    /// Candidate descriptors in binding order.
    pub descriptors: Vec<Arc<ComponentDescriptor>>,
}

/// An attribute bound to a property of `descriptor`.
///
/// The attribute value is held as content children.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyNode {
    /// Attribute name as written.
    pub attribute_name: SmolStr,
    /// The descriptor that declares the property.
    pub descriptor: Arc<ComponentDescriptor>,
}

/// An attribute that is not bound to any property.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HtmlAttributeNode {
    /// Attribute name as written.
    pub attribute_name: SmolStr,
}

/// Whether content is literal markup or an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentKind {
    /// Literal markup or text.
    Markup,
    /// Embedded expression source.
    Expression,
}

/// A content token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentNode {
    /// Content kind.
    pub kind: ContentKind,
    /// Content text.
    pub text: String,
}

/// Start of a lowered component.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentOpenNode {
    /// Fully qualified component type name.
    pub type_name: SmolStr,
}

/// Inner content region of a lowered component.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentBodyNode {
    /// Tag name as written.
    pub tag_name: SmolStr,
    /// Self-closing usages get synthesized empty content downstream.
    pub tag_mode: TagMode,
}

/// A lowered property assignment. The value is held as content children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentAttributeNode {
    /// Attribute name as written.
    pub attribute_name: SmolStr,
    /// Property the value is assigned to.
    pub property_name: SmolStr,
}

impl Node {
    /// Create a node with no span and no children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            span: None,
            children: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Create a document root.
    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    /// Create a namespace declaration.
    pub fn namespace(name: impl Into<SmolStr>) -> Self {
        Self::new(NodeKind::Namespace(NamespaceNode { name: name.into() }))
    }

    /// Create a class declaration.
    pub fn class(name: impl Into<SmolStr>) -> Self {
        Self::new(NodeKind::Class(ClassNode { name: name.into() }))
    }

    /// Create a component usage.
    pub fn usage(
        tag_name: impl Into<SmolStr>,
        tag_mode: TagMode,
        descriptors: Vec<Arc<ComponentDescriptor>>,
    ) -> Self {
        Self::new(NodeKind::Usage(UsageNode {
            tag_name: tag_name.into(),
            tag_mode,
            descriptors,
        }))
    }

    /// Create a bound property attribute.
    pub fn property(
        attribute_name: impl Into<SmolStr>,
        descriptor: Arc<ComponentDescriptor>,
    ) -> Self {
        Self::new(NodeKind::Property(PropertyNode {
            attribute_name: attribute_name.into(),
            descriptor,
        }))
    }

    /// Create an unbound attribute.
    pub fn html_attribute(attribute_name: impl Into<SmolStr>) -> Self {
        Self::new(NodeKind::HtmlAttribute(HtmlAttributeNode {
            attribute_name: attribute_name.into(),
        }))
    }

    /// Create a usage body.
    pub fn body() -> Self {
        Self::new(NodeKind::Body)
    }

    /// Create a markup content token.
    pub fn markup(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Content(ContentNode {
            kind: ContentKind::Markup,
            text: text.into(),
        }))
    }

    /// Create an expression content token.
    pub fn expression(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Content(ContentNode {
            kind: ContentKind::Expression,
            text: text.into(),
        }))
    }

    /// Create a component open marker.
    pub fn open(type_name: impl Into<SmolStr>) -> Self {
        Self::new(NodeKind::Open(ComponentOpenNode {
            type_name: type_name.into(),
        }))
    }

    /// Create a component close marker.
    pub fn close() -> Self {
        Self::new(NodeKind::Close)
    }

    /// Set the span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Get the kind name used in tree dumps.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Document => "Document",
            NodeKind::Namespace(_) => "Namespace",
            NodeKind::Class(_) => "Class",
            NodeKind::Usage(_) => "Usage",
            NodeKind::Property(_) => "Property",
            NodeKind::HtmlAttribute(_) => "HtmlAttribute",
            NodeKind::Body => "Body",
            NodeKind::Content(c) => match c.kind {
                ContentKind::Markup => "Markup",
                ContentKind::Expression => "Expression",
            },
            NodeKind::Open(_) => "Open",
            NodeKind::Close => "Close",
            NodeKind::ComponentBody(_) => "ComponentBody",
            NodeKind::Attribute(_) => "Attribute",
        }
    }

    /// Iterate over this node and all of its descendants in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Find the first namespace declaration in the tree.
    pub fn find_primary_namespace(&self) -> Option<&Node> {
        self.descendants()
            .find(|node| matches!(node.kind, NodeKind::Namespace(_)))
    }

    /// Find the first class declaration in the tree.
    pub fn find_primary_class(&self) -> Option<&Node> {
        self.descendants()
            .find(|node| matches!(node.kind, NodeKind::Class(_)))
    }

    /// Collect every diagnostic in the tree, in pre-order.
    pub fn collect_diagnostics(&self) -> Vec<Diagnostic> {
        self.descendants()
            .flat_map(|node| node.diagnostics.iter().cloned())
            .collect()
    }

    /// Concatenated text of the content children.
    pub fn content_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match &child.kind {
                NodeKind::Content(content) => Some(content.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check if this is a usage that has already been lowered.
    pub fn is_lowered_usage(&self) -> bool {
        matches!(self.kind, NodeKind::Usage(_))
            && self
                .children
                .first()
                .is_some_and(|child| matches!(child.kind, NodeKind::Open(_)))
    }

    /// The builder call a code generator emits for this node, if any.
    pub fn builder_operation(&self) -> Option<BuilderOperation> {
        match &self.kind {
            NodeKind::Open(_) => Some(BuilderOperation::OpenComponent),
            NodeKind::Close => Some(BuilderOperation::CloseComponent),
            NodeKind::Attribute(_) => Some(BuilderOperation::AddAttribute),
            NodeKind::Content(_) => Some(BuilderOperation::AddContent),
            _ => None,
        }
    }

    /// Render the tree as indented text, one node per line.
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0).ok();
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) -> fmt::Result {
        write!(out, "{}{}", "  ".repeat(depth), self.kind_name())?;
        match &self.kind {
            NodeKind::Namespace(n) => write!(out, " {}", n.name)?,
            NodeKind::Class(c) => write!(out, " {}", c.name)?,
            NodeKind::Usage(u) => write!(out, " {} ({})", u.tag_name, u.tag_mode.as_str())?,
            NodeKind::Property(p) => {
                write!(out, " {} -> {}", p.attribute_name, p.descriptor.type_name)?
            }
            NodeKind::HtmlAttribute(a) => write!(out, " {}", a.attribute_name)?,
            NodeKind::Content(c) => write!(out, " {:?}", c.text)?,
            NodeKind::Open(o) => write!(out, " {}", o.type_name)?,
            NodeKind::ComponentBody(b) => {
                write!(out, " {} ({})", b.tag_name, b.tag_mode.as_str())?
            }
            NodeKind::Attribute(a) => {
                write!(out, " {} -> {}", a.attribute_name, a.property_name)?
            }
            NodeKind::Document | NodeKind::Body | NodeKind::Close => {}
        }
        out.push('\n');
        for child in &self.children {
            child.write_tree(out, depth + 1)?;
        }
        Ok(())
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Node {
        let card = Arc::new(
            ComponentDescriptor::component("Test.Card").with_property("Title", "Title"),
        );
        Node::document().with_child(
            Node::namespace("Test").with_child(
                Node::class("Index").with_children([
                    Node::markup("<h1>Hi</h1>"),
                    Node::usage("Card", TagMode::Paired, vec![card.clone()]).with_children([
                        Node::property("Title", card).with_child(Node::expression("title")),
                        Node::body().with_child(Node::markup("text")),
                    ]),
                ]),
            ),
        )
    }

    #[test]
    fn test_descendants_pre_order() {
        let tree = sample();
        let kinds: Vec<_> = tree.descendants().map(Node::kind_name).collect();
        assert_eq!(
            kinds,
            [
                "Document",
                "Namespace",
                "Class",
                "Markup",
                "Usage",
                "Property",
                "Expression",
                "Body",
                "Markup"
            ]
        );
    }

    #[test]
    fn test_primary_structure() {
        let tree = sample();
        assert!(matches!(
            tree.find_primary_namespace().map(|n| &n.kind),
            Some(NodeKind::Namespace(n)) if n.name == "Test"
        ));
        assert!(tree.find_primary_class().is_some());
        assert!(Node::document().find_primary_class().is_none());
    }

    #[test]
    fn test_content_text() {
        let node = Node::html_attribute("title")
            .with_children([Node::markup("Hello "), Node::expression("name")]);
        assert_eq!(node.content_text(), "Hello name");
    }

    #[test]
    fn test_collect_diagnostics() {
        let mut tree = sample();
        tree.children[0].diagnostics.push(Diagnostic::unexpected_closing_tag(None, "p"));
        tree.diagnostics.push(Diagnostic::unexpected_closing_tag(None, "div"));

        let messages: Vec<_> = tree
            .collect_diagnostics()
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("'div'"));
        assert!(messages[1].contains("'p'"));
    }

    #[test]
    fn test_builder_operation() {
        assert_eq!(
            Node::open("Test.Card").builder_operation(),
            Some(BuilderOperation::OpenComponent)
        );
        assert_eq!(
            Node::close().builder_operation().map(|op| op.as_str()),
            Some("CloseComponent")
        );
        assert_eq!(Node::body().builder_operation(), None);
    }

    #[test]
    fn test_tree_string() {
        let tree = sample();
        insta::assert_snapshot!(tree.to_tree_string(), @r###"
        Document
          Namespace Test
            Class Index
              Markup "<h1>Hi</h1>"
              Usage Card (paired)
                Property Title -> Test.Card
                  Expression "title"
                Body
                  Markup "text"
        "###);
    }
}
