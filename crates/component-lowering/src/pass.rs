//! The component lowering pass.
//!
//! Rewrites every component usage into the marker shape code generation
//! consumes:
//!
//! ```text
//! Open(type) Attribute(property)* ComponentBody Close
//! ```
//!
//! Bound attributes become `Attribute` markers, the body becomes a
//! `ComponentBody`, and attributes that cannot be lowered are dropped with a
//! diagnostic. Usages are processed in document order, parents before the
//! usages nested inside them.

use crate::options::LoweringOptions;
use component_diagnostics::Diagnostic;
use component_ir::{
    ComponentAttributeNode, ComponentBodyNode, ComponentDescriptor, Node, NodeKind, TagMode,
};
use smol_str::SmolStr;
use source_map::Span;
use tracing::{debug, trace, warn};

/// Output of the lowering pass.
#[derive(Debug, Clone)]
pub struct Lowered {
    /// The rewritten document.
    pub document: Node,
    /// Diagnostics reported by the pass, in emission order. Each is also
    /// attached to the usage node it was reported on.
    pub diagnostics: Vec<Diagnostic>,
}

impl Lowered {
    /// Check if the pass reported any error.
    pub fn has_errors(&self) -> bool {
        component_diagnostics::has_errors(&self.diagnostics)
    }
}

/// Lowers component usages to component markers.
///
/// The pass holds no per-document state; one instance can lower any number
/// of documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ComponentLoweringPass {
    options: LoweringOptions,
}

/// Per-usage state while rebuilding its children.
struct UsageContext<'a> {
    descriptor: &'a ComponentDescriptor,
    ambiguous: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ComponentLoweringPass {
    /// Create a pass with the given options.
    pub fn new(options: LoweringOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &LoweringOptions {
        &self.options
    }

    /// Lower every component usage in `document`.
    ///
    /// A document without a namespace and class is returned unchanged; the
    /// stage that built it has already reported why.
    pub fn execute(&self, mut document: Node) -> Lowered {
        let mut diagnostics = Vec::new();

        if self.options.require_document_structure
            && (document.find_primary_namespace().is_none()
                || document.find_primary_class().is_none())
        {
            debug!("document has no namespace or class, skipping component lowering");
            return Lowered {
                document,
                diagnostics,
            };
        }

        let mut usages = 0;
        self.visit(&mut document, &mut diagnostics, &mut usages);
        debug!(
            usages,
            diagnostics = diagnostics.len(),
            "lowered component usages"
        );

        Lowered {
            document,
            diagnostics,
        }
    }

    fn visit(&self, node: &mut Node, diagnostics: &mut Vec<Diagnostic>, usages: &mut usize) {
        if matches!(node.kind, NodeKind::Usage(_)) && !node.is_lowered_usage() {
            *usages += 1;
            let reported = self.rewrite_usage(node);
            node.diagnostics.extend(reported.iter().cloned());
            diagnostics.extend(reported);
        }

        for child in &mut node.children {
            self.visit(child, diagnostics, usages);
        }
    }

    /// Rewrite one usage node in place, returning the diagnostics reported
    /// against it.
    fn rewrite_usage(&self, node: &mut Node) -> Vec<Diagnostic> {
        let NodeKind::Usage(usage) = &node.kind else {
            return Vec::new();
        };
        let tag_name = usage.tag_name.clone();
        let tag_mode = usage.tag_mode;
        let candidates = usage.descriptors.clone();

        let Some(descriptor) = candidates.first() else {
            warn!(tag = %tag_name, "component usage has no candidate descriptors");
            return Vec::new();
        };

        let mut ctx = UsageContext {
            descriptor: descriptor.as_ref(),
            ambiguous: candidates.len() > 1,
            diagnostics: Vec::new(),
        };

        // The first candidate is used even when the match is ambiguous.
        if ctx.ambiguous {
            ctx.diagnostics.push(Diagnostic::multiple_components(
                node.span.clone(),
                &tag_name,
                candidates.iter().map(|c| c.type_name.as_str()),
            ));
        }

        if !descriptor.is_component() {
            trace!(tag = %tag_name, "usage is not bound to a component, leaving as is");
            return ctx.diagnostics;
        }

        trace!(tag = %tag_name, component = %descriptor.type_name, "lowering component usage");

        let original = std::mem::take(&mut node.children);
        let mut children = Vec::with_capacity(original.len() + 3);
        // Held back so every attribute marker precedes it.
        let mut body: Option<Node> = None;

        children.push(Node::open(descriptor.type_name.clone()));
        for child in original {
            match child.kind {
                NodeKind::Body if body.is_some() => {
                    warn!(tag = %tag_name, "usage has more than one body, dropping the extra");
                }
                NodeKind::Body => {
                    body = Some(Node {
                        kind: component_body(&tag_name, tag_mode),
                        ..child
                    });
                }
                NodeKind::Property(_) => {
                    if let Some(lowered) = self.lower_property(&mut ctx, child) {
                        children.push(lowered);
                    }
                }
                NodeKind::HtmlAttribute(ref attribute) => {
                    let attribute_name = attribute.attribute_name.clone();
                    self.report_unbound(&mut ctx, child.span.clone(), &attribute_name);
                }
                _ => children.push(child),
            }
        }
        children.push(body.unwrap_or_else(|| Node::new(component_body(&tag_name, tag_mode))));
        children.push(Node::close());

        node.children = children;
        ctx.diagnostics
    }

    /// Lower a property attribute to an attribute marker, or drop it with a
    /// diagnostic.
    fn lower_property(&self, ctx: &mut UsageContext<'_>, node: Node) -> Option<Node> {
        let (attribute_name, owner) = match node.kind {
            NodeKind::Property(ref property) => {
                (property.attribute_name.clone(), property.descriptor.clone())
            }
            _ => return Some(node),
        };

        let property_name = if *owner == *ctx.descriptor {
            bound_property_name(ctx.descriptor, &attribute_name)
        } else {
            // Bound to a candidate that lost the tie-break; rebind by name.
            match ctx.descriptor.property_name(&attribute_name) {
                Some(name) => name.clone(),
                None => {
                    self.report_unbound(ctx, node.span, &attribute_name);
                    return None;
                }
            }
        };

        // Mixed markup and expression content has no single value to assign.
        if node.children.len() > 1 {
            ctx.diagnostics.push(Diagnostic::unsupported_complex_content(
                node.span.clone(),
                &attribute_name,
                &node.content_text(),
            ));
            return None;
        }

        Some(Node {
            kind: NodeKind::Attribute(ComponentAttributeNode {
                attribute_name,
                property_name,
            }),
            ..node
        })
    }

    fn report_unbound(
        &self,
        ctx: &mut UsageContext<'_>,
        span: Option<Span>,
        attribute_name: &str,
    ) {
        if ctx.ambiguous && self.options.suppress_unbound_when_ambiguous {
            return;
        }
        ctx.diagnostics.push(Diagnostic::unbound_component_attribute(
            span,
            &ctx.descriptor.type_name,
            attribute_name,
        ));
    }
}

fn component_body(tag_name: &SmolStr, tag_mode: TagMode) -> NodeKind {
    NodeKind::ComponentBody(ComponentBodyNode {
        tag_name: tag_name.clone(),
        tag_mode,
    })
}

fn bound_property_name(descriptor: &ComponentDescriptor, attribute_name: &SmolStr) -> SmolStr {
    match descriptor.property_name(attribute_name) {
        Some(name) => name.clone(),
        None => {
            warn!(
                component = %descriptor.type_name,
                attribute = %attribute_name,
                "bound attribute missing from descriptor, using attribute name"
            );
            attribute_name.clone()
        }
    }
}
