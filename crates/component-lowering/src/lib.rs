//! Component lowering.
//!
//! This crate rewrites component usages in a bound template tree into the
//! open/attribute/body/close marker shape consumed by code generation, and
//! reports every structural or binding problem it finds as a diagnostic.
//!
//! ```
//! use std::sync::Arc;
//! use component_ir::{ComponentDescriptor, Node, TagMode};
//!
//! let component = Arc::new(ComponentDescriptor::component("Test.MyComponent"));
//! let document = Node::document().with_child(
//!     Node::namespace("Test").with_child(
//!         Node::class("Index").with_child(
//!             Node::usage("MyComponent", TagMode::SelfClosing, vec![component])
//!                 .with_child(Node::body()),
//!         ),
//!     ),
//! );
//!
//! let lowered = component_lowering::lower(document);
//! assert!(lowered.diagnostics.is_empty());
//! ```

pub mod options;
pub mod pass;

pub use options::{ConfigError, LoweringOptions};
pub use pass::{ComponentLoweringPass, Lowered};

use component_ir::Node;

/// Lower a document with default options.
pub fn lower(document: Node) -> Lowered {
    ComponentLoweringPass::default().execute(document)
}

/// Lower a document with the given options.
pub fn lower_with_options(document: Node, options: LoweringOptions) -> Lowered {
    ComponentLoweringPass::new(options).execute(document)
}
