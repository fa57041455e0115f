//! Intermediate tree for component lowering.
//!
//! This crate provides the node tree produced by the template parser and
//! binder, the component descriptors the binder attaches to usage nodes,
//! and the lowered marker shape consumed by code generation.

pub mod ast;
pub mod descriptor;
pub mod render_tree;

pub use ast::*;
pub use descriptor::{ComponentDescriptor, DescriptorKind};
pub use render_tree::BuilderOperation;
