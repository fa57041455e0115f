//! Operation names of the render-tree builder that lowered output targets.
//!
//! Code generators map lowered markers to ordered calls against this
//! contract. The names are stable and must stay in sync with the runtime.

use std::fmt;

/// A render-tree builder operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderOperation {
    /// Open an HTML element frame.
    OpenElement,
    /// Close the current element frame.
    CloseElement,
    /// Open a component frame.
    OpenComponent,
    /// Close the current component frame.
    CloseComponent,
    /// Append text or an expression value.
    AddContent,
    /// Attach an attribute to the open frame.
    AddAttribute,
    /// Reset the builder.
    Clear,
    /// Read the accumulated frames.
    GetFrames,
}

impl BuilderOperation {
    /// Get the runtime method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenElement => "OpenElement",
            Self::CloseElement => "CloseElement",
            Self::OpenComponent => "OpenComponent",
            Self::CloseComponent => "CloseComponent",
            Self::AddContent => "AddContent",
            Self::AddAttribute => "AddAttribute",
            Self::Clear => "Clear",
            Self::GetFrames => "GetFrames",
        }
    }
}

impl fmt::Display for BuilderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
