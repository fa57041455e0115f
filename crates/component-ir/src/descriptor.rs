//! Component descriptors attached to usage nodes by the binder.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// What a descriptor binds a tag to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescriptorKind {
    /// A component type; usages are lowered to component markers.
    #[default]
    Component,
    /// Any other tag binding; usages are left for other passes.
    TagHelper,
}

/// Metadata for a component type: its full name and its bindable properties.
///
/// Descriptors are immutable once published and are shared between usage
/// and property nodes behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentDescriptor {
    /// Fully qualified type name, e.g. `Test.MyComponent`.
    pub type_name: SmolStr,
    /// Descriptor kind.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: DescriptorKind,
    /// Declared properties, attribute name to property name, in declaration
    /// order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: IndexMap<SmolStr, SmolStr>,
}

impl ComponentDescriptor {
    /// Create a component descriptor with no declared properties.
    pub fn component(type_name: impl Into<SmolStr>) -> Self {
        Self {
            type_name: type_name.into(),
            kind: DescriptorKind::Component,
            properties: IndexMap::new(),
        }
    }

    /// Create a descriptor for a non-component tag binding.
    pub fn tag_helper(type_name: impl Into<SmolStr>) -> Self {
        Self {
            type_name: type_name.into(),
            kind: DescriptorKind::TagHelper,
            properties: IndexMap::new(),
        }
    }

    /// Declare a property bound from `attribute_name`.
    pub fn with_property(
        mut self,
        attribute_name: impl Into<SmolStr>,
        property_name: impl Into<SmolStr>,
    ) -> Self {
        self.properties
            .insert(attribute_name.into(), property_name.into());
        self
    }

    /// Look up the property an attribute binds to.
    pub fn property_name(&self, attribute_name: &str) -> Option<&SmolStr> {
        self.properties.get(attribute_name)
    }

    /// Check if this descriptor describes a component.
    pub fn is_component(&self) -> bool {
        self.kind == DescriptorKind::Component
    }
}
