//! Lowering configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for the component lowering pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoweringOptions {
    /// Skip documents without a namespace and class declaration.
    pub require_document_structure: bool,
    /// Do not report unbound attributes on usages that already report
    /// multiple matching components.
    pub suppress_unbound_when_ambiguous: bool,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        Self {
            require_document_structure: true,
            suppress_unbound_when_ambiguous: false,
        }
    }
}

impl LoweringOptions {
    /// Load options from a JSON object. Missing fields keep their defaults.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Errors from loading lowering options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options were not valid JSON or had the wrong shape.
    #[error("invalid lowering options: {0}")]
    Json(#[from] serde_json::Error),
}
