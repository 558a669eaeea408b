//! Stock strategy implementations injected through the configuration:
//! value transformers and variable resolvers.

use crate::config::{ValueTransform, VariableResolver};
use regex::Regex;

/// Unwraps a marker function around a dimension token, e.g.
/// `to-rem(16px)` → `16px`, so the plain token reaches the convert stage.
pub struct FunctionUnwrap {
    pattern: Regex,
}

impl FunctionUnwrap {
    /// Build an unwrapper for `function(<dimension>)` calls.
    ///
    /// # Errors
    /// Returns the regex error if the function name produces an invalid
    /// pattern (not expected for validated names).
    pub fn new(function: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"{}\((-?(?:\d+(?:\.\d+)?|\.\d+)(?:px|rem))\)",
            regex::escape(function)
        ))?;
        Ok(Self { pattern })
    }
}

impl ValueTransform for FunctionUnwrap {
    fn apply(&self, value: &str) -> String {
        self.pattern.replace_all(value, "$1").into_owned()
    }
}

/// Variable resolver backed by a fixed pixel-size → name table.
pub struct SizeVariableMap {
    entries: Vec<(f64, String)>,
}

impl SizeVariableMap {
    pub fn new(entries: Vec<(f64, String)>) -> Self {
        Self { entries }
    }
}

impl VariableResolver for SizeVariableMap {
    fn name_for(&self, size_in_px: f64) -> Option<String> {
        self.entries
            .iter()
            .find(|(size, _)| (size - size_in_px).abs() < 1e-9)
            .map(|(_, name)| name.clone())
    }
}
