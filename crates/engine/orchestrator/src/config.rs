//! Runtime configuration consumed by the pipeline.
//!
//! The structural invariants (non-empty size scale, finite base font size)
//! are enforced by the external loader/validator before a `Config` reaches
//! this crate; the hot path does not re-check them.

use cssnap_units::Unit;
use std::collections::HashMap;

/// A pre-processing text rewrite applied to a whole value string before unit
/// conversion, e.g. unwrapping a custom marker syntax into plain dimension
/// tokens.
pub trait ValueTransform: Send + Sync {
    fn apply(&self, value: &str) -> String;
}

/// Maps a snapped pixel size to a variable name, or `None` when no variable
/// covers that size.
pub trait VariableResolver: Send + Sync {
    fn name_for(&self, size_in_px: f64) -> Option<String>;
}

/// Direction chosen when two snap candidates are equidistant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    Up,
    Down,
}

impl TieBreak {
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Whether snapping is enforced, skipped, or only annotated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundMode {
    /// Always emit the rounded (or variable) form.
    On,
    /// Always emit the converted, unrounded value.
    Off,
    /// Keep the converted value and append a ` /* tofix ... */` annotation
    /// when it differs from the rounded target.
    Comment,
}

/// Global rounding policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundStrategy {
    pub on_tie: TieBreak,
    pub mode: RoundMode,
}

/// Per-property behavior. Stage flags default to enabled; a property absent
/// from [`Config::properties`] is not touched at all.
pub struct PropertyRule {
    /// Target unit for the convert stage.
    pub unit: Unit,
    /// Run the transform stage for this property.
    pub transform: bool,
    /// Run the convert stage for this property.
    pub convert: bool,
    /// Run the round stage for this property.
    pub round: bool,
    /// Property-specific variable resolver, tried before the generic one.
    pub variables: Option<Box<dyn VariableResolver>>,
}

impl PropertyRule {
    /// A rule targeting `unit` with every stage enabled and no variables.
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            transform: true,
            convert: true,
            round: true,
            variables: None,
        }
    }
}

/// Validated engine configuration, immutable for the duration of a run.
pub struct Config {
    /// Pixels per 1rem.
    pub base_font_size: f64,
    /// Properties the engine touches, keyed by property name.
    pub properties: HashMap<String, PropertyRule>,
    /// Pre-processing rewrites applied in order by the transform stage.
    pub transformers: Vec<Box<dyn ValueTransform>>,
    /// Global rounding policy.
    pub round_strategy: RoundStrategy,
    /// Allowed pixel magnitudes; snapping always happens in pixel space.
    pub sizes_in_pixel: Vec<f64>,
    /// Fallback variable resolver for properties without their own.
    pub generic_variables: Option<Box<dyn VariableResolver>>,
}

impl Config {
    /// Resolve a variable name for a snapped pixel size: the property resolver
    /// first, then the generic one, first non-`None` wins.
    pub fn resolve_variable(&self, rule: &PropertyRule, size_in_px: f64) -> Option<String> {
        rule.variables
            .as_deref()
            .and_then(|resolver| resolver.name_for(size_in_px))
            .or_else(|| {
                self.generic_variables
                    .as_deref()
                    .and_then(|resolver| resolver.name_for(size_in_px))
            })
    }
}
