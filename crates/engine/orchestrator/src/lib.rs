//! Value-optimization engine: per-declaration unit conversion, size-scale
//! snapping and variable substitution, plus the whole-file driver that
//! rewrites declaration values in place.
//!
//! The engine consumes a pre-validated [`Config`] and raw stylesheet text; it
//! performs no schema validation and no I/O. Each call is a pure function of
//! `(text, config)`, so batch callers may process files in parallel.

#![forbid(unsafe_code)]

pub mod config;
pub mod pipeline;
pub mod rewriter;
pub mod strategies;

pub use config::{
    Config, PropertyRule, RoundMode, RoundStrategy, TieBreak, ValueTransform, VariableResolver,
};
pub use pipeline::optimize_value;
pub use rewriter::{Declaration, find_declarations, transform_file_content};
pub use strategies::{FunctionUnwrap, SizeVariableMap};
