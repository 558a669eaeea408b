//! Whole-file driver: locates `property: value;` statements and rewrites only
//! their value segment.
//!
//! This is a single flat regex pass, deliberately not a CSS parser: selectors,
//! braces, at-rules, comments and whitespace between rules are copied
//! verbatim, and nesting is never interpreted.

use crate::config::Config;
use crate::pipeline::optimize_value;
use once_cell::sync::Lazy;
use regex::Regex;

static DECLARATION_PATTERN: Lazy<Regex> = Lazy::new(build_declaration_pattern);

#[allow(clippy::expect_used, reason = "the pattern is a compile-time constant")]
fn build_declaration_pattern() -> Regex {
    Regex::new(r"([\w-]+)(\s*:\s*)([^;{}]+);").expect("declaration pattern is valid")
}

/// A single `property: value;` statement located in stylesheet text.
///
/// Borrowed from the scanned text; created per match and consumed
/// immediately by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declaration<'text> {
    /// Property name as written.
    pub property: &'text str,
    /// The literal whitespace/colon span between property and value,
    /// preserved byte-for-byte on reassembly.
    pub separator: &'text str,
    /// Raw value text, without the trailing `;`.
    pub value: &'text str,
}

/// Scan stylesheet text for declaration statements, first match to last.
pub fn find_declarations(content: &str) -> impl Iterator<Item = Declaration<'_>> {
    DECLARATION_PATTERN.captures_iter(content).filter_map(|captures| {
        Some(Declaration {
            property: captures.get(1)?.as_str(),
            separator: captures.get(2)?.as_str(),
            value: captures.get(3)?.as_str(),
        })
    })
}

/// Rewrite every declaration value in `content` through the value pipeline,
/// returning the reassembled text. Declarations are independent; everything
/// outside a match is untouched.
pub fn transform_file_content(content: &str, config: &Config) -> String {
    DECLARATION_PATTERN
        .replace_all(content, |captures: &regex::Captures<'_>| {
            let property = &captures[1];
            let separator = &captures[2];
            let value = &captures[3];
            format!("{property}{separator}{};", optimize_value(property, value, config))
        })
        .into_owned()
}
