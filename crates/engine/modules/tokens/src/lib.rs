//! Dimension-token scanning inside declaration value strings.
//!
//! A token is `<optional minus><digits>[.<digits>]<unit>` (or `.<digits>`)
//! with unit ∈ {px, rem}. An inline round-mode annotation immediately
//! following a token (` /* tofix ... */`) is folded into the token's span so a
//! second pass replaces it instead of stacking another one.

#![forbid(unsafe_code)]

use cssnap_units::Unit;
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword used inside round-mode annotations: ` /* tofix <value> */`.
pub const ROUND_NOTE: &str = "tofix";

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(build_token_pattern);

#[allow(clippy::expect_used, reason = "the pattern is a compile-time constant")]
fn build_token_pattern() -> Regex {
    Regex::new(r"(-?(?:\d+(?:\.\d+)?|\.\d+))(px|rem)\b(?: /\* tofix .*? \*/)?")
        .expect("token pattern is valid")
}

/// A dimension token located inside a value string.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionToken {
    /// Byte offset of the token start within the scanned string.
    pub start: usize,
    /// Byte offset one past the token end, including any trailing annotation.
    pub end: usize,
    /// Signed magnitude as written.
    pub magnitude: f64,
    /// The token's unit.
    pub unit: Unit,
}

impl DimensionToken {
    /// Whether the token was written with a leading minus (or parsed negative).
    pub fn is_negative(&self) -> bool {
        self.magnitude < 0.0
    }
}

/// Scan `value` left to right for dimension tokens.
///
/// Lazy, non-overlapping, bounded by the string length. Text that matched the
/// token syntax but does not parse as a finite float is skipped, never an
/// error; the caller simply leaves such spans untouched.
pub fn find_tokens(value: &str) -> impl Iterator<Item = DimensionToken> + '_ {
    TOKEN_PATTERN.captures_iter(value).filter_map(|captures| {
        let span = captures.get(0)?;
        let magnitude: f64 = captures.get(1)?.as_str().parse().ok()?;
        if !magnitude.is_finite() {
            return None;
        }
        let unit = Unit::parse(captures.get(2)?.as_str())?;
        Some(DimensionToken {
            start: span.start(),
            end: span.end(),
            magnitude,
            unit,
        })
    })
}
