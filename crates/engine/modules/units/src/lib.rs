//! Length units and linear px ↔ rem conversion.
//!
//! The conversion is purely linear and never rounds; snapping to a size scale
//! is a separate concern layered on top by the value pipeline.

#![forbid(unsafe_code)]

/// Supported subset of CSS `<length>` units for the rewriter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Pixels,
    RootEms,
}

impl Unit {
    /// Parse a unit suffix. Returns `None` for units outside the supported set.
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.to_ascii_lowercase().as_str() {
            "px" => Some(Self::Pixels),
            "rem" => Some(Self::RootEms),
            _ => None,
        }
    }

    /// The textual suffix emitted after a magnitude.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Pixels => "px",
            Self::RootEms => "rem",
        }
    }
}

/// Convert a scalar between two linear units given the px-per-rem ratio.
///
/// - Equal units: identity.
/// - px → rem: divide by `base_font_size`. rem → px: multiply by it.
///
/// Exact floating-point arithmetic, no rounding.
pub fn convert(magnitude: f64, source: Unit, target: Unit, base_font_size: f64) -> f64 {
    match (source, target) {
        (Unit::Pixels, Unit::RootEms) => magnitude / base_font_size,
        (Unit::RootEms, Unit::Pixels) => magnitude * base_font_size,
        (Unit::Pixels, Unit::Pixels) | (Unit::RootEms, Unit::RootEms) => magnitude,
    }
}

/// Compute the pixel magnitude of a value expressed in `unit`.
pub fn to_px(magnitude: f64, unit: Unit, base_font_size: f64) -> f64 {
    convert(magnitude, unit, Unit::Pixels, base_font_size)
}

/// Express a pixel magnitude in `unit`.
pub fn from_px(pixels: f64, unit: Unit, base_font_size: f64) -> f64 {
    convert(pixels, Unit::Pixels, unit, base_font_size)
}

/// Render a magnitude with its unit suffix, e.g. `0.9375rem`.
///
/// Relies on `f64`'s shortest round-trip display, so `2.0` renders as `2` and
/// `0.125` stays `0.125`.
pub fn format_dimension(magnitude: f64, unit: Unit) -> String {
    // Normalize negative zero so a snapped `-0` never leaks a sign.
    let magnitude = if magnitude == 0.0 { 0.0 } else { magnitude };
    format!("{magnitude}{}", unit.suffix())
}
