//! The per-declaration value pipeline: transform → convert → round.

use crate::config::{Config, PropertyRule, RoundMode};
use cssnap_tokens::{DimensionToken, ROUND_NOTE, find_tokens};
use cssnap_units::{Unit, format_dimension, from_px, to_px};
use log::error;

/// Optimize a single declaration value for `property`.
///
/// A property absent from the configuration short-circuits the pipeline and
/// the original value is returned untouched. A value with no dimension tokens
/// passes through every stage unchanged. Malformed numeric text never fails;
/// unmatched spans are copied verbatim.
pub fn optimize_value(property: &str, value: &str, config: &Config) -> String {
    let Some(rule) = config.properties.get(property) else {
        return value.to_owned();
    };

    let mut current = value.to_owned();
    if rule.transform {
        for transformer in &config.transformers {
            current = transformer.apply(&current);
        }
    }
    if rule.convert {
        current = convert_stage(&current, rule.unit, config);
    }
    if rule.round {
        current = round_stage(&current, rule, config);
    }
    current
}

/// Rewrite every dimension token in `value` through `render`, copying the
/// text between tokens verbatim. Token spans include trailing round-mode
/// annotations, so a stale annotation is replaced rather than duplicated.
fn replace_tokens(
    value: &str,
    mut render: impl FnMut(&DimensionToken, &str) -> String,
) -> String {
    let mut output = String::with_capacity(value.len());
    let mut cursor = 0;
    for token in find_tokens(value) {
        output.push_str(&value[cursor..token.start]);
        output.push_str(&render(&token, &value[token.start..token.end]));
        cursor = token.end;
    }
    output.push_str(&value[cursor..]);
    output
}

/// Convert every token to the property's target unit. Tokens already in the
/// target unit pass through the identity conversion, which still normalizes
/// their textual form (`.125rem` → `0.125rem`).
fn convert_stage(value: &str, target: Unit, config: &Config) -> String {
    replace_tokens(value, |token, _original| {
        let converted =
            cssnap_units::convert(token.magnitude, token.unit, target, config.base_font_size);
        format_dimension(converted, target)
    })
}

/// Snap every token to the pixel size scale and render it according to the
/// configured round mode. Snapping happens on the magnitude in pixel space;
/// the sign is reapplied afterwards, and the tie direction is inverted for
/// negative values so that "up" keeps meaning "away from zero magnitude".
fn round_stage(value: &str, rule: &PropertyRule, config: &Config) -> String {
    replace_tokens(value, |token, original| {
        let negative = token.is_negative();
        let magnitude = token.magnitude.abs();
        let magnitude_px = to_px(magnitude, token.unit, config.base_font_size);

        let tie_break_up = if negative {
            !config.round_strategy.on_tie.is_up()
        } else {
            config.round_strategy.on_tie.is_up()
        };

        let Some(rounded_px) =
            cssnap_scale::closest(&config.sizes_in_pixel, magnitude_px, tie_break_up)
        else {
            error!("empty size scale; leaving `{original}` unchanged");
            return original.to_owned();
        };

        let rounded_in_unit = from_px(rounded_px, token.unit, config.base_font_size);
        let signed = |value: f64| if negative { -value } else { value };

        let rounded_form = config.resolve_variable(rule, rounded_px).map_or_else(
            || format_dimension(signed(rounded_in_unit), token.unit),
            |name| render_variable(&name, negative && rounded_px != 0.0),
        );
        let converted_form = format_dimension(signed(magnitude), token.unit);
        let already_snapped = (magnitude_px - rounded_px).abs() < 1e-9;

        match config.round_strategy.mode {
            RoundMode::On => rounded_form,
            RoundMode::Off => converted_form,
            RoundMode::Comment => {
                if already_snapped {
                    rounded_form
                } else {
                    format!("{converted_form} /* {ROUND_NOTE} {rounded_form} */")
                }
            }
        }
    })
}

/// Render a resolved variable name, negating when the source value was
/// negative. Custom properties wrap in `var()` / `calc(-1 * var())`; other
/// naming schemes (e.g. preprocessor variables) render bare / parenthesized.
fn render_variable(name: &str, negative: bool) -> String {
    if name.starts_with("--") {
        if negative {
            format!("calc(-1 * var({name}))")
        } else {
            format!("var({name})")
        }
    } else if negative {
        format!("(-{name})")
    } else {
        name.to_owned()
    }
}
