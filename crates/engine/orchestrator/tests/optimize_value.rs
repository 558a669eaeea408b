use cssnap_pipeline::{
    Config, FunctionUnwrap, PropertyRule, RoundMode, RoundStrategy, SizeVariableMap, TieBreak,
    optimize_value,
};
use cssnap_units::Unit;
use std::collections::HashMap;

const SCALE: &[f64] = &[
    0.0, 1.0, 2.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0, 28.0, 32.0, 36.0, 40.0, 44.0, 48.0, 64.0,
    80.0, 96.0, 112.0, 128.0,
];

fn base_config() -> Config {
    let mut properties = HashMap::new();
    properties.insert("width".to_owned(), PropertyRule::new(Unit::RootEms));
    properties.insert("border".to_owned(), PropertyRule::new(Unit::Pixels));
    properties.insert("padding".to_owned(), PropertyRule::new(Unit::Pixels));
    properties.insert("translate".to_owned(), PropertyRule::new(Unit::RootEms));
    properties.insert("grid-template-rows".to_owned(), PropertyRule::new(Unit::RootEms));
    properties.insert("grid-template-columns".to_owned(), PropertyRule::new(Unit::RootEms));
    Config {
        base_font_size: 16.0,
        properties,
        transformers: Vec::new(),
        round_strategy: RoundStrategy { on_tie: TieBreak::Up, mode: RoundMode::On },
        sizes_in_pixel: SCALE.to_vec(),
        generic_variables: None,
    }
}

fn with_mode(mode: RoundMode, on_tie: TieBreak) -> Config {
    let mut config = base_config();
    config.round_strategy = RoundStrategy { on_tie, mode };
    config
}

fn with_unwrap_transformer() -> Config {
    let mut config = base_config();
    config.transformers = vec![Box::new(FunctionUnwrap::new("to-rem").unwrap())];
    config
}

#[test]
fn converts_and_snaps_basic_values() {
    let config = base_config();
    assert_eq!(optimize_value("width", "0px", &config), "0rem");
    assert_eq!(optimize_value("border", "0px", &config), "0px");
    assert_eq!(optimize_value("width", "16px", &config), "1rem");
    assert_eq!(optimize_value("width", "-16px", &config), "-1rem");
    assert_eq!(optimize_value("width", "-15px", &config), "-1rem");
    assert_eq!(optimize_value("border", "0.125rem", &config), "2px");
    assert_eq!(optimize_value("border", "-0.125rem", &config), "-2px");
    assert_eq!(optimize_value("border", ".125rem", &config), "2px");
    assert_eq!(optimize_value("border", "1.6px", &config), "2px");
    assert_eq!(optimize_value("border", "1.5px", &config), "2px");
}

#[test]
fn unknown_property_and_tokenless_values_pass_through() {
    let config = base_config();
    assert_eq!(optimize_value("color", "16px", &config), "16px");
    assert_eq!(optimize_value("width", "auto", &config), "auto");
    assert_eq!(optimize_value("width", "", &config), "");
    assert_eq!(optimize_value("width", "min-content 100%", &config), "min-content 100%");
}

#[test]
fn multi_token_shorthand_processed_left_to_right() {
    let config = base_config();
    assert_eq!(
        optimize_value("border", "0.0625rem 0.0625rem 0.0625rem 0.0625rem;", &config),
        "1px 1px 1px 1px;"
    );
    assert_eq!(optimize_value("border", "1px 0.0625rem 1px 0.0625rem;", &config), "1px 1px 1px 1px;");
    assert_eq!(optimize_value("padding", "1rem 2rem 3rem 4rem;", &config), "16px 32px 48px 64px;");
}

#[test]
fn surrounding_text_is_preserved() {
    let config = with_unwrap_transformer();
    assert_eq!(
        optimize_value("grid-template-rows", "min-content min-content auto to-rem(60px);", &config),
        "min-content min-content auto 4rem;"
    );
    assert_eq!(
        optimize_value("grid-template-columns", "to-rem(16px) calc(100% - to-rem(16px));", &config),
        "1rem calc(100% - 1rem);"
    );
}

#[test]
fn transform_stage_unwraps_markers() {
    let config = with_unwrap_transformer();
    assert_eq!(optimize_value("padding", "to-rem(16px)", &config), "16px");
    assert_eq!(optimize_value("width", "to-rem(16px)", &config), "1rem");
    assert_eq!(optimize_value("padding", "to-rem(-16px)", &config), "-16px");
    assert_eq!(optimize_value("width", "to-rem(-16px)", &config), "-1rem");
    assert_eq!(
        optimize_value("padding", "to-rem(4px) to-rem(8px) to-rem(16px) to-rem(32px);", &config),
        "4px 8px 16px 32px;"
    );
    // 30px ties between 28 and 32 (up wins); |-22| ties between 20 and 24
    // (inverted to down for the negative sign).
    assert_eq!(optimize_value("translate", "to-rem(30px) to-rem(-22px);", &config), "2rem -1.25rem;");
}

#[test]
fn comment_mode_annotates_only_unsnapped_values() {
    let config = with_mode(RoundMode::Comment, TieBreak::Up);
    assert_eq!(optimize_value("border", "1.6px", &config), "1.6px /* tofix 2px */");
    assert_eq!(optimize_value("border", "1.5px", &config), "1.5px /* tofix 2px */");
    assert_eq!(optimize_value("border", "1.4px", &config), "1.4px /* tofix 1px */");
    assert_eq!(optimize_value("border", "-1.6px", &config), "-1.6px /* tofix -2px */");
    assert_eq!(optimize_value("border", "-1.5px", &config), "-1.5px /* tofix -1px */");
    assert_eq!(optimize_value("border", "-1.4px", &config), "-1.4px /* tofix -1px */");
    assert_eq!(optimize_value("width", "16px", &config), "1rem");
    assert_eq!(optimize_value("width", "15px", &config), "0.9375rem /* tofix 1rem */");
    assert_eq!(optimize_value("width", "14px", &config), "0.875rem /* tofix 1rem */");
    assert_eq!(optimize_value("width", "-16px", &config), "-1rem");
    assert_eq!(optimize_value("width", "-15px", &config), "-0.9375rem /* tofix -1rem */");
    assert_eq!(optimize_value("width", "-14px", &config), "-0.875rem /* tofix -0.75rem */");
    assert_eq!(
        optimize_value("grid-template-rows", "min-content min-content auto 60px;", &config),
        "min-content min-content auto 3.75rem /* tofix 4rem */;"
    );
}

#[test]
fn off_mode_converts_without_annotating() {
    let config = with_mode(RoundMode::Off, TieBreak::Up);
    assert_eq!(optimize_value("width", "15px", &config), "0.9375rem");
    assert_eq!(optimize_value("border", "1.5px", &config), "1.5px");
    assert_eq!(optimize_value("border", "-1.5px", &config), "-1.5px");
}

#[test]
fn mode_and_tie_combinations() {
    // The 4 effective mode × tie combinations on the 1.5px tie, both signs.
    let cases = [
        (RoundMode::On, TieBreak::Up, "1.5px", "2px"),
        (RoundMode::On, TieBreak::Down, "1.5px", "1px"),
        (RoundMode::On, TieBreak::Up, "-1.5px", "-1px"),
        (RoundMode::On, TieBreak::Down, "-1.5px", "-2px"),
        (RoundMode::Comment, TieBreak::Up, "1.5px", "1.5px /* tofix 2px */"),
        (RoundMode::Comment, TieBreak::Down, "1.5px", "1.5px /* tofix 1px */"),
        (RoundMode::Comment, TieBreak::Up, "-1.5px", "-1.5px /* tofix -1px */"),
        (RoundMode::Comment, TieBreak::Down, "-1.5px", "-1.5px /* tofix -2px */"),
        (RoundMode::Off, TieBreak::Up, "1.5px", "1.5px"),
        (RoundMode::Off, TieBreak::Down, "-1.5px", "-1.5px"),
    ];
    for (mode, on_tie, input, expected) in cases {
        let config = with_mode(mode, on_tie);
        assert_eq!(
            optimize_value("border", input, &config),
            expected,
            "mode {mode:?}, tie {on_tie:?}, input {input}"
        );
    }
}

#[test]
fn sign_symmetry() {
    // Ties excluded: their winner deliberately depends on the sign, so only
    // non-tie magnitudes snap symmetrically.
    let config = base_config();
    for magnitude in ["1.4px", "1.6px", "15px", "21px", "0.125rem"] {
        let positive = optimize_value("border", magnitude, &config);
        let negated = optimize_value("border", &format!("-{magnitude}"), &config);
        // Tie inversion keeps the snapped magnitude equal; only the sign flips.
        if positive == "0px" {
            assert_eq!(negated, positive);
        } else {
            assert_eq!(negated, format!("-{positive}"));
        }
    }
}

#[test]
fn on_mode_is_idempotent() {
    let config = base_config();
    for (property, value) in [("width", "15px"), ("border", "1.5px"), ("padding", "1rem 2rem")] {
        let once = optimize_value(property, value, &config);
        let twice = optimize_value(property, &once, &config);
        assert_eq!(twice, once, "{property}: {value}");
    }
}

#[test]
fn comment_mode_does_not_double_annotate() {
    let config = with_mode(RoundMode::Comment, TieBreak::Up);
    let once = optimize_value("width", "15px", &config);
    assert_eq!(once, "0.9375rem /* tofix 1rem */");
    let twice = optimize_value("width", &once, &config);
    assert_eq!(twice, once);
    let thrice = optimize_value("width", &twice, &config);
    assert_eq!(thrice, once);
}

#[test]
fn variable_resolution_prefers_property_resolver() {
    let mut config = base_config();
    config.generic_variables =
        Some(Box::new(SizeVariableMap::new(vec![(16.0, "--space-4".to_owned())])));
    assert_eq!(optimize_value("width", "16px", &config), "var(--space-4)");
    assert_eq!(optimize_value("width", "-16px", &config), "calc(-1 * var(--space-4))");
    // No entry for 8px: falls back to the plain rounded dimension.
    assert_eq!(optimize_value("width", "8px", &config), "0.5rem");

    // A property-level resolver wins over the generic one.
    if let Some(rule) = config.properties.get_mut("width") {
        rule.variables = Some(Box::new(SizeVariableMap::new(vec![(16.0, "$space-4".to_owned())])));
    }
    assert_eq!(optimize_value("width", "16px", &config), "$space-4");
    assert_eq!(optimize_value("width", "-16px", &config), "(-$space-4)");
    // Other properties still use the generic resolver.
    assert_eq!(optimize_value("border", "16px", &config), "var(--space-4)");
}

#[test]
fn comment_mode_annotates_with_variable_form() {
    let mut config = with_mode(RoundMode::Comment, TieBreak::Up);
    config.generic_variables =
        Some(Box::new(SizeVariableMap::new(vec![(16.0, "--space-4".to_owned())])));
    assert_eq!(optimize_value("width", "16px", &config), "var(--space-4)");
    let once = optimize_value("width", "15px", &config);
    assert_eq!(once, "0.9375rem /* tofix var(--space-4) */");
    assert_eq!(optimize_value("width", &once, &config), once);
}

#[test]
fn stage_flags_disable_individual_stages() {
    let mut config = with_unwrap_transformer();
    if let Some(rule) = config.properties.get_mut("width") {
        rule.transform = false;
    }
    // The marker is not unwrapped, but the dimension inside it is still a
    // token for the later stages.
    assert_eq!(optimize_value("width", "to-rem(16px)", &config), "to-rem(1rem)");

    let mut config = base_config();
    if let Some(rule) = config.properties.get_mut("width") {
        rule.convert = false;
    }
    // Unconverted but still snapped in the token's own unit.
    assert_eq!(optimize_value("width", "15px", &config), "16px");

    let mut config = base_config();
    if let Some(rule) = config.properties.get_mut("width") {
        rule.round = false;
    }
    assert_eq!(optimize_value("width", "15px", &config), "0.9375rem");
}
