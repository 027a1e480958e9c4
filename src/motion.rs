// Decorative motion: skill bar fill targets and floating shape hints.

/// Style property set on every floating shape, engine or not.
pub const SHAPE_WILL_CHANGE: &str = "transform";

/// Parse a `data-width` percentage, clamped into 0..=100.
pub fn parse_skill_width(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().trim_end_matches('%').trim().parse().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

/// CSS width for a skill bar, e.g. `85%`.
pub fn skill_width_css(raw: &str) -> Option<String> {
    parse_skill_width(raw).map(|percent| format!("{}%", percent))
}
