//! Length parsing and formatting for the handful of value types snapshots carry.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeSpecified {
    #[default]
    Auto,
    Px(f32),
    /// Fraction of the containing block, `0.0..=1.0` for `0%..=100%`.
    Percent(f32),
}

/// Parse a `width`/`height` value. Bare numbers are treated as px.
pub fn parse_size_spec(input: &str) -> Option<SizeSpecified> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("auto") {
        return Some(SizeSpecified::Auto);
    }
    if let Some(pct_str) = trimmed.strip_suffix('%') {
        let percent = pct_str.trim().parse::<f32>().ok()?;
        return percent
            .is_finite()
            .then_some(SizeSpecified::Percent(percent / 100.0));
    }
    parse_px(trimmed).map(SizeSpecified::Px)
}

/// Parse a pixel length such as `"300px"`, `"12.5px"`, `"0"` or a bare number.
///
/// Returns `None` for keywords, other units, and non-finite numbers.
pub fn parse_px(input: &str) -> Option<f32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    let value = number.parse::<f32>().ok()?;
    value.is_finite().then_some(value)
}

/// Format a pixel length with at most two decimals and no trailing zeros.
pub fn format_px(value: f32) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let mut text = format!("{value:.2}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text = String::from("0");
    }
    text.push_str("px");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_px_and_bare_numbers() {
        assert_eq!(parse_px("300px"), Some(300.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("0"), Some(0.0));
        assert_eq!(parse_px("40"), Some(40.0));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px("2em"), None);
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("NaNpx"), None);
    }

    #[test]
    fn parses_size_specs() {
        assert_eq!(parse_size_spec("auto"), Some(SizeSpecified::Auto));
        assert_eq!(parse_size_spec("50%"), Some(SizeSpecified::Percent(0.5)));
        assert_eq!(parse_size_spec("120px"), Some(SizeSpecified::Px(120.0)));
        assert_eq!(parse_size_spec("fit-content"), None);
    }

    #[test]
    fn formats_px_compactly() {
        assert_eq!(format_px(300.0), "300px");
        assert_eq!(format_px(187.5), "187.5px");
        assert_eq!(format_px(33.333_33), "33.33px");
        assert_eq!(format_px(-0.001), "0px");
        assert_eq!(format_px(f32::NAN), "0px");
    }
}
