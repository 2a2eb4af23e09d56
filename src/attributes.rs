//! Reading a [`LayoutConfig`] from declarative container attributes.
//!
//! Attribute values arrive as free-form strings, from markup `data-*`
//! attributes or command-line flags. Parsing is lenient: numbers are read from
//! their longest numeric prefix (`"12px"` is 12), and a value that is missing,
//! unreadable or zero falls back to the attribute default. Negative numbers
//! pass through untouched; range checks belong to [`LayoutConfig::normalized`].

use bevy::prelude::Reflect;

use crate::layout::{
    DEFAULT_COLS, DEFAULT_HEIGHT_MARGIN, DEFAULT_ROWS, DEFAULT_SIZE, DEFAULT_SPACING, LayoutConfig,
    Orientation,
};

/// Attribute key for the orientation tag.
pub const ORIENTATION_KEY: &str = "orientationlabel";
/// Attribute key for the declared row count.
pub const ROWS_KEY: &str = "rowsrange";
/// Attribute key for the column count.
pub const COLS_KEY: &str = "colsrange";
/// Attribute key for the hexagon radius.
pub const SIZE_KEY: &str = "sizerange";
/// Attribute key for the extra center spacing.
pub const SPACING_KEY: &str = "spacingrange";
/// Attribute key for the container height margin.
pub const HEIGHT_MARGIN_KEY: &str = "heightmargin";

/// Raw, unparsed container attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Reflect)]
pub struct ContainerAttributes {
    /// `orientationlabel`: `"flat-top"` or `"pointy-top"`.
    pub orientation: Option<String>,
    /// `rowsrange`, integer.
    pub rows: Option<String>,
    /// `colsrange`, integer.
    pub cols: Option<String>,
    /// `sizerange`, decimal.
    pub size: Option<String>,
    /// `spacingrange`, decimal.
    pub spacing: Option<String>,
    /// `heightmargin`, integer.
    pub height_margin: Option<String>,
}

impl ContainerAttributes {
    /// Collects attributes from key/value pairs. Keys may carry a `data-`
    /// prefix; unknown keys are ignored and later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut attrs = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let slot = match key.strip_prefix("data-").unwrap_or(key) {
                ORIENTATION_KEY => &mut attrs.orientation,
                ROWS_KEY => &mut attrs.rows,
                COLS_KEY => &mut attrs.cols,
                SIZE_KEY => &mut attrs.size,
                SPACING_KEY => &mut attrs.spacing,
                HEIGHT_MARGIN_KEY => &mut attrs.height_margin,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        attrs
    }

    /// Returns `self` with every attribute that `overrides` sets replaced.
    pub fn merged(self, overrides: &ContainerAttributes) -> Self {
        let pick = |base: Option<String>, over: &Option<String>| over.clone().or(base);
        Self {
            orientation: pick(self.orientation, &overrides.orientation),
            rows: pick(self.rows, &overrides.rows),
            cols: pick(self.cols, &overrides.cols),
            size: pick(self.size, &overrides.size),
            spacing: pick(self.spacing, &overrides.spacing),
            height_margin: pick(self.height_margin, &overrides.height_margin),
        }
    }

    /// Converts to a layout config using the attribute defaults.
    pub fn to_layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            orientation: parse_orientation(self.orientation.as_deref()),
            rows: int_or(self.rows.as_deref(), DEFAULT_ROWS),
            cols: int_or(self.cols.as_deref(), DEFAULT_COLS),
            size: float_or(self.size.as_deref(), DEFAULT_SIZE),
            spacing: float_or(self.spacing.as_deref(), DEFAULT_SPACING),
            height_margin: int_or(self.height_margin.as_deref(), DEFAULT_HEIGHT_MARGIN as i64)
                as f64,
        }
    }
}

/// Missing or empty selects flat-top, and so does the exact `"flat-top"` tag.
/// Any other tag selects pointy-top.
pub fn parse_orientation(value: Option<&str>) -> Orientation {
    match value {
        None | Some("" | "flat-top") => Orientation::FlatTop,
        Some(_) => Orientation::PointyTop,
    }
}

fn int_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(parse_int_prefix)
        .filter(|&v| v != 0)
        .unwrap_or(default)
}

fn float_or(value: Option<&str>, default: f64) -> f64 {
    value
        .and_then(parse_float_prefix)
        .filter(|&v| v != 0.0)
        .unwrap_or(default)
}

/// Leading base-10 integer of `s`, ignoring leading whitespace and anything
/// after the digits. `"2.9"` is 2, `"12px"` is 12, `"px12"` is `None`.
/// Values beyond `i64` saturate at `i64::MIN` / `i64::MAX`.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign_len..]);
    if digits == 0 {
        return None;
    }
    match s[..sign_len + digits].parse() {
        Ok(n) => Some(n),
        // only overflow is left once the digits are known to be well-formed
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Leading decimal number of `s` (sign, digits, fraction, exponent),
/// ignoring leading whitespace and any trailing text.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_int_prefix ────────────────────────────────────────────

    #[test]
    fn int_prefix_stops_at_first_non_digit() {
        assert_eq!(parse_int_prefix("12px"), Some(12));
        assert_eq!(parse_int_prefix("2.9"), Some(2));
        assert_eq!(parse_int_prefix("  -7 rows"), Some(-7));
        assert_eq!(parse_int_prefix("+3"), Some(3));
    }

    #[test]
    fn int_prefix_saturates_on_overflow() {
        assert_eq!(parse_int_prefix("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("-99999999999999999999px"), Some(i64::MIN));

        let attrs = ContainerAttributes::from_pairs([("data-colsrange", "99999999999999999999")]);
        assert_eq!(attrs.to_layout_config().cols, i64::MAX);
    }

    #[test]
    fn int_prefix_rejects_leading_garbage() {
        assert_eq!(parse_int_prefix("px12"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    // ── parse_float_prefix ──────────────────────────────────────────

    #[test]
    fn float_prefix_reads_fraction_and_exponent() {
        assert_eq!(parse_float_prefix("40.5px"), Some(40.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1.5e1"), Some(15.0));
        assert_eq!(parse_float_prefix("-2E-1x"), Some(-0.2));
    }

    #[test]
    fn float_prefix_ignores_dangling_exponent() {
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("3e+"), Some(3.0));
    }

    #[test]
    fn float_prefix_rejects_non_numbers() {
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("-.e3"), None);
    }

    // ── orientation ─────────────────────────────────────────────────

    #[test]
    fn orientation_defaults_to_flat_top() {
        assert_eq!(parse_orientation(None), Orientation::FlatTop);
        assert_eq!(parse_orientation(Some("")), Orientation::FlatTop);
        assert_eq!(parse_orientation(Some("flat-top")), Orientation::FlatTop);
    }

    #[test]
    fn any_other_orientation_tag_is_pointy_top() {
        assert_eq!(parse_orientation(Some("pointy-top")), Orientation::PointyTop);
        assert_eq!(parse_orientation(Some("Flat-Top")), Orientation::PointyTop);
        assert_eq!(parse_orientation(Some("sideways")), Orientation::PointyTop);
    }

    // ── to_layout_config ────────────────────────────────────────────

    #[test]
    fn no_attributes_gives_default_config() {
        assert_eq!(
            ContainerAttributes::default().to_layout_config(),
            LayoutConfig::default()
        );
    }

    #[test]
    fn from_pairs_accepts_data_prefix_and_skips_unknown_keys() {
        let attrs = ContainerAttributes::from_pairs([
            ("data-orientationlabel", "pointy-top"),
            ("rowsrange", "3"),
            ("data-colsrange", "5"),
            ("sizerange", "32.5"),
            ("spacingrange", "2"),
            ("heightmargin", "6"),
            ("class", "honeycomb-container"),
        ]);
        let cfg = attrs.to_layout_config();
        assert_eq!(cfg.orientation, Orientation::PointyTop);
        assert_eq!(cfg.rows, 3);
        assert_eq!(cfg.cols, 5);
        assert_eq!(cfg.size, 32.5);
        assert_eq!(cfg.spacing, 2.0);
        assert_eq!(cfg.height_margin, 6.0);
    }

    #[test]
    fn zero_and_unreadable_values_take_attribute_defaults() {
        let attrs = ContainerAttributes::from_pairs([
            ("colsrange", "abc"),
            ("sizerange", "0"),
            ("spacingrange", "0"),
            ("heightmargin", "0.9"),
        ]);
        let cfg = attrs.to_layout_config();
        assert_eq!(cfg.cols, 1);
        assert_eq!(cfg.size, 40.0);
        assert_eq!(cfg.spacing, 4.0);
        // integer parse truncates 0.9 to 0, which then defaults
        assert_eq!(cfg.height_margin, 1.0);
    }

    #[test]
    fn negative_values_reach_the_layout_untouched() {
        let attrs = ContainerAttributes::from_pairs([("sizerange", "-5"), ("colsrange", "-2")]);
        let cfg = attrs.to_layout_config();
        assert_eq!(cfg.size, -5.0);
        assert_eq!(cfg.cols, -2);

        let (norm, subs) = cfg.normalized();
        assert_eq!(norm.size, 40.0);
        assert_eq!(norm.cols, 1);
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn later_duplicates_win() {
        let attrs = ContainerAttributes::from_pairs([("colsrange", "2"), ("data-colsrange", "7")]);
        assert_eq!(attrs.cols.as_deref(), Some("7"));
    }

    #[test]
    fn merged_prefers_overrides() {
        let base = ContainerAttributes::from_pairs([("colsrange", "4"), ("rowsrange", "3")]);
        let over = ContainerAttributes {
            cols: Some("6".into()),
            ..Default::default()
        };
        let merged = base.merged(&over);
        assert_eq!(merged.cols.as_deref(), Some("6"));
        assert_eq!(merged.rows.as_deref(), Some("3"));
        assert_eq!(merged.size, None);
    }
}
