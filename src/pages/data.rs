//! Feed decoding and the small reshaping helpers charts need.

use serde::de::DeserializeOwned;

/// Decode JSON embedded in the page.
///
/// Absent, blank or malformed text yields `T::default()`, so downstream
/// initialisers see missing keys and skip.
pub fn parse_embedded<T: DeserializeOwned + Default>(text: Option<&str>) -> T {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return T::default();
    };
    serde_json::from_str(text).unwrap_or_else(|e| {
        log::warn!("embedded data: {e}");
        T::default()
    })
}

/// A feed key that is present and non-empty.
pub fn present<T>(values: &Option<Vec<T>>) -> Option<&[T]> {
    values.as_deref().filter(|v| !v.is_empty())
}

/// `YYYY-MM-DD` to `MM/DD`. Anything else is returned unchanged.
pub fn short_date(date: &str) -> String {
    let mut parts = date.split('-').skip(1);
    match (parts.next(), parts.next()) {
        (Some(month), Some(day)) => format!("{month}/{day}"),
        _ => date.to_string(),
    }
}

pub fn short_dates(dates: &[String]) -> Vec<String> {
    dates.iter().map(|d| short_date(d)).collect()
}

/// Copy of `values` extended with `fill` up to `len`.
pub fn pad_to(values: Option<&[f64]>, len: usize, fill: f64) -> Vec<f64> {
    let mut out = values.map(<[f64]>::to_vec).unwrap_or_default();
    if out.len() < len {
        out.resize(len, fill);
    }
    out
}

/// Label counterpart of [`pad_to`], filling with empty labels.
pub fn pad_labels(labels: Option<&[String]>, len: usize) -> Vec<String> {
    let mut out = labels.map(<[String]>::to_vec).unwrap_or_default();
    if out.len() < len {
        out.resize(len, String::new());
    }
    out
}

/// Consumed over prepared as a percentage, 0 when undefined.
pub fn meal_efficiency(prepared: f64, consumed: f64) -> f64 {
    let rate = consumed / prepared * 100.0;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// Value at `index`, 0 when missing or not a number.
pub fn value_at(values: Option<&[f64]>, index: usize) -> f64 {
    values
        .and_then(|v| v.get(index))
        .copied()
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

/// Minimal escaping for text placed into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::AttendanceFeed;
    use test_case::test_case;

    #[test_case("2024-03-07", "03/07" ; "iso date")]
    #[test_case("2024-12-31T00:00", "12/31T00:00" ; "keeps trailing time")]
    #[test_case("Mon", "Mon" ; "not a date")]
    #[test_case("", "" ; "empty")]
    fn test_short_date(input: &str, expected: &str) {
        assert_eq!(short_date(input), expected);
    }

    #[test]
    fn test_parse_embedded_fallbacks() {
        let feed: AttendanceFeed = parse_embedded(None);
        assert_eq!(feed, AttendanceFeed::default());
        let feed: AttendanceFeed = parse_embedded(Some("   "));
        assert!(feed.dates.is_none());
        let feed: AttendanceFeed = parse_embedded(Some("{not json"));
        assert!(feed.dates.is_none());
        let feed: AttendanceFeed = parse_embedded(Some(r#"{"dates": ["2024-01-01"]}"#));
        assert_eq!(feed.dates.unwrap().len(), 1);
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_to(Some(&[1.0][..]), 3, 0.0), vec![1.0, 0.0, 0.0]);
        assert_eq!(pad_to(None, 2, 0.0), vec![0.0, 0.0]);
        assert_eq!(pad_to(Some(&[1.0, 2.0][..]), 1, 0.0), vec![1.0, 2.0]);
        assert_eq!(pad_labels(Some(&["Mon".to_string()][..]), 2), vec!["Mon", ""]);
    }

    #[test_case(100.0, 75.0, 75.0 ; "normal")]
    #[test_case(0.0, 0.0, 0.0 ; "nothing prepared")]
    #[test_case(0.0, 5.0, 0.0 ; "division by zero")]
    fn test_meal_efficiency(prepared: f64, consumed: f64, expected: f64) {
        assert_eq!(meal_efficiency(prepared, consumed), expected);
    }

    #[test]
    fn test_value_at() {
        let values = [1.0, f64::NAN];
        assert_eq!(value_at(Some(&values[..]), 0), 1.0);
        assert_eq!(value_at(Some(&values[..]), 1), 0.0);
        assert_eq!(value_at(Some(&values[..]), 5), 0.0);
        assert_eq!(value_at(None, 0), 0.0);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
    }
}
