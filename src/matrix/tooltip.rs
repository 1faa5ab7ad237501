//! Tooltip text for hovered cells.

use std::fmt;
use std::rc::Rc;

use super::cell::Cell;

/// Formats the tooltip line for a cell.
#[derive(Clone)]
pub struct TooltipFormat(Rc<dyn Fn(&Cell) -> String>);

impl TooltipFormat {
    pub fn new(f: impl Fn(&Cell) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// `"<row> - <column>: <value>%"` with one decimal.
    pub fn percent() -> Self {
        Self::new(|cell| format!("{} - {}: {:.1}%", cell.row, cell.column, cell.value))
    }

    /// `"Efficiency: <value>%"` with one decimal.
    pub fn efficiency() -> Self {
        Self::new(|cell| format!("Efficiency: {:.1}%", cell.value))
    }

    /// `"<row>, <column>"` over `"Efficiency: <value>%"`.
    pub fn day_meal_efficiency() -> Self {
        Self::new(|cell| format!("{}, {}\nEfficiency: {:.1}%", cell.row, cell.column, cell.value))
    }

    pub fn format(&self, cell: &Cell) -> String {
        (self.0)(cell)
    }
}

impl Default for TooltipFormat {
    fn default() -> Self {
        Self::percent()
    }
}

impl fmt::Debug for TooltipFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TooltipFormat(..)")
    }
}

/// Value text drawn inside a cell: one decimal place.
pub fn value_label(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{value:.1}"))
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
    use test_case::test_case;

    #[test_case(72.456, "72.5")]
    #[test_case(60.0, "60.0")]
    #[test_case(0.04, "0.0")]
    #[test_case(99.96, "100.0")]
    fn test_value_label_one_decimal(value: f64, expected: &str) {
        assert_eq!(value_label(value).as_deref(), Some(expected));
    }

    #[test]
    fn test_value_label_skips_nan() {
        assert_eq!(value_label(f64::NAN), None);
    }

    #[test]
    fn test_percent_format() {
        let cell = Cell::new("Tue", "Dinner", 72.456);
        assert_eq!(TooltipFormat::percent().format(&cell), "Tue - Dinner: 72.5%");
        assert_eq!(TooltipFormat::efficiency().format(&cell), "Efficiency: 72.5%");
        assert_eq!(
            TooltipFormat::day_meal_efficiency().format(&cell),
            "Tue, Dinner\nEfficiency: 72.5%"
        );
    }
}
