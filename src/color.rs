//! Color handling for dashboard charts.
//!
//! Colors travel as CSS strings (e.g. `rgba(7, 122, 125, 0.7)`), which the
//! charting library and Canvas 2D both accept directly.

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// RGBA color with u8 channels and a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same channels, different alpha.
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Opaque variant, used for borders.
    pub const fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    /// Convert to a CSS `rgba(r, g, b, a)` string.
    pub fn to_css(self) -> CssColor {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Round a channel value in `[0, 255]` to u8.
    /// The cast is safe because we clamp to [0, 255] before converting.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn channel(value: f64) -> u8 {
        value.clamp(0.0, 255.0).round() as u8
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(0, 0, 0, 0.1)
    }
}

/// Named colors used across the dashboard.
pub mod palette {
    use super::Rgba;

    pub const TEAL: Rgba = Rgba::new(7, 122, 125, 0.7);
    pub const MINT: Rgba = Rgba::new(122, 226, 207, 0.7);
    pub const SAND: Rgba = Rgba::new(245, 238, 221, 0.7);
    pub const CHARCOAL: Rgba = Rgba::new(51, 51, 51, 0.7);
    pub const VIOLET: Rgba = Rgba::new(153, 102, 255, 0.7);

    pub const PINK: Rgba = Rgba::new(255, 99, 132, 0.7);
    pub const BLUE: Rgba = Rgba::new(54, 162, 235, 0.7);
    pub const YELLOW: Rgba = Rgba::new(255, 206, 86, 0.7);
    pub const GREEN: Rgba = Rgba::new(75, 192, 192, 0.7);

    /// Faint black used for matrix cell borders and fills by default.
    pub const HAIRLINE: Rgba = Rgba::new(0, 0, 0, 0.1);
    /// Cell value text.
    pub const INK: Rgba = Rgba::new(0, 0, 0, 0.8);

    /// Series colors cycled by multi-dataset charts.
    pub const SERIES: [Rgba; 5] = [TEAL, PINK, BLUE, YELLOW, GREEN];

    /// Slice colors for pie charts.
    pub const SLICES: [Rgba; 5] = [TEAL, MINT, SAND, CHARCOAL, VIOLET];

    /// Breakfast/lunch/dinner on the overview page.
    pub const MEALS: [Rgba; 3] = [TEAL, MINT, SAND];

    /// Series color for the given dataset index, cycling the palette.
    pub fn series(index: usize) -> Rgba {
        SERIES.get(index % SERIES.len()).copied().unwrap_or(TEAL)
    }
}

/// Red (0%) through yellow (50%) to green (100%), alpha 0.8.
pub fn red_yellow_green(value: f64) -> Rgba {
    if value < 50.0 {
        Rgba::new(255, Rgba::channel(value / 50.0 * 255.0), 0, 0.8)
    } else {
        Rgba::new(
            Rgba::channel(255.0 - (value - 50.0) / 50.0 * 255.0),
            255,
            0,
            0.8,
        )
    }
}

/// Teal whose opacity tracks the value as a percentage.
pub fn teal_alpha(value: f64) -> Rgba {
    let alpha = if value.is_finite() {
        (value / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    palette::TEAL.with_alpha(alpha)
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

    #[test]
    fn test_css_output() {
        assert_eq!(palette::TEAL.to_css(), "rgba(7, 122, 125, 0.7)");
        assert_eq!(palette::TEAL.opaque().to_css(), "rgba(7, 122, 125, 1)");
    }

    #[test_case(0.0, "rgba(255, 0, 0, 0.8)" ; "zero is red")]
    #[test_case(25.0, "rgba(255, 128, 0, 0.8)" ; "quarter is orange")]
    #[test_case(50.0, "rgba(255, 255, 0, 0.8)" ; "half is yellow")]
    #[test_case(100.0, "rgba(0, 255, 0, 0.8)" ; "full is green")]
    fn test_red_yellow_green(value: f64, expected: &str) {
        assert_eq!(red_yellow_green(value).to_css(), expected);
    }

    #[test]
    fn test_teal_alpha_clamps() {
        assert_eq!(teal_alpha(150.0).a, 1.0);
        assert_eq!(teal_alpha(-5.0).a, 0.0);
        assert_eq!(teal_alpha(f64::NAN).a, 0.0);
        assert_eq!(teal_alpha(40.0).a, 0.4);
    }

    #[test]
    fn test_series_cycles() {
        assert_eq!(palette::series(0), palette::TEAL);
        assert_eq!(palette::series(5), palette::TEAL);
        assert_eq!(palette::series(6), palette::PINK);
    }
}
