//! Per-cell style values that are either constant or resolved at layout time.

use std::fmt;
use std::rc::Rc;

use crate::color::{palette, CssColor};

use super::cell::Cell;
use super::geometry::{Axis, ChartArea};

/// What a resolver gets to look at when computing a cell's value.
#[derive(Debug, Clone, Copy)]
pub struct ScriptContext<'a> {
    /// Current drawable area of the chart.
    pub chart_area: ChartArea,
    /// Index of the cell in the dataset.
    pub data_index: usize,
    /// The cell itself.
    pub cell: &'a Cell,
}

/// A caller-supplied function computing a value at draw time.
pub type Resolver<T> = Rc<dyn Fn(&ScriptContext<'_>) -> T>;

/// A style value: fixed, or computed per cell from a [`ScriptContext`].
pub enum Scriptable<T> {
    Constant(T),
    Resolver(Resolver<T>),
}

impl<T: Clone> Scriptable<T> {
    /// Wrap a closure as a resolver.
    pub fn resolver(f: impl Fn(&ScriptContext<'_>) -> T + 'static) -> Self {
        Self::Resolver(Rc::new(f))
    }

    pub fn resolve(&self, ctx: &ScriptContext<'_>) -> T {
        match self {
            Self::Constant(v) => v.clone(),
            Self::Resolver(f) => f(ctx),
        }
    }
}

impl Scriptable<f64> {
    /// Size that tiles the chart area: `(extent / count) - padding`.
    pub fn tiled(axis: Axis, count: usize, padding: f64) -> Self {
        let count = count.max(1) as f64;
        Self::resolver(move |ctx| {
            let extent = match axis {
                Axis::X => ctx.chart_area.width,
                Axis::Y => ctx.chart_area.height,
            };
            extent / count - padding
        })
    }
}

impl<T> From<T> for Scriptable<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

impl<T: Clone> Clone for Scriptable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(v) => Self::Constant(v.clone()),
            Self::Resolver(f) => Self::Resolver(Rc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Scriptable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Style options of a matrix dataset.
#[derive(Debug, Clone)]
pub struct MatrixStyle {
    pub background_color: Scriptable<CssColor>,
    pub border_color: Scriptable<CssColor>,
    pub border_width: Scriptable<f64>,
    pub width: Scriptable<f64>,
    pub height: Scriptable<f64>,
}

impl Default for MatrixStyle {
    fn default() -> Self {
        Self {
            background_color: palette::HAIRLINE.to_css().into(),
            border_color: palette::HAIRLINE.to_css().into(),
            border_width: 1.0.into(),
            width: 20.0.into(),
            height: 20.0.into(),
        }
    }
}

/// Colors and line width after resolution for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub background_color: CssColor,
    pub border_color: CssColor,
    pub border_width: f64,
}

impl MatrixStyle {
    pub fn resolve_colors(&self, ctx: &ScriptContext<'_>) -> ResolvedStyle {
        ResolvedStyle {
            background_color: self.background_color.resolve(ctx),
            border_color: self.border_color.resolve(ctx),
            border_width: self.border_width.resolve(ctx),
        }
    }
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

    fn ctx(cell: &Cell) -> ScriptContext<'_> {
        ScriptContext {
            chart_area: ChartArea::new(0.0, 0.0, 300.0, 140.0),
            data_index: 0,
            cell,
        }
    }

    #[test]
    fn test_constant_and_resolver() {
        let cell = Cell::new("Mon", "Lunch", 42.0);
        let constant: Scriptable<f64> = 5.0.into();
        assert_eq!(constant.resolve(&ctx(&cell)), 5.0);

        let by_value = Scriptable::resolver(|c| c.cell.value * 2.0);
        assert_eq!(by_value.resolve(&ctx(&cell)), 84.0);
    }

    #[test]
    fn test_tiled_sizes() {
        let cell = Cell::new("Mon", "Lunch", 0.0);
        assert_eq!(Scriptable::tiled(Axis::X, 3, 2.0).resolve(&ctx(&cell)), 98.0);
        assert_eq!(Scriptable::tiled(Axis::Y, 7, 1.0).resolve(&ctx(&cell)), 19.0);
    }

    #[test]
    fn test_defaults() {
        let cell = Cell::new("Mon", "Lunch", 0.0);
        let style = MatrixStyle::default().resolve_colors(&ctx(&cell));
        assert_eq!(style.border_width, 1.0);
        assert_eq!(style.border_color, "rgba(0, 0, 0, 0.1)");
        assert_eq!(style.background_color, "rgba(0, 0, 0, 0.1)");
    }
}
