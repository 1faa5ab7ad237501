//! Matrix (heatmap) chart type.
//!
//! A grid of axis-aligned cells positioned by two category axes, shaded by
//! value and labelled with the value to one decimal place:
//! - [`CellTable`] flattens a row-major value table into [`Cell`]s
//! - [`CategoryScale`] maps labels to pixel band centres
//! - [`MatrixStyle`] holds constant-or-resolver style values
//! - [`MatrixController`] lays cells out, draws them and hit-tests the pointer
//!
//! The controller is registered with the chart registry under [`MATRIX_TYPE`].

mod cell;
mod controller;
mod geometry;
mod scale;
mod style;
mod tooltip;

pub use cell::{Cell, CellTable};
pub use controller::{MatrixController, MatrixElement};
pub use geometry::{Axis, CellGeometry, ChartArea, HitMode};
pub use scale::CategoryScale;
pub use style::{MatrixStyle, ResolvedStyle, Resolver, ScriptContext, Scriptable};
pub use tooltip::{value_label, TooltipFormat};

/// Registry id of the matrix chart type.
pub const MATRIX_TYPE: &str = "matrix";

/// Everything needed to build a matrix chart.
#[derive(Debug, Clone)]
pub struct MatrixSpec {
    pub title: Option<String>,
    pub label: Option<String>,
    /// Column categories, left to right.
    pub x_labels: Vec<String>,
    /// Row categories, top to bottom.
    pub y_labels: Vec<String>,
    pub cells: Vec<Cell>,
    pub style: MatrixStyle,
    pub tooltip: TooltipFormat,
    /// Matrix charts normally hide the legend.
    pub show_legend: bool,
}

impl MatrixSpec {
    /// Spec over a flattened table with default style and tooltip.
    pub fn new(table: CellTable) -> Self {
        Self {
            title: None,
            label: None,
            x_labels: table.column_labels,
            y_labels: table.row_labels,
            cells: table.cells,
            style: MatrixStyle::default(),
            tooltip: TooltipFormat::default(),
            show_legend: false,
        }
    }
}
