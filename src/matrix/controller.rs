//! The matrix dataset controller: layout, drawing and hit-testing of cells.

use crate::color::palette;
use crate::error::{DashboardError, Result};
use crate::registry::DatasetController;
use crate::render::Surface;

use super::cell::Cell;
use super::geometry::{CellGeometry, ChartArea, HitMode};
use super::scale::CategoryScale;
use super::style::{MatrixStyle, ResolvedStyle, ScriptContext};
use super::tooltip::{value_label, TooltipFormat};
use super::{MatrixSpec, MATRIX_TYPE};

const VALUE_FONT: &str = "12px Arial";

/// A laid-out cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixElement {
    pub data_index: usize,
    pub geometry: CellGeometry,
    pub style: ResolvedStyle,
}

/// Owns the cells of one matrix dataset and their current geometry.
///
/// Geometry is rebuilt wholesale by [`MatrixController::update`] whenever the
/// chart area changes; nothing is carried across layout passes.
#[derive(Debug)]
pub struct MatrixController {
    x_scale: CategoryScale,
    y_scale: CategoryScale,
    cells: Vec<Cell>,
    style: MatrixStyle,
    tooltip: TooltipFormat,
    elements: Vec<MatrixElement>,
    area: ChartArea,
}

impl MatrixController {
    pub fn new(spec: &MatrixSpec) -> Self {
        Self {
            x_scale: CategoryScale::new(spec.x_labels.clone(), true),
            y_scale: CategoryScale::new(spec.y_labels.clone(), true),
            cells: spec.cells.clone(),
            style: spec.style.clone(),
            tooltip: spec.tooltip.clone(),
            elements: Vec::new(),
            area: ChartArea::default(),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn elements(&self) -> &[MatrixElement] {
        &self.elements
    }

    pub fn area(&self) -> ChartArea {
        self.area
    }

    pub fn x_scale(&self) -> &CategoryScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &CategoryScale {
        &self.y_scale
    }

    /// Recompute every cell's position, size and style for `area`.
    ///
    /// A cell whose row or column is not declared on its axis fails the whole
    /// pass with [`DashboardError::UnknownCategory`]; the previous geometry is
    /// discarded so nothing is drawn at a bogus position.
    pub fn layout(&mut self, area: ChartArea) -> Result<()> {
        self.area = area;
        self.elements.clear();
        self.x_scale.fit(area.left, area.right());
        self.y_scale.fit(area.top, area.bottom());

        let mut elements = Vec::with_capacity(self.cells.len());
        for (data_index, cell) in self.cells.iter().enumerate() {
            let x = self.x_scale.pixel_for_label(&cell.column).ok_or_else(|| {
                DashboardError::UnknownCategory {
                    axis: "x",
                    label: cell.column.clone(),
                }
            })?;
            let y = self.y_scale.pixel_for_label(&cell.row).ok_or_else(|| {
                DashboardError::UnknownCategory {
                    axis: "y",
                    label: cell.row.clone(),
                }
            })?;

            let ctx = ScriptContext {
                chart_area: area,
                data_index,
                cell,
            };
            let width = self.style.width.resolve(&ctx).max(0.0);
            let height = self.style.height.resolve(&ctx).max(0.0);

            elements.push(MatrixElement {
                data_index,
                geometry: CellGeometry {
                    x,
                    y,
                    width,
                    height,
                },
                style: self.style.resolve_colors(&ctx),
            });
        }

        self.elements = elements;
        Ok(())
    }

    /// Fill, stroke and label every laid-out cell.
    pub fn draw_cells(&self, surface: &mut dyn Surface) -> Result<()> {
        for element in &self.elements {
            let g = &element.geometry;
            let (left, top) = g.origin();

            surface.save();
            surface.set_fill_style(&element.style.background_color);
            surface.fill_rect(left, top, g.width, g.height);

            surface.set_stroke_style(&element.style.border_color);
            surface.set_line_width(element.style.border_width);
            surface.stroke_rect(left, top, g.width, g.height);

            let label = self
                .cells
                .get(element.data_index)
                .and_then(|cell| value_label(cell.value));
            let drawn = match label {
                Some(text) => {
                    surface.set_fill_style(&palette::INK.to_css());
                    surface.set_font(VALUE_FONT);
                    surface.set_text_align("center");
                    surface.set_text_baseline("middle");
                    surface.fill_text(&text, g.x, g.y)
                }
                None => Ok(()),
            };
            surface.restore();
            drawn?;
        }
        Ok(())
    }

    /// Indices of cells matched by the pointer.
    pub fn hits(&self, x: f64, y: f64, mode: HitMode) -> Vec<usize> {
        self.elements
            .iter()
            .filter(|e| e.geometry.hit(x, y, mode))
            .map(|e| e.data_index)
            .collect()
    }

    /// Tooltip text of the first cell under the pointer.
    pub fn tooltip(&self, x: f64, y: f64) -> Option<String> {
        self.hits(x, y, HitMode::Point)
            .first()
            .and_then(|&i| self.cells.get(i))
            .map(|cell| self.tooltip.format(cell))
    }
}

impl DatasetController for MatrixController {
    fn kind(&self) -> &'static str {
        MATRIX_TYPE
    }

    fn update(&mut self, area: ChartArea) -> Result<()> {
        self.layout(area)
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        self.draw_cells(surface)
    }

    fn elements_at(&self, x: f64, y: f64, mode: HitMode) -> Vec<usize> {
        self.hits(x, y, mode)
    }

    fn tooltip_at(&self, x: f64, y: f64) -> Option<String> {
        self.tooltip(x, y)
    }

    fn x_scale(&self) -> Option<&CategoryScale> {
        Some(&self.x_scale)
    }

    fn y_scale(&self) -> Option<&CategoryScale> {
        Some(&self.y_scale)
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
    use crate::matrix::{Axis, CellTable, Scriptable};
    use crate::render::{DrawOp, RecordingSurface};

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn spec() -> MatrixSpec {
        let rows = labels(&["Mon", "Tue"]);
        let cols = labels(&["Breakfast", "Lunch", "Dinner"]);
        let table = CellTable::flatten(
            &rows,
            &cols,
            &[vec![10.0, 90.0, 50.0], vec![20.0, 80.0, 60.0]],
        );
        let mut spec = MatrixSpec::new(table);
        spec.style.width = Scriptable::tiled(Axis::X, 3, 2.0);
        spec.style.height = Scriptable::tiled(Axis::Y, 2, 2.0);
        spec
    }

    #[test]
    fn test_layout_matches_scales() {
        let mut c = MatrixController::new(&spec());
        c.layout(ChartArea::new(0.0, 0.0, 300.0, 200.0)).unwrap();
        assert_eq!(c.elements().len(), 6);
        for e in c.elements() {
            let cell = c.cell(e.data_index).unwrap();
            assert_eq!(Some(e.geometry.x), c.x_scale().pixel_for_label(&cell.column));
            assert_eq!(Some(e.geometry.y), c.y_scale().pixel_for_label(&cell.row));
            assert_eq!(e.geometry.width, 98.0);
            assert_eq!(e.geometry.height, 98.0);
        }
    }

    #[test]
    fn test_relayout_on_resize() {
        let mut c = MatrixController::new(&spec());
        c.layout(ChartArea::new(0.0, 0.0, 300.0, 200.0)).unwrap();
        c.layout(ChartArea::new(10.0, 20.0, 600.0, 400.0)).unwrap();
        let first = &c.elements()[0].geometry;
        assert_eq!(first.x, 110.0);
        assert_eq!(first.y, 120.0);
        assert_eq!(first.width, 198.0);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut s = spec();
        s.cells.push(Cell::new("Sun", "Lunch", 1.0));
        let mut c = MatrixController::new(&s);
        let err = c.layout(ChartArea::new(0.0, 0.0, 300.0, 200.0)).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownCategory { axis: "y", .. }));
        assert!(c.elements().is_empty());
    }

    #[test]
    fn test_draw_fills_strokes_and_labels() {
        let mut c = MatrixController::new(&spec());
        c.layout(ChartArea::new(0.0, 0.0, 300.0, 200.0)).unwrap();
        let mut surface = RecordingSurface::new();
        c.draw_cells(&mut surface).unwrap();

        assert_eq!(surface.fills().count(), 6);
        let texts: Vec<_> = surface.texts().collect();
        assert_eq!(texts, vec!["10.0", "90.0", "50.0", "20.0", "80.0", "60.0"]);
        assert!(surface.ops().iter().any(|op| matches!(
            op,
            DrawOp::StrokeRect { line_width, .. } if *line_width == 1.0
        )));
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_hit_and_tooltip() {
        let mut c = MatrixController::new(&spec());
        c.layout(ChartArea::new(0.0, 0.0, 300.0, 200.0)).unwrap();
        // Tue/Dinner is centred at (250, 150)
        assert_eq!(c.hits(250.0, 150.0, HitMode::Point), vec![5]);
        assert_eq!(c.tooltip(250.0, 150.0).as_deref(), Some("Tue - Dinner: 60.0%"));
        assert_eq!(c.hits(250.0, 0.0, HitMode::XAxis), vec![2, 5]);
        assert_eq!(c.hits(0.0, 50.0, HitMode::YAxis), vec![0, 1, 2]);
        assert!(c.tooltip(299.5, 199.5).is_none());
    }
}
