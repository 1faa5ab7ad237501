//! Chart frame for matrix charts: plot-area layout, title and category ticks.

use crate::error::Result;
use crate::matrix::{CategoryScale, ChartArea, MatrixSpec};
use crate::registry::DatasetController;

use super::Surface;

/// Height reserved above the plot for the title.
pub const TITLE_HEIGHT: f64 = 28.0;
/// Height reserved below the plot for x tick labels.
pub const X_TICK_HEIGHT: f64 = 20.0;
/// Extra top padding when the legend is shown.
pub const LEGEND_PAD: f64 = 10.0;

const PADDING: f64 = 8.0;
const CHAR_WIDTH: f64 = 7.0;
const TITLE_FONT: &str = "bold 16px Arial";
const TICK_FONT: &str = "12px Arial";
const TICK_COLOR: &str = "#666666";
const TITLE_COLOR: &str = "#333333";

/// Width reserved left of the plot for the widest y tick label.
fn y_tick_width(labels: &[String]) -> f64 {
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    widest as f64 * CHAR_WIDTH + PADDING
}

/// Plot area of a `width` x `height` canvas once title, ticks and legend
/// padding are taken out. Never negative.
pub fn plot_area(spec: &MatrixSpec, width: f64, height: f64) -> ChartArea {
    let mut top = PADDING;
    if spec.title.is_some() {
        top += TITLE_HEIGHT;
    }
    if spec.show_legend {
        top += LEGEND_PAD;
    }
    let left = PADDING + y_tick_width(&spec.y_labels);
    let right = width - PADDING;
    let bottom = height - PADDING - X_TICK_HEIGHT;

    ChartArea::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
}

/// Lay `controller` out for the canvas size and draw the whole chart.
///
/// Layout happens before anything is drawn, so a layout error leaves the
/// surface untouched.
pub fn render_matrix(
    surface: &mut dyn Surface,
    controller: &mut dyn DatasetController,
    spec: &MatrixSpec,
    width: f64,
    height: f64,
) -> Result<ChartArea> {
    let area = plot_area(spec, width, height);
    controller.update(area)?;

    surface.clear_rect(0.0, 0.0, width, height);

    if let Some(title) = &spec.title {
        surface.save();
        surface.set_fill_style(TITLE_COLOR);
        surface.set_font(TITLE_FONT);
        surface.set_text_align("center");
        surface.set_text_baseline("middle");
        let drawn = surface.fill_text(title, width / 2.0, PADDING + TITLE_HEIGHT / 2.0);
        surface.restore();
        drawn?;
    }

    controller.draw(surface)?;

    surface.save();
    surface.set_fill_style(TICK_COLOR);
    surface.set_font(TICK_FONT);
    let drawn = draw_ticks(surface, controller, area);
    surface.restore();
    drawn?;

    Ok(area)
}

fn draw_ticks(
    surface: &mut dyn Surface,
    controller: &dyn DatasetController,
    area: ChartArea,
) -> Result<()> {
    if let Some(scale) = controller.x_scale() {
        surface.set_text_align("center");
        surface.set_text_baseline("top");
        let y = area.bottom() + PADDING / 2.0;
        for (x, label) in ticks(scale) {
            surface.fill_text(label, x, y)?;
        }
    }
    if let Some(scale) = controller.y_scale() {
        surface.set_text_align("right");
        surface.set_text_baseline("middle");
        let x = area.left - PADDING / 2.0;
        for (y, label) in ticks(scale) {
            surface.fill_text(label, x, y)?;
        }
    }
    Ok(())
}

fn ticks(scale: &CategoryScale) -> impl Iterator<Item = (f64, &str)> {
    scale
        .labels()
        .iter()
        .enumerate()
        .filter_map(|(i, label)| Some((scale.pixel_for_index(i)?, label.as_str())))
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
    use crate::charts::heatmap;
    use crate::matrix::{Cell, MatrixController};
    use crate::render::{DrawOp, RecordingSurface};

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn spec() -> MatrixSpec {
        heatmap(
            "Meal Efficiency",
            &labels(&["Breakfast", "Lunch"]),
            &labels(&["Mon", "Tue"]),
            &[vec![10.0, 90.0], vec![20.0, 80.0]],
            2.0,
        )
    }

    #[test]
    fn test_plot_area_margins() {
        let mut s = spec();
        let area = plot_area(&s, 400.0, 300.0);
        // "Mon" is 3 chars wide
        assert_eq!(area.left, 8.0 + 3.0 * 7.0 + 8.0);
        assert_eq!(area.top, 8.0 + 28.0);
        assert_eq!(area.bottom(), 300.0 - 8.0 - 20.0);
        assert_eq!(area.right(), 392.0);

        s.show_legend = true;
        assert_eq!(plot_area(&s, 400.0, 300.0).top, 8.0 + 28.0 + 10.0);

        s.title = None;
        s.show_legend = false;
        assert_eq!(plot_area(&s, 400.0, 300.0).top, 8.0);
    }

    #[test]
    fn test_tiny_canvas_clamps() {
        let area = plot_area(&spec(), 10.0, 10.0);
        assert_eq!(area.width, 0.0);
        assert_eq!(area.height, 0.0);
    }

    #[test]
    fn test_render_draws_title_cells_and_ticks() {
        let s = spec();
        let mut controller = MatrixController::new(&s);
        let mut surface = RecordingSurface::new();
        render_matrix(&mut surface, &mut controller, &s, 400.0, 300.0).unwrap();

        assert!(matches!(surface.ops()[0], DrawOp::Clear { .. }));
        let texts: Vec<_> = surface.texts().collect();
        assert_eq!(texts[0], "Meal Efficiency");
        assert!(texts.contains(&"90.0"));
        assert!(texts.contains(&"Breakfast"));
        assert!(texts.contains(&"Tue"));
        assert_eq!(surface.fills().count(), 4);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_layout_error_draws_nothing() {
        let mut s = spec();
        s.cells.push(Cell::new("Sun", "Lunch", 5.0));
        let mut controller = MatrixController::new(&s);
        let mut surface = RecordingSurface::new();
        assert!(render_matrix(&mut surface, &mut controller, &s, 400.0, 300.0).is_err());
        assert!(surface.ops().is_empty());
    }
}
