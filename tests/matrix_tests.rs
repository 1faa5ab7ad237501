//! Matrix chart tests
//!
//! Covers the category heatmap end to end:
//! - One laid-out element per table entry
//! - Cell centres following the category scales
//! - Inclusive hit-testing and tooltip formatting
//! - Page data flowing into the consumption heatmap
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

mod common;
mod fixtures;

use common::matrix;
use fixtures::consumption;
use messboard::charts::{bar_chart, heatmap, Chart};
use messboard::config::DashboardConfig;
use messboard::error::DashboardError;
use messboard::host::{layout_matrix, MemoryHost};
use messboard::matrix::{
    value_label, Cell, ChartArea, HitMode, MatrixController, MatrixSpec, TooltipFormat,
};
use messboard::pages::overview;
use messboard::registry::{create_controller, is_registered};
use messboard::render::{render_matrix, RecordingSurface};
use test_case::test_case;

fn labels(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

fn grid(rows: usize, cols: usize) -> MatrixSpec {
    let data: Vec<Vec<f64>> = (0..rows)
        .map(|r| (0..cols).map(|c| (r * 10 + c) as f64).collect())
        .collect();
    heatmap("Grid", &labels("C", cols), &labels("R", rows), &data, 2.0)
}

fn laid_out(spec: &MatrixSpec) -> MatrixController {
    let mut controller = MatrixController::new(spec);
    controller
        .layout(ChartArea::new(50.0, 40.0, 600.0, 350.0))
        .unwrap();
    controller
}

// =============================================================================
// Layout
// =============================================================================

#[test_case(1, 1 ; "single cell")]
#[test_case(2, 3 ; "two days three meals")]
#[test_case(7, 3 ; "full week")]
#[test_case(31, 4 ; "month of four meals")]
fn test_one_element_per_cell(rows: usize, cols: usize) {
    let controller = laid_out(&grid(rows, cols));
    assert_eq!(controller.cells().len(), rows * cols);
    assert_eq!(controller.elements().len(), rows * cols);
}

#[test]
fn test_centres_follow_scales() {
    let controller = laid_out(&grid(4, 3));
    let x_scale = controller.x_scale();
    let y_scale = controller.y_scale();

    for element in controller.elements() {
        let cell = controller.cell(element.data_index).unwrap();
        let x = x_scale.pixel_for_label(&cell.column).unwrap();
        let y = y_scale.pixel_for_label(&cell.row).unwrap();
        assert_eq!(element.geometry.x, x, "{cell:?}");
        assert_eq!(element.geometry.y, y, "{cell:?}");
    }
}

#[test]
fn test_tiles_fill_bands_minus_padding() {
    let controller = laid_out(&grid(7, 3));
    let element = &controller.elements()[0];
    assert_eq!(element.geometry.width, 600.0 / 3.0 - 2.0);
    assert_eq!(element.geometry.height, 350.0 / 7.0 - 2.0);
}

#[test]
fn test_undeclared_label_fails_layout() {
    let mut spec = grid(2, 2);
    spec.cells.push(Cell::new("Sun", "C0", 5.0));
    let mut controller = MatrixController::new(&spec);
    let err = controller
        .layout(ChartArea::new(0.0, 0.0, 100.0, 100.0))
        .unwrap_err();
    assert!(matches!(
        err,
        DashboardError::UnknownCategory { axis: "y", .. }
    ));
    assert!(controller.elements().is_empty());
}

#[test]
fn test_relayout_replaces_geometry() {
    let spec = grid(2, 2);
    let mut controller = MatrixController::new(&spec);
    controller
        .layout(ChartArea::new(0.0, 0.0, 100.0, 100.0))
        .unwrap();
    let before = controller.elements()[3].geometry;
    controller
        .layout(ChartArea::new(0.0, 0.0, 200.0, 100.0))
        .unwrap();
    let after = controller.elements()[3].geometry;
    assert_eq!(controller.elements().len(), 4);
    assert_eq!(after.x, before.x * 2.0);
    assert_eq!(after.y, before.y);
}

// =============================================================================
// Hit-testing and tooltips
// =============================================================================

#[test]
fn test_centre_inside_edges_outside() {
    let controller = laid_out(&grid(3, 3));
    let eps = 1e-6;
    for element in controller.elements() {
        let g = element.geometry;
        assert!(g.in_range(g.x, g.y));
        assert!(!g.in_range(g.x + g.width / 2.0 + eps, g.y));
        assert!(!g.in_range(g.x - (g.width / 2.0 + eps), g.y));
        assert!(!g.in_range(g.x, g.y + g.height / 2.0 + eps));
        assert!(g.in_range(g.x + g.width / 2.0, g.y));
    }
}

#[test]
fn test_hits_by_mode() {
    let controller = laid_out(&grid(3, 3));
    let target = controller.elements()[4].geometry;

    assert_eq!(controller.hits(target.x, target.y, HitMode::Point), vec![4]);
    assert_eq!(
        controller.hits(target.x, -1000.0, HitMode::XAxis),
        vec![1, 4, 7]
    );
    assert_eq!(
        controller.hits(-1000.0, target.y, HitMode::YAxis),
        vec![3, 4, 5]
    );
    assert!(controller.hits(0.0, 0.0, HitMode::Point).is_empty());
}

#[test_case(72.456, "72.5" ; "rounds up")]
#[test_case(72.44, "72.4" ; "rounds down")]
#[test_case(100.0, "100.0" ; "keeps one decimal")]
#[test_case(0.0, "0.0" ; "zero")]
fn test_value_label(value: f64, expected: &str) {
    assert_eq!(value_label(value).as_deref(), Some(expected));
}

#[test]
fn test_tooltip_text() {
    let cell = Cell::new("Mon", "Lunch", 72.456);
    assert_eq!(TooltipFormat::percent().format(&cell), "Mon - Lunch: 72.5%");
    assert_eq!(TooltipFormat::efficiency().format(&cell), "Efficiency: 72.5%");

    let spec = heatmap(
        "T",
        &["Lunch".to_string()],
        &["Mon".to_string()],
        &[vec![72.456]],
        0.0,
    );
    let controller = laid_out(&spec);
    let g = controller.elements()[0].geometry;
    assert_eq!(
        controller.tooltip(g.x, g.y).as_deref(),
        Some("Mon - Lunch: 72.5%")
    );
    assert_eq!(controller.tooltip(0.0, 0.0), None);
}

// =============================================================================
// Registry and rendering
// =============================================================================

#[test]
fn test_registry_builds_matrix_controller() {
    assert!(is_registered("matrix"));
    let chart = Chart::from(grid(2, 2));
    let mut controller = create_controller(&chart).unwrap();
    assert_eq!(controller.kind(), "matrix");
    controller
        .update(ChartArea::new(0.0, 0.0, 100.0, 100.0))
        .unwrap();
    assert_eq!(controller.elements_at(25.0, 25.0, HitMode::Point), vec![0]);
}

#[test]
fn test_native_kinds_have_no_controller() {
    let chart = Chart::from(bar_chart("T", &["a".to_string()], &[1.0], "y"));
    assert!(matches!(
        create_controller(&chart),
        Err(DashboardError::UnknownChartKind(kind)) if kind == "bar"
    ));
}

#[test]
fn test_render_draws_title_cells_and_ticks() {
    let spec = grid(2, 3);
    let mut controller = create_controller(&Chart::from(spec.clone())).unwrap();
    let mut surface = RecordingSurface::new();
    render_matrix(&mut surface, controller.as_mut(), &spec, 600.0, 400.0).unwrap();

    assert_eq!(surface.fills().count(), 6);
    let texts: Vec<&str> = surface.texts().collect();
    assert_eq!(texts.first(), Some(&"Grid"));
    for label in ["C0", "C1", "C2", "R0", "R1", "12.0"] {
        assert!(texts.contains(&label), "missing {label} in {texts:?}");
    }
    assert_eq!(surface.save_depth(), 0);
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn test_consumption_heatmap_end_to_end() {
    let mut host = MemoryHost::with_targets([overview::HEATMAP_CHART]);
    let outcome =
        overview::init_consumption_heatmap(&mut host, &consumption(), &DashboardConfig::default());
    common::assert_mounted(&outcome, 1);

    let spec = matrix(&host, overview::HEATMAP_CHART);
    assert_eq!(spec.cells.len(), 6);
    let tue_dinner = spec
        .cells
        .iter()
        .find(|c| c.row == "Tue" && c.column == "Dinner")
        .unwrap();
    assert_eq!(tue_dinner.value, 60.0);

    let layout = layout_matrix(host.chart(overview::HEATMAP_CHART).unwrap(), 600.0, 400.0)
        .unwrap()
        .unwrap();
    assert_eq!(layout.elements.len(), 6);
    let tue_dinner = layout
        .elements
        .iter()
        .find(|e| spec.cells[e.data_index].row == "Tue" && spec.cells[e.data_index].column == "Dinner")
        .unwrap();
    let mon_breakfast = &layout.elements[0];
    assert!(tue_dinner.geometry.x > mon_breakfast.geometry.x);
    assert!(tue_dinner.geometry.y > mon_breakfast.geometry.y);
    assert_eq!(tue_dinner.style.background_color, "rgba(7, 122, 125, 0.6)");
}

#[test]
fn test_extra_table_values_are_dropped() {
    let spec = heatmap(
        "T",
        &["Breakfast".to_string(), "Lunch".to_string()],
        &["Mon".to_string()],
        &[vec![1.0, 2.0, 3.0], vec![4.0]],
        1.0,
    );
    assert_eq!(spec.cells.len(), 2);
    assert_eq!(laid_out(&spec).elements().len(), 2);
}
