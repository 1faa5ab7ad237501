//! Chart factory tests
//!
//! Checks the configurations handed to the charting library for the chart
//! kinds the pages use, and the `Chart` wrapper around them.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use messboard::charts::{
    bar_chart, heatmap, histogram, line_chart, multi_line_chart, pie_chart, title, Chart,
    SeriesInput, TITLE_FONT_SIZE,
};
use messboard::color::{palette, red_yellow_green};
use messboard::matrix::{ChartArea, MatrixController, ScriptContext};
use serde_json::{json, Value};
use test_case::test_case;

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn to_json(chart: &Chart) -> Value {
    serde_json::to_value(chart.as_native().unwrap()).unwrap()
}

#[test]
fn test_every_native_kind_is_responsive_and_titled() {
    let l = labels(&["a", "b"]);
    let charts: Vec<Chart> = vec![
        bar_chart("Bar", &l, &[1.0, 2.0], "y").into(),
        pie_chart("Pie", &l, &[1.0, 2.0]).into(),
        line_chart("Line", &l, &[1.0, 2.0], "y").into(),
        histogram("Hist", &l, &[3.0, 4.0], "bins", "count").into(),
    ];
    for chart in &charts {
        let value = to_json(chart);
        assert_eq!(value["options"]["responsive"], true, "{}", chart.kind());
        assert_eq!(value["options"]["maintainAspectRatio"], false);
        assert_eq!(
            value["options"]["plugins"]["title"]["font"]["size"],
            TITLE_FONT_SIZE
        );
        assert_eq!(value["type"], chart.kind());
    }
    assert_eq!(charts[2].title(), Some("Line"));
}

#[test]
fn test_title_options() {
    let t = title("Weekly");
    assert!(t.display);
    assert_eq!(t.text, "Weekly");
    assert_eq!(t.font.unwrap().size, 16.0);
}

#[test]
fn test_line_chart_single_teal_series() {
    let value = to_json(&line_chart("Trend", &labels(&["d1"]), &[5.0], "kg").into());
    let dataset = &value["data"]["datasets"][0];
    assert_eq!(dataset["label"], "Trend");
    assert_eq!(dataset["borderColor"], "rgba(7, 122, 125, 1)");
    assert_eq!(dataset["backgroundColor"], "rgba(7, 122, 125, 0.7)");
    assert_eq!(dataset["fill"], false);
    assert_eq!(dataset["tension"], 0.1);
}

#[test]
fn test_series_colors_cycle_past_palette() {
    let series: Vec<SeriesInput> = (0..7)
        .map(|i| SeriesInput::new(&format!("s{i}"), vec![f64::from(i)]))
        .collect();
    let config = multi_line_chart("t", &labels(&["x"]), &series, "y");
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(
        value["data"]["datasets"][5]["borderColor"],
        palette::TEAL.opaque().to_css()
    );
    assert_eq!(
        value["data"]["datasets"][6]["borderColor"],
        palette::PINK.opaque().to_css()
    );
    assert_eq!(value["options"]["plugins"]["legend"]["position"], "top");
}

#[test]
fn test_histogram_axes() {
    let value = to_json(&histogram("Rates", &labels(&["0-1"]), &[2.0], "Rate", "Frequency").into());
    assert_eq!(value["options"]["scales"]["x"]["title"]["text"], "Rate");
    assert_eq!(value["options"]["scales"]["y"]["title"]["text"], "Frequency");
    assert_eq!(value["options"]["scales"]["y"]["beginAtZero"], true);
    assert_eq!(value["options"]["plugins"]["legend"], json!({"display": false}));
}

#[test_case(10.0 ; "low")]
#[test_case(50.0 ; "middle")]
#[test_case(95.0 ; "high")]
fn test_heatmap_colors_follow_values(value: f64) {
    let spec = heatmap("H", &labels(&["Lunch"]), &labels(&["Mon"]), &[vec![value]], 2.0);
    let mut controller = MatrixController::new(&spec);
    controller
        .layout(ChartArea::new(0.0, 0.0, 300.0, 100.0))
        .unwrap();
    assert_eq!(
        controller.elements()[0].style.background_color,
        red_yellow_green(value).to_css()
    );
}

#[test]
fn test_heatmap_style_resolves_per_cell() {
    let spec = heatmap(
        "H",
        &labels(&["Breakfast", "Lunch"]),
        &labels(&["Mon"]),
        &[vec![0.0, 100.0]],
        4.0,
    );
    let area = ChartArea::new(0.0, 0.0, 200.0, 100.0);
    let ctx = |i: usize| ScriptContext {
        chart_area: area,
        data_index: i,
        cell: &spec.cells[i],
    };
    assert_eq!(spec.style.background_color.resolve(&ctx(0)), "rgba(255, 0, 0, 0.8)");
    assert_eq!(spec.style.background_color.resolve(&ctx(1)), "rgba(0, 255, 0, 0.8)");
    assert_eq!(spec.style.width.resolve(&ctx(0)), 96.0);
    assert_eq!(spec.style.height.resolve(&ctx(0)), 96.0);
    assert!(!spec.show_legend);
    assert_eq!(Chart::from(spec).kind(), "matrix");
}
