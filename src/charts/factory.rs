use crate::color::{palette, red_yellow_green, Rgba};
use crate::matrix::{Axis, CellTable, MatrixSpec, Scriptable, TooltipFormat};
use crate::types::{
    AxisOptions, ChartConfig, ChartData, ChartKind, ChartOptions, DataValues, Dataset,
    FontOptions, IndexAxis, LegendOptions, LegendPosition, Paint, Plugins, Point, Scales,
    TitleOptions,
};

/// Chart titles are drawn at this size.
pub const TITLE_FONT_SIZE: f64 = 16.0;

/// Line smoothing used by every line chart.
const LINE_TENSION: f64 = 0.1;

/// One labelled series for multi-dataset charts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesInput {
    pub label: String,
    pub data: Vec<f64>,
    /// Base color; the palette entry for the series index is used when absent.
    pub color: Option<Rgba>,
    pub fill: Option<bool>,
}

impl SeriesInput {
    pub fn new(label: &str, data: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            data,
            ..Self::default()
        }
    }

    pub fn colored(label: &str, data: Vec<f64>, color: Rgba) -> Self {
        Self {
            color: Some(color),
            ..Self::new(label, data)
        }
    }

    fn color_or(&self, index: usize) -> Rgba {
        self.color.unwrap_or_else(|| palette::series(index))
    }
}

/// Title plugin options at the dashboard's title size.
pub fn title(text: &str) -> TitleOptions {
    TitleOptions {
        display: true,
        text: text.to_string(),
        font: Some(FontOptions {
            size: TITLE_FONT_SIZE,
        }),
    }
}

fn options(scales: Scales, plugins: Plugins) -> ChartOptions {
    ChartOptions {
        scales,
        plugins,
        ..ChartOptions::default()
    }
}

fn single_color(color: Rgba, alpha: f64) -> Option<Paint> {
    Some(Paint::Single(color.with_alpha(alpha).to_css()))
}

/// A single teal dataset, used by bar-like charts.
fn teal_bars(label: &str, data: Vec<f64>) -> Dataset {
    Dataset {
        label: Some(label.to_string()),
        data: DataValues::Series(data),
        background_color: single_color(palette::TEAL, 0.7),
        border_color: single_color(palette::TEAL, 1.0),
        border_width: Some(1.0),
        ..Dataset::default()
    }
}

/// Line dataset with the given fill alpha.
pub fn line_dataset(series: &SeriesInput, index: usize, background_alpha: f64) -> Dataset {
    let color = series.color_or(index);
    Dataset {
        label: Some(series.label.clone()),
        data: DataValues::Series(series.data.clone()),
        background_color: single_color(color, background_alpha),
        border_color: single_color(color, 1.0),
        fill: Some(series.fill.unwrap_or(false)),
        tension: Some(LINE_TENSION),
        ..Dataset::default()
    }
}

/// Bar dataset with the given fill alpha and a 1px border.
pub fn bar_dataset(series: &SeriesInput, index: usize, background_alpha: f64) -> Dataset {
    let color = series.color_or(index);
    Dataset {
        label: Some(series.label.clone()),
        data: DataValues::Series(series.data.clone()),
        background_color: single_color(color, background_alpha),
        border_color: single_color(color, 1.0),
        border_width: Some(1.0),
        ..Dataset::default()
    }
}

/// Single-series bar chart without legend.
pub fn bar_chart(title_text: &str, labels: &[String], data: &[f64], y_axis_label: &str) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: vec![teal_bars(title_text, data.to_vec())],
        },
        options: options(
            Scales {
                x: Some(AxisOptions::untitled()),
                y: Some(AxisOptions::values(y_axis_label)),
            },
            Plugins {
                title: Some(title(title_text)),
                legend: Some(LegendOptions::hidden()),
                tooltip: None,
            },
        ),
    }
}

/// Pie chart with the slice palette and the legend on the right.
pub fn pie_chart(title_text: &str, labels: &[String], data: &[f64]) -> ChartConfig {
    let slices = |alpha: f64| {
        Paint::PerPoint(
            palette::SLICES
                .iter()
                .map(|c| c.with_alpha(alpha).to_css())
                .collect(),
        )
    };
    ChartConfig {
        kind: ChartKind::Pie,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: vec![Dataset {
                data: DataValues::Series(data.to_vec()),
                background_color: Some(slices(0.7)),
                border_color: Some(slices(1.0)),
                border_width: Some(1.0),
                ..Dataset::default()
            }],
        },
        options: options(
            Scales::default(),
            Plugins {
                title: Some(title(title_text)),
                legend: Some(LegendOptions::at(LegendPosition::Right)),
                tooltip: None,
            },
        ),
    }
}

/// Single-series line chart.
pub fn line_chart(title_text: &str, labels: &[String], data: &[f64], y_axis_label: &str) -> ChartConfig {
    let series = SeriesInput::colored(title_text, data.to_vec(), palette::TEAL);
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: vec![line_dataset(&series, 0, 0.7)],
        },
        options: options(
            Scales {
                x: Some(AxisOptions::untitled()),
                y: Some(AxisOptions::values(y_axis_label)),
            },
            Plugins {
                title: Some(title(title_text)),
                legend: None,
                tooltip: None,
            },
        ),
    }
}

/// Several line series sharing the label axis, legend on top.
pub fn multi_line_chart(
    title_text: &str,
    labels: &[String],
    series: &[SeriesInput],
    y_axis_label: &str,
) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: series
                .iter()
                .enumerate()
                .map(|(i, s)| line_dataset(s, i, 0.2))
                .collect(),
        },
        options: options(
            Scales {
                x: Some(AxisOptions::untitled()),
                y: Some(AxisOptions::values(y_axis_label)),
            },
            Plugins {
                title: Some(title(title_text)),
                legend: Some(LegendOptions::at(LegendPosition::Top)),
                tooltip: None,
            },
        ),
    }
}

/// Side-by-side bars per label, legend on top.
pub fn grouped_bar_chart(
    title_text: &str,
    labels: &[String],
    series: &[SeriesInput],
    y_axis_label: &str,
) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: series
                .iter()
                .enumerate()
                .map(|(i, s)| bar_dataset(s, i, 0.7))
                .collect(),
        },
        options: options(
            Scales {
                x: Some(AxisOptions::untitled()),
                y: Some(AxisOptions::values(y_axis_label)),
            },
            Plugins {
                title: Some(title(title_text)),
                legend: Some(LegendOptions::at(LegendPosition::Top)),
                tooltip: None,
            },
        ),
    }
}

/// Bars stacked per label, legend on top.
pub fn stacked_bar_chart(
    title_text: &str,
    labels: &[String],
    series: &[SeriesInput],
    y_axis_label: &str,
) -> ChartConfig {
    let mut config = grouped_bar_chart(title_text, labels, series, y_axis_label);
    for axis in [&mut config.options.scales.x, &mut config.options.scales.y]
        .into_iter()
        .flatten()
    {
        axis.stacked = Some(true);
    }
    config
}

/// XY scatter of paired values; unpaired trailing values are ignored.
pub fn scatter_plot(
    title_text: &str,
    x_data: &[f64],
    y_data: &[f64],
    x_axis_label: &str,
    y_axis_label: &str,
) -> ChartConfig {
    let points = x_data
        .iter()
        .zip(y_data)
        .map(|(&x, &y)| Point { x, y })
        .collect();
    ChartConfig {
        kind: ChartKind::Scatter,
        data: ChartData {
            labels: Vec::new(),
            datasets: vec![Dataset {
                label: Some(title_text.to_string()),
                data: DataValues::Points(points),
                background_color: single_color(palette::TEAL, 0.7),
                border_color: single_color(palette::TEAL, 1.0),
                point_radius: Some(6.0),
                point_hover_radius: Some(8.0),
                ..Dataset::default()
            }],
        },
        options: options(
            Scales {
                x: Some(AxisOptions::titled(x_axis_label)),
                y: Some(AxisOptions::values(y_axis_label)),
            },
            Plugins {
                title: Some(title(title_text)),
                legend: Some(LegendOptions::hidden()),
                tooltip: None,
            },
        ),
    }
}

/// Day x meal style heatmap shaded red to green.
///
/// `x_labels` are the columns, `y_labels` the rows and `data[row][column]`
/// the values. Cells tile the chart area with `padding` pixels between them.
pub fn heatmap(
    title_text: &str,
    x_labels: &[String],
    y_labels: &[String],
    data: &[Vec<f64>],
    padding: f64,
) -> MatrixSpec {
    let table = CellTable::flatten(y_labels, x_labels, data);
    let mut spec = MatrixSpec::new(table);
    spec.title = Some(title_text.to_string());
    spec.label = Some(title_text.to_string());
    spec.style.background_color = Scriptable::resolver(|ctx| red_yellow_green(ctx.cell.value).to_css());
    spec.style.border_color = palette::HAIRLINE.to_css().into();
    spec.style.border_width = 1.0.into();
    spec.style.width = Scriptable::tiled(Axis::X, x_labels.len(), padding);
    spec.style.height = Scriptable::tiled(Axis::Y, y_labels.len(), padding);
    spec.tooltip = TooltipFormat::percent();
    spec
}

/// Bars along the y axis.
pub fn horizontal_bar_chart(
    title_text: &str,
    labels: &[String],
    data: &[f64],
    x_axis_label: &str,
) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: vec![teal_bars(title_text, data.to_vec())],
        },
        options: ChartOptions {
            index_axis: Some(IndexAxis::Y),
            ..options(
                Scales {
                    x: Some(AxisOptions::values(x_axis_label)),
                    y: Some(AxisOptions::untitled()),
                },
                Plugins {
                    title: Some(title(title_text)),
                    legend: Some(LegendOptions::hidden()),
                    tooltip: None,
                },
            )
        },
    }
}

/// Frequency counts per bin.
pub fn histogram(
    title_text: &str,
    labels: &[String],
    counts: &[f64],
    x_axis_label: &str,
    y_axis_label: &str,
) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: vec![teal_bars(title_text, counts.to_vec())],
        },
        options: options(
            Scales {
                x: Some(AxisOptions::titled(x_axis_label)),
                y: Some(AxisOptions::values(y_axis_label)),
            },
            Plugins {
                title: Some(title(title_text)),
                legend: Some(LegendOptions::hidden()),
                tooltip: None,
            },
        ),
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
    use serde_json::json;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_bar_chart_json_shape() {
        let config = bar_chart("Waste", &labels(&["a", "b"]), &[1.0, 2.5], "kg");
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "bar");
        assert_eq!(value["data"]["labels"], json!(["a", "b"]));
        assert_eq!(value["data"]["datasets"][0]["data"], json!([1.0, 2.5]));
        assert_eq!(
            value["data"]["datasets"][0]["backgroundColor"],
            "rgba(7, 122, 125, 0.7)"
        );
        assert_eq!(value["options"]["maintainAspectRatio"], false);
        assert_eq!(value["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(value["options"]["scales"]["y"]["title"]["text"], "kg");
        assert_eq!(value["options"]["scales"]["x"]["title"]["display"], false);
        assert_eq!(value["options"]["plugins"]["title"]["font"]["size"], 16.0);
        assert_eq!(value["options"]["plugins"]["legend"]["display"], false);
    }

    #[test]
    fn test_pie_has_per_slice_colors_and_no_scales() {
        let config = pie_chart("Split", &labels(&["x", "y"]), &[3.0, 4.0]);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["data"]["datasets"][0]["backgroundColor"][1], "rgba(122, 226, 207, 0.7)");
        assert!(value["options"].get("scales").is_none());
        assert_eq!(value["options"]["plugins"]["legend"]["position"], "right");
    }

    #[test]
    fn test_multi_line_palette_defaults() {
        let series = vec![
            SeriesInput::new("one", vec![1.0]),
            SeriesInput::new("two", vec![2.0]),
            SeriesInput::colored("three", vec![3.0], palette::GREEN),
        ];
        let config = multi_line_chart("t", &labels(&["d"]), &series, "n");
        let ds = &config.data.datasets;
        assert_eq!(
            ds[0].background_color,
            Some(Paint::Single("rgba(7, 122, 125, 0.2)".to_string()))
        );
        assert_eq!(
            ds[1].border_color,
            Some(Paint::Single("rgba(255, 99, 132, 1)".to_string()))
        );
        assert_eq!(
            ds[2].border_color,
            Some(Paint::Single("rgba(75, 192, 192, 1)".to_string()))
        );
        assert_eq!(ds[0].fill, Some(false));
        assert_eq!(ds[0].tension, Some(0.1));
    }

    #[test]
    fn test_stacked_axes() {
        let config = stacked_bar_chart("t", &labels(&["Mon"]), &[SeriesInput::new("a", vec![1.0])], "n");
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["options"]["scales"]["x"]["stacked"], true);
        assert_eq!(value["options"]["scales"]["y"]["stacked"], true);
    }

    #[test]
    fn test_grouped_bars_not_stacked() {
        let config = grouped_bar_chart(
            "t",
            &labels(&["Mon"]),
            &[SeriesInput::new("a", vec![1.0]), SeriesInput::new("b", vec![2.0])],
            "n",
        );
        let value = serde_json::to_value(&config).unwrap();
        assert!(value["options"]["scales"]["y"].get("stacked").is_none());
        assert_eq!(value["data"]["datasets"][1]["borderWidth"], 1.0);
    }

    #[test]
    fn test_scatter_pairs_points() {
        let config = scatter_plot("t", &[1.0, 2.0, 3.0], &[4.0, 5.0], "x", "y");
        assert_eq!(config.data.datasets[0].data.len(), 2);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["data"]["datasets"][0]["data"][1], json!({"x": 2.0, "y": 5.0}));
        assert!(value["data"].get("labels").is_none());
    }

    #[test]
    fn test_horizontal_bar_index_axis() {
        let config = horizontal_bar_chart("t", &labels(&["Lunch"]), &[9.0], "kg");
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["options"]["indexAxis"], "y");
        assert_eq!(value["options"]["scales"]["x"]["beginAtZero"], true);
    }

    #[test]
    fn test_heatmap_cells_and_colors() {
        let spec = heatmap(
            "Efficiency",
            &labels(&["Breakfast", "Lunch", "Dinner"]),
            &labels(&["Mon", "Tue"]),
            &[vec![10.0, 90.0, 50.0], vec![20.0, 80.0, 60.0]],
            2.0,
        );
        assert_eq!(spec.cells.len(), 6);
        assert_eq!(spec.x_labels.len(), 3);
        assert_eq!(spec.y_labels, labels(&["Mon", "Tue"]));
        let cell = spec.cells.iter().find(|c| c.row == "Tue" && c.column == "Dinner").unwrap();
        assert_eq!(cell.value, 60.0);
    }
}
