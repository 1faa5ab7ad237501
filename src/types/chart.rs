use serde::{Deserialize, Serialize};

use crate::color::CssColor;

/// Chart type understood by the charting library (or by a registered controller).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Bar chart (vertical unless `indexAxis` is `y`)
    #[default]
    Bar,
    /// Line chart
    Line,
    /// Pie chart
    Pie,
    /// Scatter chart (XY plot)
    Scatter,
}

impl ChartKind {
    /// Type id as the charting library spells it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
        }
    }
}

/// Which axis carries the categories (`y` gives horizontal bars).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum IndexAxis {
    #[default]
    X,
    Y,
}

/// Full configuration handed to the charting library.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// An XY point for scatter charts.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Dataset values: a series aligned with the labels, or free XY points.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum DataValues {
    Series(Vec<f64>),
    Points(Vec<Point>),
}

impl DataValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Series(v) => v.len(),
            Self::Points(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DataValues {
    fn default() -> Self {
        Self::Series(Vec::new())
    }
}

/// One color for the whole dataset, or one per data point.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Paint {
    Single(CssColor),
    PerPoint(Vec<CssColor>),
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: DataValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintain_aspect_ratio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<IndexAxis>,
    #[serde(skip_serializing_if = "Scales::is_empty")]
    pub scales: Scales,
    pub plugins: Plugins,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: Some(false),
            index_axis: None,
            scales: Scales::default(),
            plugins: Plugins::default(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisOptions>,
}

impl Scales {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
}

impl AxisOptions {
    /// Value axis starting at zero with a visible title.
    pub fn values(title: &str) -> Self {
        Self {
            begin_at_zero: Some(true),
            title: Some(AxisTitle::shown(title)),
            ..Self::default()
        }
    }

    /// Axis with a visible title and automatic range.
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(AxisTitle::shown(title)),
            ..Self::default()
        }
    }

    /// Axis with its title explicitly hidden.
    pub fn untitled() -> Self {
        Self {
            title: Some(AxisTitle::hidden()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AxisTitle {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl AxisTitle {
    pub fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: Some(text.to_string()),
        }
    }

    pub fn hidden() -> Self {
        Self {
            display: false,
            text: None,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Plugins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipOptions>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontOptions>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontOptions {
    pub size: f64,
}

/// Where the legend sits relative to the plot.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LegendPosition {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
}

impl LegendOptions {
    pub fn hidden() -> Self {
        Self {
            display: Some(false),
            position: None,
        }
    }

    pub fn at(position: LegendPosition) -> Self {
        Self {
            display: None,
            position: Some(position),
        }
    }
}

/// Tooltip interaction settings (`mode: "index"` shows every series at the hovered label).
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersect: Option<bool>,
}

impl TooltipOptions {
    pub fn index() -> Self {
        Self {
            mode: Some("index".to_string()),
            intersect: Some(false),
        }
    }
}
