//! Where charts end up.
//!
//! Page controllers talk to a [`ChartHost`] and never to the DOM directly.
//! [`MemoryHost`] keeps everything in memory (tests, CLI); on wasm32,
//! [`BrowserHost`] hands native kinds to the page's charting library and
//! draws matrix charts itself onto the target canvas.

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHost;

use std::collections::{BTreeMap, BTreeSet};

use crate::charts::Chart;
use crate::error::{DashboardError, Result};
use crate::matrix::{ChartArea, MatrixController, MatrixElement};
use crate::render::plot_area;

/// What a successful mount did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// First chart on the target.
    Created,
    /// A previous chart on the target was destroyed first.
    Replaced,
}

/// Chart targets addressed by element id.
pub trait ChartHost {
    /// True if an element with this id exists.
    fn has_target(&self, id: &str) -> bool;

    /// Bind `chart` to the canvas `id`.
    fn mount(&mut self, id: &str, chart: Chart) -> Result<MountOutcome>;

    /// Replace the content of container `id` with `html`.
    fn show_message(&mut self, id: &str, html: &str) -> Result<()>;

    /// Append a new canvas `canvas_id` inside container `container_id`.
    fn append_canvas(&mut self, container_id: &str, canvas_id: &str) -> Result<()>;
}

/// Logical size matrix charts are laid out at when no canvas is involved.
pub const DEFAULT_MATRIX_SIZE: (f64, f64) = (600.0, 400.0);

/// A matrix chart laid out without a canvas, for inspection.
#[derive(Debug, Clone)]
pub struct MatrixLayout {
    pub area: ChartArea,
    pub elements: Vec<MatrixElement>,
}

/// Lay `chart` out at `width` x `height` without drawing it.
///
/// Returns `None` for native kinds, which the charting library lays out.
pub fn layout_matrix(chart: &Chart, width: f64, height: f64) -> Result<Option<MatrixLayout>> {
    let Some(spec) = chart.as_matrix() else {
        return Ok(None);
    };
    let mut controller = MatrixController::new(spec);
    let area = plot_area(spec, width, height);
    controller.layout(area)?;
    Ok(Some(MatrixLayout {
        area,
        elements: controller.elements().to_vec(),
    }))
}

/// In-memory host: records mounted charts and container messages.
#[derive(Debug, Default)]
pub struct MemoryHost {
    targets: BTreeSet<String>,
    accept_all: bool,
    charts: BTreeMap<String, Chart>,
    messages: BTreeMap<String, String>,
}

impl MemoryHost {
    /// Host where only the given ids exist.
    pub fn with_targets<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Host where every id resolves.
    pub fn accepting_all() -> Self {
        Self {
            accept_all: true,
            ..Self::default()
        }
    }

    pub fn add_target(&mut self, id: &str) {
        self.targets.insert(id.to_string());
    }

    /// Mounted charts by target id.
    pub fn charts(&self) -> &BTreeMap<String, Chart> {
        &self.charts
    }

    pub fn chart(&self, id: &str) -> Option<&Chart> {
        self.charts.get(id)
    }

    /// Container messages by container id.
    pub fn messages(&self) -> &BTreeMap<String, String> {
        &self.messages
    }

    pub fn message(&self, id: &str) -> Option<&str> {
        self.messages.get(id).map(String::as_str)
    }

    pub fn mounted_count(&self) -> usize {
        self.charts.len()
    }
}

impl ChartHost for MemoryHost {
    fn has_target(&self, id: &str) -> bool {
        self.accept_all || self.targets.contains(id)
    }

    fn mount(&mut self, id: &str, chart: Chart) -> Result<MountOutcome> {
        if !self.has_target(id) {
            return Err(DashboardError::MissingTarget(id.to_string()));
        }
        let (width, height) = DEFAULT_MATRIX_SIZE;
        layout_matrix(&chart, width, height)?;

        let outcome = match self.charts.insert(id.to_string(), chart) {
            Some(_) => MountOutcome::Replaced,
            None => MountOutcome::Created,
        };
        log::debug!("host: mounted '{id}' ({outcome:?})");
        Ok(outcome)
    }

    fn show_message(&mut self, id: &str, html: &str) -> Result<()> {
        if !self.has_target(id) {
            return Err(DashboardError::MissingTarget(id.to_string()));
        }
        self.messages.insert(id.to_string(), html.to_string());
        Ok(())
    }

    fn append_canvas(&mut self, container_id: &str, canvas_id: &str) -> Result<()> {
        if !self.has_target(container_id) {
            return Err(DashboardError::MissingTarget(container_id.to_string()));
        }
        self.targets.insert(canvas_id.to_string());
        Ok(())
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
    use crate::charts::{bar_chart, heatmap};
    use crate::matrix::Cell;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_missing_target_rejected() {
        let mut host = MemoryHost::with_targets(["a"]);
        let chart: Chart = bar_chart("t", &labels(&["x"]), &[1.0], "n").into();
        let err = host.mount("b", chart.clone()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingTarget(id) if id == "b"));
        assert_eq!(host.mount("a", chart.clone()).unwrap(), MountOutcome::Created);
        assert_eq!(host.mount("a", chart).unwrap(), MountOutcome::Replaced);
        assert_eq!(host.mounted_count(), 1);
    }

    #[test]
    fn test_appended_canvas_becomes_target() {
        let mut host = MemoryHost::with_targets(["box"]);
        assert!(!host.has_target("inner"));
        host.show_message("box", "<p>hi</p>").unwrap();
        host.append_canvas("box", "inner").unwrap();
        assert!(host.has_target("inner"));
        assert_eq!(host.message("box"), Some("<p>hi</p>"));
    }

    #[test]
    fn test_matrix_layout_at_default_size() {
        let chart: Chart = heatmap(
            "h",
            &labels(&["Breakfast", "Lunch", "Dinner"]),
            &labels(&["Mon", "Tue"]),
            &[vec![10.0, 90.0, 50.0], vec![20.0, 80.0, 60.0]],
            2.0,
        )
        .into();
        let layout = layout_matrix(&chart, 600.0, 400.0).unwrap().unwrap();
        assert_eq!(layout.elements.len(), 6);
        let cell_width = layout.area.width / 3.0 - 2.0;
        assert!(layout
            .elements
            .iter()
            .all(|e| (e.geometry.width - cell_width).abs() < 1e-9));
    }

    #[test]
    fn test_matrix_with_unknown_label_not_mounted() {
        let mut spec = heatmap("h", &labels(&["Lunch"]), &labels(&["Mon"]), &[vec![1.0]], 1.0);
        spec.cells.push(Cell::new("Mon", "Supper", 3.0));
        let mut host = MemoryHost::accepting_all();
        assert!(matches!(
            host.mount("heat", spec.into()),
            Err(DashboardError::UnknownCategory { axis: "x", .. })
        ));
        assert!(host.chart("heat").is_none());
    }
}
