//! Chart-type registry.
//!
//! Maps a chart type id to the factory of the controller that lays out and
//! draws datasets of that type. The registry lives on the UI thread; the
//! built-in matrix type is registered once when it is first touched.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::charts::Chart;
use crate::error::{DashboardError, Result};
use crate::matrix::{CategoryScale, ChartArea, HitMode, MatrixController, MATRIX_TYPE};
use crate::render::Surface;

/// Per-type behaviour of a dataset drawn by this crate.
pub trait DatasetController: fmt::Debug {
    /// Registry id of the chart type.
    fn kind(&self) -> &'static str;

    /// Rebuild element geometry for the given plot area.
    fn update(&mut self, area: ChartArea) -> Result<()>;

    /// Draw the elements laid out by the last [`update`](Self::update).
    fn draw(&self, surface: &mut dyn Surface) -> Result<()>;

    /// Data indices of elements matched by a pointer at `(x, y)`.
    fn elements_at(&self, x: f64, y: f64, mode: HitMode) -> Vec<usize>;

    /// Tooltip text for the element under the pointer.
    fn tooltip_at(&self, x: f64, y: f64) -> Option<String>;

    fn x_scale(&self) -> Option<&CategoryScale> {
        None
    }

    fn y_scale(&self) -> Option<&CategoryScale> {
        None
    }
}

/// Builds a controller for a chart of the registered type.
pub type ControllerFactory = fn(&Chart) -> Result<Box<dyn DatasetController>>;

/// Type id to controller factory.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.factories.keys().collect();
        kinds.sort();
        f.debug_struct("ControllerRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Fresh registry, the id cannot be taken yet.
        if let Err(e) = registry.register(MATRIX_TYPE, matrix_controller) {
            log::error!("registry: {e}");
        }
        registry
    }

    /// Register a factory. A second registration of the same id is rejected
    /// and leaves the first in place.
    pub fn register(&mut self, kind: &str, factory: ControllerFactory) -> Result<()> {
        if self.factories.contains_key(kind) {
            return Err(DashboardError::AlreadyRegistered(kind.to_string()));
        }
        log::debug!("registry: registered chart type '{kind}'");
        self.factories.insert(kind.to_string(), factory);
        Ok(())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Build the controller for `chart`'s type.
    pub fn create(&self, chart: &Chart) -> Result<Box<dyn DatasetController>> {
        let kind = chart.kind();
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| DashboardError::UnknownChartKind(kind.to_string()))?;
        factory(chart)
    }
}

fn matrix_controller(chart: &Chart) -> Result<Box<dyn DatasetController>> {
    let spec = chart
        .as_matrix()
        .ok_or_else(|| DashboardError::Render(format!("'{}' is not a matrix chart", chart.kind())))?;
    Ok(Box::new(MatrixController::new(spec)))
}

thread_local! {
    static REGISTRY: RefCell<ControllerRegistry> = RefCell::new(ControllerRegistry::with_builtins());
}

/// Register a controller factory on the shared registry.
pub fn register(kind: &str, factory: ControllerFactory) -> Result<()> {
    REGISTRY.with(|r| r.borrow_mut().register(kind, factory))
}

/// True if a controller is registered for `kind`.
pub fn is_registered(kind: &str) -> bool {
    REGISTRY.with(|r| r.borrow().contains(kind))
}

/// Build a controller for `chart` from the shared registry.
pub fn create_controller(chart: &Chart) -> Result<Box<dyn DatasetController>> {
    REGISTRY.with(|r| r.borrow().create(chart))
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

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_matrix_is_builtin() {
        assert!(is_registered(MATRIX_TYPE));
        assert!(!is_registered("bar"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let err = register(MATRIX_TYPE, matrix_controller).unwrap_err();
        assert!(matches!(err, DashboardError::AlreadyRegistered(k) if k == "matrix"));
        assert!(is_registered(MATRIX_TYPE));
    }

    #[test]
    fn test_create_matrix_controller() {
        let chart: Chart = heatmap(
            "Efficiency",
            &labels(&["Lunch"]),
            &labels(&["Mon"]),
            &[vec![75.0]],
            2.0,
        )
        .into();
        let mut controller = create_controller(&chart).unwrap();
        assert_eq!(controller.kind(), "matrix");
        controller
            .update(ChartArea::new(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        assert_eq!(controller.elements_at(50.0, 50.0, HitMode::Point), vec![0]);
        assert_eq!(controller.x_scale().map(CategoryScale::len), Some(1));
    }

    #[test]
    fn test_unknown_kind() {
        let chart: Chart = bar_chart("t", &labels(&["a"]), &[1.0], "n").into();
        let err = ControllerRegistry::new().create(&chart).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownChartKind(k) if k == "bar"));
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = ControllerRegistry::new();
        registry.register("bar", matrix_controller).unwrap();
        assert!(registry.contains("bar"));
        let chart: Chart = bar_chart("t", &labels(&["a"]), &[1.0], "n").into();
        // The factory refuses a chart that carries no matrix spec.
        assert!(matches!(
            registry.create(&chart),
            Err(DashboardError::Render(_))
        ));
    }
}
