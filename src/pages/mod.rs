//! Page controllers.
//!
//! Each page reads its feeds, builds charts through the factory layer and
//! mounts them on a [`ChartHost`]. Every chart initialises on its own: a
//! missing canvas or feed key skips that chart and nothing else.

pub mod analysis;
pub mod dashboard;
pub mod data;
pub mod overview;
pub mod waste;

use std::fmt;

use crate::charts::Chart;
use crate::error::DashboardError;
use crate::host::ChartHost;

/// Result of one chart initialiser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// This many charts were mounted.
    Mounted(usize),
    /// Nothing to do: the target or the data was missing.
    Skipped(String),
    /// Data could not be obtained; the container shows an error message.
    Failed(String),
}

impl InitOutcome {
    /// Skip with a logged reason.
    pub fn skipped(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::warn!("{reason}");
        Self::Skipped(reason)
    }

    /// Skip because the feed lacks the keys this chart needs.
    pub fn missing(what: impl Into<String>) -> Self {
        let error = DashboardError::MissingData(what.into());
        log::warn!("{error}");
        Self::Skipped(error.to_string())
    }

    pub fn mounted(&self) -> usize {
        match self {
            Self::Mounted(n) => *n,
            Self::Skipped(_) | Self::Failed(_) => 0,
        }
    }

    /// Combine the outcomes of charts initialised together.
    ///
    /// Any mount wins over skips; with no mounts the first non-mount is kept.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Mounted(a), Self::Mounted(b)) => Self::Mounted(a + b),
            (Self::Mounted(a), _) | (_, Self::Mounted(a)) => Self::Mounted(a),
            (first, _) => first,
        }
    }
}

impl fmt::Display for InitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mounted(n) => write!(f, "mounted {n}"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Outcome of each initialiser of a page, in call order.
pub type PageReport = Vec<(&'static str, InitOutcome)>;

/// Mount `chart` on `id` unless the target is missing.
pub(crate) fn mount(host: &mut dyn ChartHost, id: &str, chart: impl Into<Chart>) -> InitOutcome {
    if !host.has_target(id) {
        return InitOutcome::skipped(format!("Canvas element not found: {id}"));
    }
    match host.mount(id, chart.into()) {
        Ok(_) => InitOutcome::Mounted(1),
        Err(e) => {
            log::error!("{id}: {e}");
            InitOutcome::Skipped(e.to_string())
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

    #[test]
    fn test_outcome_combination() {
        let skip = || InitOutcome::Skipped("x".to_string());
        assert_eq!(InitOutcome::Mounted(1).and(InitOutcome::Mounted(2)), InitOutcome::Mounted(3));
        assert_eq!(skip().and(InitOutcome::Mounted(2)), InitOutcome::Mounted(2));
        assert_eq!(InitOutcome::Mounted(1).and(skip()), InitOutcome::Mounted(1));
        assert_eq!(skip().and(InitOutcome::Skipped("y".to_string())), skip());
        assert_eq!(skip().mounted(), 0);
    }

    #[test]
    fn test_missing_data_reason() {
        assert_eq!(
            InitOutcome::missing("attendance dates"),
            InitOutcome::Skipped("Missing data: attendance dates".to_string())
        );
    }
}
