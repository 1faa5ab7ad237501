//! Chart factory layer.
//!
//! Stateless functions turning labelled series into chart configurations.
//! Native kinds (bar, line, pie, scatter) become a [`ChartConfig`] for the
//! charting library; heatmaps become a [`MatrixSpec`] drawn by the matrix
//! controller.

mod factory;

pub use factory::*;

use crate::matrix::{MatrixSpec, MATRIX_TYPE};
use crate::types::ChartConfig;

/// A chart ready to be mounted on a page target.
#[derive(Debug, Clone)]
pub enum Chart {
    Native(ChartConfig),
    Matrix(MatrixSpec),
}

impl Chart {
    /// Type id used for registry lookup.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Native(config) => config.kind.as_str(),
            Self::Matrix(_) => MATRIX_TYPE,
        }
    }

    pub fn as_native(&self) -> Option<&ChartConfig> {
        match self {
            Self::Native(config) => Some(config),
            Self::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&MatrixSpec> {
        match self {
            Self::Native(_) => None,
            Self::Matrix(spec) => Some(spec),
        }
    }

    /// Title shown above the chart, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Native(config) => config
                .options
                .plugins
                .title
                .as_ref()
                .map(|t| t.text.as_str()),
            Self::Matrix(spec) => spec.title.as_deref(),
        }
    }
}

impl From<ChartConfig> for Chart {
    fn from(config: ChartConfig) -> Self {
        Self::Native(config)
    }
}

impl From<MatrixSpec> for Chart {
    fn from(spec: MatrixSpec) -> Self {
        Self::Matrix(spec)
    }
}
