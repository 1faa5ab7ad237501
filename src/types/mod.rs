//! Data types shared across the dashboard.

pub mod chart;
pub mod feeds;

pub use chart::*;
pub use feeds::*;
