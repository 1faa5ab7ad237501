//! Drawing for chart types rendered by this crate.
//!
//! - [`Surface`]: the Canvas 2D subset renderers draw through
//! - [`RecordingSurface`]: in-memory surface for tests and CLI dumps
//! - [`matrix`]: chart frame (title, ticks, plot area) around a matrix dataset

pub mod matrix;
pub mod surface;

pub use matrix::{plot_area, render_matrix};
pub use surface::{DrawOp, RecordingSurface, Surface};
