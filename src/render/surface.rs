//! Drawing surface abstraction.
//!
//! The matrix renderer only needs a handful of Canvas 2D calls. Putting them
//! behind a trait lets the same drawing code target the browser canvas and
//! an in-memory recorder (tests, CLI dumps).

use serde::Serialize;
use web_sys::CanvasRenderingContext2d;

use crate::error::{DashboardError, Result};

/// The Canvas 2D subset used by dashboard renderers.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn set_text_baseline(&mut self, baseline: &str);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
}

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&mut self, align: &str) {
        CanvasRenderingContext2d::set_text_align(self, align);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        CanvasRenderingContext2d::set_text_baseline(self, baseline);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)
            .map_err(|e| DashboardError::Render(format!("fill_text failed: {e:?}")))
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke();
    }
}

/// A recorded drawing call with the state it was issued under.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    Clear {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
        line_width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: String,
        font: String,
        align: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
    },
}

#[derive(Debug, Clone)]
struct RecorderState {
    fill: String,
    stroke: String,
    line_width: f64,
    font: String,
    align: String,
    baseline: String,
}

impl Default for RecorderState {
    fn default() -> Self {
        // Canvas 2D initial state
        Self {
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            line_width: 1.0,
            font: "10px sans-serif".to_string(),
            align: "start".to_string(),
            baseline: "alphabetic".to_string(),
        }
    }
}

/// In-memory surface that records every drawing call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    state: RecorderState,
    stack: Vec<RecorderState>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Nesting depth of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.fill = color.to_string();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.stroke = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = font.to_string();
    }

    fn set_text_align(&mut self, align: &str) {
        self.state.align = align.to_string();
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.state.baseline = baseline.to_string();
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::Clear { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            w,
            h,
            color: self.state.fill.clone(),
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            w,
            h,
            color: self.state.stroke.clone(),
            line_width: self.state.line_width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            color: self.state.fill.clone(),
            font: self.state.font.clone(),
            align: self.state.align.clone(),
        });
        Ok(())
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.state.stroke.clone(),
        });
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
    fn test_save_restore_scopes_style() {
        let mut s = RecordingSurface::new();
        s.set_fill_style("red");
        s.save();
        s.set_fill_style("blue");
        s.fill_rect(0.0, 0.0, 1.0, 1.0);
        s.restore();
        s.fill_rect(0.0, 0.0, 1.0, 1.0);

        let colors: Vec<_> = s
            .fills()
            .filter_map(|op| match op {
                DrawOp::FillRect { color, .. } => Some(color.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec!["blue", "red"]);
        assert_eq!(s.save_depth(), 0);
    }
}
