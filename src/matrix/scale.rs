//! Category axis scale: maps a label to a pixel coordinate.

/// A categorical axis spanning `start..end` pixels.
///
/// With `offset` every label owns an equal band and maps to the band centre,
/// which is what a grid of cells needs. Without it labels sit on evenly
/// spaced ticks from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScale {
    labels: Vec<String>,
    start: f64,
    end: f64,
    offset: bool,
}

impl CategoryScale {
    pub fn new(labels: Vec<String>, offset: bool) -> Self {
        Self {
            labels,
            start: 0.0,
            end: 0.0,
            offset,
        }
    }

    /// Set the pixel span. Called on every layout pass.
    pub fn fit(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Width of one category band (offset scales) or tick gap.
    pub fn band(&self) -> f64 {
        let n = self.labels.len();
        if n == 0 {
            return 0.0;
        }
        let span = self.end - self.start;
        if self.offset {
            span / n as f64
        } else if n == 1 {
            span
        } else {
            span / (n - 1) as f64
        }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Pixel for the category at `index`, `None` if out of range.
    pub fn pixel_for_index(&self, index: usize) -> Option<f64> {
        if index >= self.labels.len() {
            return None;
        }
        let band = self.band();
        let pos = if self.offset {
            (index as f64 + 0.5) * band
        } else if self.labels.len() == 1 {
            0.0
        } else {
            index as f64 * band
        };
        Some(self.start + pos)
    }

    /// Pixel for a label, `None` if the label is not declared on this axis.
    pub fn pixel_for_label(&self, label: &str) -> Option<f64> {
        self.index_of(label).and_then(|i| self.pixel_for_index(i))
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

    fn scale(labels: &[&str], offset: bool, start: f64, end: f64) -> CategoryScale {
        let mut s = CategoryScale::new(labels.iter().map(|l| (*l).to_string()).collect(), offset);
        s.fit(start, end);
        s
    }

    #[test]
    fn test_offset_band_centres() {
        let s = scale(&["Breakfast", "Lunch", "Dinner"], true, 0.0, 300.0);
        assert_eq!(s.band(), 100.0);
        assert_eq!(s.pixel_for_label("Breakfast"), Some(50.0));
        assert_eq!(s.pixel_for_label("Lunch"), Some(150.0));
        assert_eq!(s.pixel_for_label("Dinner"), Some(250.0));
    }

    #[test]
    fn test_ticks_without_offset() {
        let s = scale(&["a", "b", "c"], false, 10.0, 110.0);
        assert_eq!(s.pixel_for_index(0), Some(10.0));
        assert_eq!(s.pixel_for_index(2), Some(110.0));
        assert_eq!(scale(&["only"], false, 10.0, 110.0).pixel_for_index(0), Some(10.0));
    }

    #[test]
    fn test_unknown_label() {
        let s = scale(&["Mon"], true, 0.0, 100.0);
        assert_eq!(s.pixel_for_label("Sun"), None);
        assert_eq!(s.pixel_for_index(1), None);
    }
}
