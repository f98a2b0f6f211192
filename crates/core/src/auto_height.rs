//! Uniform section height.
//!
//! The surface is polled every [`POLL_INTERVAL_MS`]; [`HeightWatch`] decides
//! from the container and font-probe metrics whether the sections need to be
//! measured again, and whether old constraints must be cleared first.

pub const POLL_INTERVAL_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutMetrics {
    pub width: f64,
    pub height: f64,
    /// Height of a one-letter probe element; changes with the font size.
    pub font: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remeasure {
    /// Measure with the current constraints in place.
    Keep,
    /// Clear previous `min-height` before measuring, content may have shrunk.
    Reset,
}

#[derive(Debug, Clone)]
pub struct HeightWatch {
    cached: LayoutMetrics,
}

impl HeightWatch {
    pub fn new(initial: LayoutMetrics) -> Self {
        Self { cached: initial }
    }

    pub fn cached(&self) -> LayoutMetrics {
        self.cached
    }

    pub fn observe(&mut self, current: LayoutMetrics) -> Option<Remeasure> {
        let prev = self.cached;
        let changed = current.height > prev.height
            || current.width != prev.width
            || current.font != prev.font;
        if !changed {
            return None;
        }
        self.cached = current;
        if current.width > prev.width || current.font < prev.font {
            Some(Remeasure::Reset)
        } else {
            Some(Remeasure::Keep)
        }
    }
}

/// Tallest natural height, `None` when nothing was measured.
pub fn max_height(heights: &[f64]) -> Option<f64> {
    heights
        .iter()
        .copied()
        .filter(|h| h.is_finite())
        .fold(None, |acc, h| Some(acc.map_or(h, |m: f64| m.max(h))))
}
