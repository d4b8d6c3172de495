//! Eraser gesture geometry.
//!
//! # Responsibility
//! - Turn repeated pointer positions into swept regions and filter the
//!   strokes they hit.
//!
//! # Invariants
//! - The first motion after `begin()` only records the point.
//! - `sweep` returns a new stroke list only when at least one stroke was
//!   removed, so every returned list is worth a history snapshot.

use crate::ink::geometry::{Parallelogram, Segment, Vec2};
use crate::ink::strokes::Stroke;

/// Swept-region half-width in stroke coordinate units.
pub const ERASER_PADDING: f32 = 50.0;

/// Tracks the previous pointer position of one erase drag.
pub struct Eraser {
    previous: Option<Vec2>,
    padding: f32,
}

impl Eraser {
    pub fn new(padding: f32) -> Self {
        Self {
            previous: None,
            padding,
        }
    }

    /// Starts a drag; the next motion only records its position.
    pub fn begin(&mut self) {
        self.previous = None;
    }

    /// Ends a drag; the caller triggers persistence.
    pub fn end(&mut self) {
        self.previous = None;
    }

    /// Advances the drag to `(x, y)` and removes intersecting strokes.
    ///
    /// Returns the filtered list when at least one stroke intersected the
    /// swept region, `None` when nothing changed.
    pub fn sweep(&mut self, x: f32, y: f32, strokes: &[Stroke]) -> Option<Vec<Stroke>> {
        let current = Vec2::new(x, y);
        let previous = self.previous.replace(current)?;

        let region = Parallelogram::from_segment_and_padding(
            &Segment::new(previous, current),
            self.padding,
        );

        let kept: Vec<Stroke> = strokes
            .iter()
            .filter(|stroke| !stroke.intersects(&region))
            .cloned()
            .collect();

        if kept.len() == strokes.len() {
            None
        } else {
            Some(kept)
        }
    }
}

impl Default for Eraser {
    fn default() -> Self {
        Self::new(ERASER_PADDING)
    }
}

#[cfg(test)]
mod tests {
    use super::Eraser;
    use crate::ink::brush::{Brush, BrushFamily, Color, StockBrush};
    use crate::ink::strokes::{Stroke, StrokeInput, StrokeInputBatch};

    fn horizontal_stroke(y: f32) -> Stroke {
        let brush = Brush::new(
            BrushFamily::Stock(StockBrush::Marker),
            Color::BLACK,
            5.0,
            0.1,
        );
        let inputs = StrokeInputBatch::new(vec![
            StrokeInput::new(0.0, y, 1.0, 0),
            StrokeInput::new(100.0, y, 1.0, 20),
        ]);
        Stroke::new(brush, inputs)
    }

    #[test]
    fn first_motion_only_records_the_point() {
        let mut eraser = Eraser::new(10.0);
        eraser.begin();
        let strokes = vec![horizontal_stroke(0.0)];
        assert!(eraser.sweep(50.0, 0.0, &strokes).is_none());
        // Second motion sweeps from the recorded point and hits.
        assert_eq!(eraser.sweep(50.0, 5.0, &strokes).unwrap().len(), 0);
    }

    #[test]
    fn sweep_removes_only_intersecting_strokes() {
        let mut eraser = Eraser::new(10.0);
        eraser.begin();
        let near = horizontal_stroke(0.0);
        let far = horizontal_stroke(500.0);
        let strokes = vec![near, far.clone()];

        assert!(eraser.sweep(50.0, -5.0, &strokes).is_none());
        let remaining = eraser.sweep(50.0, 5.0, &strokes).unwrap();
        assert_eq!(remaining, vec![far]);
    }

    #[test]
    fn miss_returns_none() {
        let mut eraser = Eraser::new(10.0);
        eraser.begin();
        let strokes = vec![horizontal_stroke(500.0)];
        assert!(eraser.sweep(0.0, 0.0, &strokes).is_none());
        assert!(eraser.sweep(100.0, 0.0, &strokes).is_none());
    }

    #[test]
    fn begin_resets_previous_point_tracking() {
        let mut eraser = Eraser::new(10.0);
        eraser.begin();
        let strokes = vec![horizontal_stroke(0.0)];
        assert!(eraser.sweep(50.0, 0.0, &strokes).is_none());
        eraser.end();
        eraser.begin();
        // No previous point again; a fresh drag must not sweep yet.
        assert!(eraser.sweep(60.0, 0.0, &strokes).is_none());
    }
}
