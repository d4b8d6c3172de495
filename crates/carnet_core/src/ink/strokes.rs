//! Stroke and input-batch value types.
//!
//! # Responsibility
//! - Represent one finished pen gesture as an immutable sample sequence
//!   plus the brush used to render it.
//! - Answer swept-region intersection queries for the eraser.

use crate::ink::brush::Brush;
use crate::ink::geometry::{Parallelogram, Segment, Vec2};

/// One pointer sample of a stroke gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeInput {
    pub x: f32,
    pub y: f32,
    /// Normalized pressure in `[0, 1]`; 1.0 for pressure-less pointers.
    pub pressure: f32,
    /// Milliseconds since the first sample of the gesture.
    pub elapsed_ms: u64,
}

impl StrokeInput {
    pub const fn new(x: f32, y: f32, pressure: f32, elapsed_ms: u64) -> Self {
        Self {
            x,
            y,
            pressure,
            elapsed_ms,
        }
    }

    fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Ordered, immutable sequence of stroke samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrokeInputBatch {
    inputs: Vec<StrokeInput>,
}

impl StrokeInputBatch {
    pub fn new(inputs: Vec<StrokeInput>) -> Self {
        Self { inputs }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn inputs(&self) -> &[StrokeInput] {
        &self.inputs
    }
}

/// One finished stroke: geometry plus brush.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub brush: Brush,
    pub inputs: StrokeInputBatch,
}

impl Stroke {
    pub fn new(brush: Brush, inputs: StrokeInputBatch) -> Self {
        Self { brush, inputs }
    }

    /// Returns whether any part of the stroke path lies inside `region`.
    ///
    /// A single-sample stroke is tested as a point; longer strokes are
    /// tested segment by segment between consecutive samples.
    pub fn intersects(&self, region: &Parallelogram) -> bool {
        let samples = self.inputs.inputs();
        match samples {
            [] => false,
            [only] => region.contains(only.position()),
            _ => samples.windows(2).any(|pair| {
                region.intersects_segment(&Segment::new(pair[0].position(), pair[1].position()))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Stroke, StrokeInput, StrokeInputBatch};
    use crate::ink::brush::{Brush, BrushFamily, Color, StockBrush};
    use crate::ink::geometry::{Parallelogram, Segment, Vec2};

    fn marker() -> Brush {
        Brush::new(
            BrushFamily::Stock(StockBrush::Marker),
            Color::BLACK,
            5.0,
            0.1,
        )
    }

    fn line_stroke(points: &[(f32, f32)]) -> Stroke {
        let inputs = points
            .iter()
            .enumerate()
            .map(|(i, (x, y))| StrokeInput::new(*x, *y, 1.0, i as u64 * 8))
            .collect();
        Stroke::new(marker(), StrokeInputBatch::new(inputs))
    }

    #[test]
    fn empty_stroke_never_intersects() {
        let stroke = Stroke::new(marker(), StrokeInputBatch::empty());
        let region = Parallelogram::from_segment_and_padding(
            &Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)),
            50.0,
        );
        assert!(!stroke.intersects(&region));
    }

    #[test]
    fn stroke_crossing_region_intersects() {
        let region = Parallelogram::from_segment_and_padding(
            &Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)),
            2.0,
        );
        let crossing = line_stroke(&[(5.0, -10.0), (5.0, 10.0)]);
        assert!(crossing.intersects(&region));

        let distant = line_stroke(&[(0.0, 20.0), (10.0, 20.0)]);
        assert!(!distant.intersects(&region));
    }

    #[test]
    fn single_sample_stroke_is_tested_as_point() {
        let region = Parallelogram::from_segment_and_padding(
            &Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)),
            3.0,
        );
        assert!(line_stroke(&[(1.0, 1.0)]).intersects(&region));
        assert!(!line_stroke(&[(10.0, 10.0)]).intersects(&region));
    }
}
