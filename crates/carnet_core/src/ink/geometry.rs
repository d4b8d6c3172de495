//! Plane geometry primitives for eraser hit-testing.
//!
//! # Responsibility
//! - Represent points, segments and the padded swept region of an eraser
//!   drag step.
//! - Answer region/polyline intersection queries.
//!
//! # Invariants
//! - `Parallelogram` corners keep a consistent winding, so the convex
//!   containment test works edge by edge.

/// A point or direction in stroke coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Directed line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

/// Convex quadrilateral produced by sweeping a segment and inflating it by
/// a fixed padding on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallelogram {
    corners: [Vec2; 4],
}

impl Parallelogram {
    /// Builds the swept region for one eraser drag step.
    ///
    /// The segment is extended by `padding` past both endpoints and offset
    /// by `padding` on both sides. A zero-length segment degenerates to an
    /// axis-aligned square around the point.
    pub fn from_segment_and_padding(segment: &Segment, padding: f32) -> Self {
        let delta = segment.end.sub(segment.start);
        let len = delta.length();
        let dir = if len > f32::EPSILON {
            Vec2::new(delta.x / len, delta.y / len)
        } else {
            Vec2::new(1.0, 0.0)
        };
        let normal = Vec2::new(-dir.y, dir.x);

        let along = Vec2::new(dir.x * padding, dir.y * padding);
        let aside = Vec2::new(normal.x * padding, normal.y * padding);
        let tail = segment.start.sub(along);
        let head = Vec2::new(segment.end.x + along.x, segment.end.y + along.y);

        Self {
            corners: [
                tail.sub(aside),
                head.sub(aside),
                Vec2::new(head.x + aside.x, head.y + aside.y),
                Vec2::new(tail.x + aside.x, tail.y + aside.y),
            ],
        }
    }

    pub fn corners(&self) -> &[Vec2; 4] {
        &self.corners
    }

    /// Convex containment test; boundary points count as inside.
    pub fn contains(&self, point: Vec2) -> bool {
        let mut sign = 0.0f32;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let cross = b.sub(a).cross(point.sub(a));
            if cross.abs() <= f32::EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Returns whether the segment touches the region, either by an
    /// endpoint inside it or by crossing one of its edges.
    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        if self.contains(segment.start) || self.contains(segment.end) {
            return true;
        }
        for i in 0..4 {
            let edge = Segment::new(self.corners[i], self.corners[(i + 1) % 4]);
            if segments_intersect(&edge, segment) {
                return true;
            }
        }
        false
    }
}

/// Segment/segment intersection with collinear-overlap handling.
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    let d1 = direction(b.start, b.end, a.start);
    let d2 = direction(b.start, b.end, a.end);
    let d3 = direction(a.start, a.end, b.start);
    let d4 = direction(a.start, a.end, b.end);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b.start, b.end, a.start))
        || (d2 == 0.0 && on_segment(b.start, b.end, a.end))
        || (d3 == 0.0 && on_segment(a.start, a.end, b.start))
        || (d4 == 0.0 && on_segment(a.start, a.end, b.end))
}

fn direction(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    b.sub(a).cross(c.sub(a))
}

fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

#[cfg(test)]
mod tests {
    use super::{segments_intersect, Parallelogram, Segment, Vec2};

    fn region() -> Parallelogram {
        Parallelogram::from_segment_and_padding(
            &Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)),
            2.0,
        )
    }

    #[test]
    fn swept_region_contains_segment_and_padding_band() {
        let region = region();
        assert!(region.contains(Vec2::new(5.0, 0.0)));
        assert!(region.contains(Vec2::new(5.0, 1.9)));
        assert!(region.contains(Vec2::new(-1.5, 0.0)));
        assert!(!region.contains(Vec2::new(5.0, 2.5)));
        assert!(!region.contains(Vec2::new(13.0, 0.0)));
    }

    #[test]
    fn degenerate_segment_becomes_square_around_point() {
        let point = Vec2::new(3.0, 3.0);
        let region =
            Parallelogram::from_segment_and_padding(&Segment::new(point, point), 1.0);
        assert!(region.contains(Vec2::new(3.5, 3.5)));
        assert!(!region.contains(Vec2::new(4.5, 3.0)));
    }

    #[test]
    fn crossing_segment_intersects_even_with_outside_endpoints() {
        let region = region();
        let crossing = Segment::new(Vec2::new(5.0, -5.0), Vec2::new(5.0, 5.0));
        assert!(region.intersects_segment(&crossing));

        let distant = Segment::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!region.intersects_segment(&distant));
    }

    #[test]
    fn segment_intersection_handles_shared_endpoint() {
        let a = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0));
        let b = Segment::new(Vec2::new(4.0, 4.0), Vec2::new(8.0, 0.0));
        assert!(segments_intersect(&a, &b));

        let c = Segment::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 2.0));
        let d = Segment::new(Vec2::new(2.0, 0.0), Vec2::new(3.0, 0.0));
        assert!(!segments_intersect(&c, &d));
    }
}
