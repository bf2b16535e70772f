use serde::Serialize;

use crate::tags::Frame;

/// A scored candidate clip `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Frame,
    pub end: Frame,

    /// Skip cost, excluding the per-cut penalty
    pub cost: f64,
}

impl Segment {
    pub fn len(&self) -> Frame {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Every ordered pair of cut points, lexicographically
///
/// Pairs are not limited to neighbours: the best clip may run straight over
/// candidate points that are not worth cutting at. With `k` points this
/// yields `k * (k - 1) / 2` pairs, which bounds how many distinct tag
/// boundaries one call can handle.
pub fn enumerate_segments(points: &[Frame]) -> Vec<(Frame, Frame)> {
    let mut segments = Vec::with_capacity(points.len() * points.len().saturating_sub(1) / 2);

    for (i, &start) in points.iter().enumerate() {
        for &end in &points[i + 1..] {
            segments.push((start, end));
        }
    }

    segments
}
