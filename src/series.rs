//! Ordered point storage for the live series
//!
//! [`SeriesBuffer`] holds the samples in insertion order. Earlier points are
//! append-only; only the most recent point may be rewritten (by the
//! animation). Wholesale changes (clear, CSV load) bump a generation counter
//! so in-flight animations can tell the buffer was swapped under them.

use crate::error::{ChartError, Result};
use crate::types::Point;

/// Insertion-ordered sequence of points
#[derive(Debug, Clone, Default)]
pub struct SeriesBuffer {
    points: Vec<Point>,
    generation: u64,
}

impl SeriesBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from existing points
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            generation: 0,
        }
    }

    /// Append a point at the end
    pub fn append(&mut self, timestamp_ms: f64, value: f64) {
        if let Some(last) = self.points.last() {
            if timestamp_ms < last.timestamp_ms {
                tracing::debug!(
                    "Appending out-of-order sample: {} < {}",
                    timestamp_ms,
                    last.timestamp_ms
                );
            }
        }
        self.points.push(Point::new(timestamp_ms, value));
    }

    /// Append an existing point
    pub fn push(&mut self, point: Point) {
        self.append(point.timestamp_ms, point.value);
    }

    /// Overwrite the final point
    pub fn replace_last(&mut self, point: Point) -> Result<()> {
        let last = self.points.last_mut().ok_or(ChartError::EmptyBuffer)?;
        *last = point;
        Ok(())
    }

    /// Remove every point
    pub fn clear(&mut self) {
        self.points.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Replace the whole contents (used by CSV load)
    pub fn replace_all(&mut self, points: Vec<Point>) {
        self.points = points;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Alias for [`len`](Self::len)
    pub fn count(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`
    pub fn at(&self, index: usize) -> Result<Point> {
        self.points
            .get(index)
            .copied()
            .ok_or(ChartError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    pub fn first(&self) -> Result<Point> {
        self.points.first().copied().ok_or(ChartError::EmptyBuffer)
    }

    pub fn last(&self) -> Result<Point> {
        self.points.last().copied().ok_or(ChartError::EmptyBuffer)
    }

    /// All points in insertion order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Counter bumped on every wholesale change
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Points whose timestamp lies in the closed window `[x_min, x_max]`
    ///
    /// The returned iterator is `Clone`, so a caller can restart the scan.
    pub fn points_in_range(&self, x_min: f64, x_max: f64) -> PointsInRange<'_> {
        PointsInRange {
            inner: self.points.iter(),
            x_min,
            x_max,
        }
    }

    /// Consecutive `(start, end)` pairs of the polyline
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Minimum and maximum value over all points
    pub fn value_bounds(&self) -> Result<(f64, f64)> {
        fold_bounds(self.points.iter())
    }

    /// Minimum and maximum value over points in the closed X window
    pub fn value_bounds_in(&self, x_min: f64, x_max: f64) -> Result<(f64, f64)> {
        fold_bounds(self.points_in_range(x_min, x_max))
    }

    /// Plot-ready `[x, y]` pairs
    pub fn as_plot_points(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(Point::as_plot_point).collect()
    }
}

fn fold_bounds<'a>(points: impl Iterator<Item = &'a Point>) -> Result<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for p in points {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(p.value), hi.max(p.value)),
            None => (p.value, p.value),
        });
    }
    bounds.ok_or(ChartError::EmptyBuffer)
}

/// Iterator over the points inside a time window
#[derive(Debug, Clone)]
pub struct PointsInRange<'a> {
    inner: std::slice::Iter<'a, Point>,
    x_min: f64,
    x_max: f64,
}

impl<'a> Iterator for PointsInRange<'a> {
    type Item = &'a Point;

    fn next(&mut self) -> Option<Self::Item> {
        let (x_min, x_max) = (self.x_min, self.x_max);
        self.inner
            .by_ref()
            .find(|p| p.timestamp_ms >= x_min && p.timestamp_ms <= x_max)
    }
}
