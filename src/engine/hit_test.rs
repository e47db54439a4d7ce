//! Hover hit testing
//!
//! Decides whether the pointer is close enough to the drawn polyline to
//! show a value tooltip. Distances are measured in screen pixels so the
//! threshold means the same thing at every zoom level.

use super::axis::AxisRangeController;
use crate::series::SeriesBuffer;
use crate::types::{PlotRect, Point, ScreenPos};

/// Tooltip timestamp format
pub const TOOLTIP_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Closest point to `p` on the segment `a..b` (2-D, any units)
pub fn closest_point_on_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return a;
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    (a.0 + t * dx, a.1 + t * dy)
}

/// Minimum distance from `p` to the segment `a..b`
///
/// A degenerate segment (`a == b`) degrades to point-to-point distance.
pub fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let c = closest_point_on_segment(p, a, b);
    (p.0 - c.0).hypot(p.1 - c.1)
}

/// [`distance_to_segment`] on domain points
pub fn point_distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    distance_to_segment(
        (p.timestamp_ms, p.value),
        (a.timestamp_ms, a.value),
        (b.timestamp_ms, b.value),
    )
}

/// A visible value tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Location on the line under the pointer, in domain coordinates
    pub point: Point,
    /// Index of the segment start in the buffer
    pub segment: usize,
    /// Pixel distance from the pointer to the line
    pub distance_px: f64,
    /// Formatted text
    pub text: String,
}

/// Format the tooltip text for a domain point
pub fn format_tooltip(point: &Point) -> String {
    let when = chrono::DateTime::from_timestamp_millis(point.timestamp_ms.round() as i64)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format(TOOLTIP_TIME_FORMAT)
                .to_string()
        })
        .unwrap_or_else(|| format!("{:.0} ms", point.timestamp_ms));
    format!("Date: {}\nValue: {:.2}", when, point.value)
}

/// Pixel-threshold hover test over the buffered polyline
#[derive(Debug, Clone)]
pub struct HitTester {
    threshold_px: f64,
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl HitTester {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px: threshold_px.max(0.0),
        }
    }

    /// Tooltip for the pointer at `cursor`, if it is near the line
    ///
    /// Returns `None` when the pointer's time lies outside the visible X
    /// range or no segment is within the threshold. Scans every segment,
    /// O(N) per call; the nearest one wins.
    pub fn hover(
        &self,
        cursor: ScreenPos,
        buffer: &SeriesBuffer,
        axes: &AxisRangeController,
        rect: &PlotRect,
    ) -> Option<Tooltip> {
        if !rect.is_drawable() {
            return None;
        }
        let domain = axes.to_domain(cursor, rect);
        if !axes.x_range().contains(domain.timestamp_ms) {
            return None;
        }

        let c = (cursor.x, cursor.y);
        let mut best: Option<(usize, f64, (f64, f64))> = None;
        for (i, (a, b)) in buffer.segments().enumerate() {
            let sa = axes.to_screen(&a, rect);
            let sb = axes.to_screen(&b, rect);
            let closest = closest_point_on_segment(c, (sa.x, sa.y), (sb.x, sb.y));
            let dist = (c.0 - closest.0).hypot(c.1 - closest.1);
            if dist <= self.threshold_px && best.map_or(true, |(_, d, _)| dist < d) {
                best = Some((i, dist, closest));
            }
        }

        let (segment, distance_px, closest) = best?;
        let point = axes.to_domain(ScreenPos::new(closest.0, closest.1), rect);
        Some(Tooltip {
            point,
            segment,
            distance_px,
            text: format_tooltip(&point),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxesConfig;
    use crate::types::{Range, Viewport};

    #[test]
    fn test_degenerate_segment_is_point_distance() {
        let d = distance_to_segment((3.0, 4.0), (0.0, 0.0), (0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_on_segment_is_zero() {
        assert_eq!(distance_to_segment((5.0, 5.0), (0.0, 0.0), (10.0, 10.0)), 0.0);
        assert_eq!(distance_to_segment((0.0, 0.0), (0.0, 0.0), (10.0, 10.0)), 0.0);
    }

    #[test]
    fn test_projection_is_clamped_to_segment() {
        // Beyond the end: distance to the endpoint, not to the infinite line
        let d = distance_to_segment((20.0, 0.0), (0.0, 0.0), (10.0, 0.0));
        assert!((d - 10.0).abs() < 1e-12);
        let d = distance_to_segment((-3.0, 4.0), (0.0, 0.0), (10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_perpendicular_distance() {
        let d = distance_to_segment((5.0, 3.0), (0.0, 0.0), (10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_domain_point_distance() {
        let d = point_distance_to_segment(
            &Point::new(1.0, 1.0),
            &Point::new(1.0, 1.0),
            &Point::new(1.0, 1.0),
        );
        assert_eq!(d, 0.0);
    }

    fn fixture() -> (SeriesBuffer, AxisRangeController, PlotRect) {
        let mut axes = AxisRangeController::new(&AxesConfig::default(), 0.0);
        axes.set_viewport(Viewport::new(Range::new(0.0, 100.0), Range::new(0.0, 100.0)));
        let buf = SeriesBuffer::from_points(vec![Point::new(0.0, 50.0), Point::new(100.0, 50.0)]);
        // 1 domain unit per pixel on both axes
        (buf, axes, PlotRect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn test_hover_near_line_shows_tooltip() {
        let (buf, axes, rect) = fixture();
        let tip = HitTester::default()
            .hover(ScreenPos::new(40.0, 53.0), &buf, &axes, &rect)
            .unwrap();
        assert_eq!(tip.segment, 0);
        assert!((tip.distance_px - 3.0).abs() < 1e-9);
        assert!((tip.point.timestamp_ms - 40.0).abs() < 1e-9);
        assert!((tip.point.value - 50.0).abs() < 1e-9);
        assert!(tip.text.contains("Value: 50.00"));
    }

    #[test]
    fn test_hover_far_from_line_hides() {
        let (buf, axes, rect) = fixture();
        assert!(HitTester::default()
            .hover(ScreenPos::new(40.0, 70.0), &buf, &axes, &rect)
            .is_none());
    }

    #[test]
    fn test_hover_outside_x_range_hides() {
        let (buf, axes, rect) = fixture();
        assert!(HitTester::default()
            .hover(ScreenPos::new(101.0, 50.0), &buf, &axes, &rect)
            .is_none());
    }

    #[test]
    fn test_hover_picks_nearest_segment() {
        let (_, axes, rect) = fixture();
        let buf = SeriesBuffer::from_points(vec![
            Point::new(0.0, 50.0),
            Point::new(50.0, 50.0),
            Point::new(50.0, 46.0),
        ]);
        let tip = HitTester::default()
            .hover(ScreenPos::new(49.0, 52.0), &buf, &axes, &rect)
            .unwrap();
        assert_eq!(tip.segment, 1);
    }

    #[test]
    fn test_hover_with_single_point_hides() {
        let (_, axes, rect) = fixture();
        let buf = SeriesBuffer::from_points(vec![Point::new(50.0, 50.0)]);
        assert!(HitTester::default()
            .hover(ScreenPos::new(50.0, 50.0), &buf, &axes, &rect)
            .is_none());
    }
}
