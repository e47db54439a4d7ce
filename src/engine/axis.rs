//! Axis range controller
//!
//! Owns the visible X (time) and Y (value) ranges and the mapping between
//! domain coordinates and screen pixels.
//!
//! - **Sliding window**: while live, X spans `[now - window, now]`
//! - **Auto Y**: padded min/max over the buffered values
//! - **Fit**: after a bulk load, X spans the first..last timestamps

use crate::config::{AxesConfig, YScope};
use crate::series::SeriesBuffer;
use crate::types::{PlotRect, Point, Range, ScreenPos, Viewport};

/// Y range of a freshly created chart
pub const DEFAULT_Y_RANGE: Range = Range {
    min: 0.0,
    max: 100.0,
};

/// Computes and holds the visible ranges
#[derive(Debug, Clone)]
pub struct AxisRangeController {
    viewport: Viewport,
    window_ms: f64,
    padding_fraction: f64,
    min_y_span: f64,
    min_x_span_ms: f64,
    y_scope: YScope,
}

impl AxisRangeController {
    /// Create a controller whose X window ends at `now_ms`
    pub fn new(config: &AxesConfig, now_ms: f64) -> Self {
        let mut axes = Self {
            viewport: Viewport::new(Range::new(0.0, 0.0), DEFAULT_Y_RANGE),
            window_ms: config.window_ms,
            padding_fraction: config.padding_fraction,
            min_y_span: config.min_y_span,
            min_x_span_ms: config.min_x_span_ms,
            y_scope: config.y_scope,
        };
        axes.reset(now_ms);
        axes
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn x_range(&self) -> Range {
        self.viewport.x
    }

    pub fn y_range(&self) -> Range {
        self.viewport.y
    }

    /// Overwrite both ranges (zoom/pan results)
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Default window ending at `now_ms` with the initial Y range
    pub fn reset(&mut self, now_ms: f64) {
        self.viewport = Viewport::new(self.sliding_window(now_ms), DEFAULT_Y_RANGE);
    }

    /// Per-tick update: slide X to end at `now_ms` and refit Y
    pub fn update_sliding(&mut self, now_ms: f64, buffer: &SeriesBuffer) {
        self.viewport.x = self.sliding_window(now_ms);
        self.update_y(buffer);
    }

    /// Refit Y from the buffer; an empty scan keeps the last Y range
    pub fn update_y(&mut self, buffer: &SeriesBuffer) {
        let bounds = match self.y_scope {
            YScope::AllPoints => buffer.value_bounds(),
            YScope::VisibleWindow => {
                buffer.value_bounds_in(self.viewport.x.min, self.viewport.x.max)
            }
        };
        if let Ok((min_y, max_y)) = bounds {
            self.viewport.y = self.padded_y(min_y, max_y);
        }
    }

    /// Fit X to the first..last timestamps and refit Y over all points
    ///
    /// Does nothing on an empty buffer.
    pub fn fit_to_data(&mut self, buffer: &SeriesBuffer) {
        if buffer.is_empty() {
            return;
        }
        let (Ok(first), Ok(last)) = (buffer.first(), buffer.last()) else {
            return;
        };
        self.viewport.x =
            Range::new(first.timestamp_ms, last.timestamp_ms).with_min_span(self.min_x_span_ms);
        if let Ok((min_y, max_y)) = buffer.value_bounds() {
            self.viewport.y = self.padded_y(min_y, max_y);
        }
    }

    /// Symmetric padding, clamped to the minimum visible span
    pub fn padded_y(&self, min_y: f64, max_y: f64) -> Range {
        let padding = self.padding_fraction * (max_y - min_y);
        Range::new(min_y - padding, max_y + padding).with_min_span(self.min_y_span)
    }

    fn sliding_window(&self, now_ms: f64) -> Range {
        Range::new(now_ms - self.window_ms, now_ms)
    }

    // ==================== Pixel Mapping ====================

    /// Screen X of a timestamp
    pub fn x_to_screen(&self, timestamp_ms: f64, rect: &PlotRect) -> f64 {
        let x = self.viewport.x;
        if rect.width <= 0.0 || x.span() <= 0.0 {
            return rect.left;
        }
        rect.left + (timestamp_ms - x.min) / x.span() * rect.width
    }

    /// Timestamp under a screen X
    pub fn screen_to_x(&self, screen_x: f64, rect: &PlotRect) -> f64 {
        let x = self.viewport.x;
        if rect.width <= 0.0 {
            return x.min;
        }
        x.min + (screen_x - rect.left) / rect.width * x.span()
    }

    /// Screen Y of a value (screen Y grows downward)
    pub fn y_to_screen(&self, value: f64, rect: &PlotRect) -> f64 {
        let y = self.viewport.y;
        if rect.height <= 0.0 || y.span() <= 0.0 {
            return rect.bottom();
        }
        rect.bottom() - (value - y.min) / y.span() * rect.height
    }

    /// Value under a screen Y
    pub fn screen_to_y(&self, screen_y: f64, rect: &PlotRect) -> f64 {
        let y = self.viewport.y;
        if rect.height <= 0.0 {
            return y.min;
        }
        y.min + (rect.bottom() - screen_y) / rect.height * y.span()
    }

    /// Map a domain point to the screen
    pub fn to_screen(&self, point: &Point, rect: &PlotRect) -> ScreenPos {
        ScreenPos::new(
            self.x_to_screen(point.timestamp_ms, rect),
            self.y_to_screen(point.value, rect),
        )
    }

    /// Map a screen position to domain coordinates
    pub fn to_domain(&self, pos: ScreenPos, rect: &PlotRect) -> Point {
        Point::new(self.screen_to_x(pos.x, rect), self.screen_to_y(pos.y, rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> AxisRangeController {
        AxisRangeController::new(&AxesConfig::default(), 10_000.0)
    }

    #[test]
    fn test_initial_window() {
        let axes = controller();
        assert_eq!(axes.x_range(), Range::new(0.0, 10_000.0));
        assert_eq!(axes.y_range(), DEFAULT_Y_RANGE);
    }

    #[test]
    fn test_padding_default_fraction() {
        let mut axes = controller();
        let buf = SeriesBuffer::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        axes.update_y(&buf);
        let y = axes.y_range();
        assert!((y.min - -1.0).abs() < 1e-12);
        assert!((y.max - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_series_is_clamped() {
        let mut axes = controller();
        let buf = SeriesBuffer::from_points(vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0)]);
        axes.update_y(&buf);
        assert_eq!(axes.y_range(), Range::new(4.0, 6.0));
    }

    #[test]
    fn test_empty_buffer_keeps_last_y() {
        let mut axes = controller();
        let buf = SeriesBuffer::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        axes.update_y(&buf);
        let before = axes.y_range();

        axes.update_sliding(20_000.0, &SeriesBuffer::new());
        assert_eq!(axes.y_range(), before);
        assert_eq!(axes.x_range(), Range::new(10_000.0, 20_000.0));
    }

    #[test]
    fn test_visible_window_scope() {
        let config = AxesConfig {
            y_scope: YScope::VisibleWindow,
            ..AxesConfig::default()
        };
        let mut axes = AxisRangeController::new(&config, 0.0);
        let buf = SeriesBuffer::from_points(vec![
            Point::new(0.0, 1000.0),
            Point::new(15_000.0, 10.0),
            Point::new(20_000.0, 20.0),
        ]);
        axes.update_sliding(20_000.0, &buf);
        let y = axes.y_range();
        assert!((y.min - 9.0).abs() < 1e-9);
        assert!((y.max - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_data() {
        let mut axes = controller();
        let buf = SeriesBuffer::from_points(vec![
            Point::new(500.0, 1.0),
            Point::new(900.0, 3.0),
            Point::new(1500.0, 2.0),
        ]);
        axes.fit_to_data(&buf);
        assert_eq!(axes.x_range(), Range::new(500.0, 1500.0));
        assert!((axes.y_range().min - 0.8).abs() < 1e-12);
        assert!((axes.y_range().max - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_fit_single_point_widens_x() {
        let mut axes = controller();
        axes.fit_to_data(&SeriesBuffer::from_points(vec![Point::new(100.0, 1.0)]));
        assert!(axes.x_range().span() > 0.0);
        assert!(axes.x_range().contains(100.0));
    }

    #[test]
    fn test_fit_empty_is_noop() {
        let mut axes = controller();
        let before = axes.viewport();
        axes.fit_to_data(&SeriesBuffer::new());
        assert_eq!(axes.viewport(), before);
    }

    #[test]
    fn test_pixel_mapping_round_trip() {
        let axes = controller();
        let rect = PlotRect::new(50.0, 10.0, 500.0, 200.0);

        assert_eq!(axes.x_to_screen(0.0, &rect), 50.0);
        assert_eq!(axes.x_to_screen(10_000.0, &rect), 550.0);
        assert_eq!(axes.y_to_screen(0.0, &rect), 210.0);
        assert_eq!(axes.y_to_screen(100.0, &rect), 10.0);

        let p = Point::new(2_500.0, 75.0);
        let back = axes.to_domain(axes.to_screen(&p, &rect), &rect);
        assert!((back.timestamp_ms - p.timestamp_ms).abs() < 1e-9);
        assert!((back.value - p.value).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_rect_does_not_divide_by_zero() {
        let axes = controller();
        let rect = PlotRect::new(0.0, 0.0, 0.0, 0.0);
        assert!(axes.screen_to_x(10.0, &rect).is_finite());
        assert!(axes.screen_to_y(10.0, &rect).is_finite());
        assert!(axes.x_to_screen(10.0, &rect).is_finite());
    }
}
