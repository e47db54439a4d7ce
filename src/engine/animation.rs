//! Newest-point glide animation
//!
//! When a sample arrives, the last point is first moved back onto the
//! previous point and then walked toward its real position over a fixed
//! number of sub-steps. Each sub-step is a discrete unit delivered by the
//! engine scheduler; nothing here blocks or sleeps.
//!
//! Before every sub-step the animation checks that the chart is still
//! running and that the buffer is the one it started on. If not, it stops
//! where it is: the last point keeps whatever interpolated position it
//! reached.

use crate::config::AnimationConfig;
use crate::series::SeriesBuffer;
use crate::types::Point;

/// Result of delivering one sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No animation in flight
    Idle,
    /// An intermediate position was written
    Advanced,
    /// The final position was written
    Finished,
    /// The animation was dropped without reaching its target
    Aborted(AbortReason),
}

/// Why an animation stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The chart left the Running state
    Stopped,
    /// The buffer was cleared, reloaded or resized underneath
    BufferChanged,
}

/// An in-flight glide from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Glide {
    from: Point,
    to: Point,
    step: usize,
    steps: usize,
    generation: u64,
    len: usize,
}

impl Glide {
    fn position(&self) -> Point {
        if self.step >= self.steps {
            self.to
        } else {
            self.from.lerp(&self.to, self.step as f64 / self.steps as f64)
        }
    }

    fn matches(&self, buffer: &SeriesBuffer) -> bool {
        buffer.generation() == self.generation && buffer.len() == self.len
    }
}

/// Drives the glide of the newest point
#[derive(Debug, Clone)]
pub struct AnimationController {
    steps: usize,
    enabled: bool,
    active: Option<Glide>,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl AnimationController {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            steps: config.steps,
            enabled: config.enabled && config.steps > 0,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Sub-steps still to be delivered
    pub fn remaining_steps(&self) -> usize {
        self.active.map(|g| g.steps - g.step).unwrap_or(0)
    }

    /// Start gliding the last point from the second-to-last one
    ///
    /// Applies sub-step 0 immediately. Returns `false` (and leaves the
    /// buffer untouched) when animation is disabled or fewer than two
    /// points exist.
    pub fn start(&mut self, buffer: &mut SeriesBuffer) -> bool {
        self.active = None;
        if !self.enabled || buffer.len() < 2 {
            return false;
        }
        let (Ok(from), Ok(to)) = (buffer.at(buffer.len() - 2), buffer.last()) else {
            return false;
        };
        let glide = Glide {
            from,
            to,
            step: 0,
            steps: self.steps,
            generation: buffer.generation(),
            len: buffer.len(),
        };
        if buffer.replace_last(glide.position()).is_err() {
            return false;
        }
        self.active = Some(glide);
        true
    }

    /// Deliver the next sub-step
    pub fn step(&mut self, buffer: &mut SeriesBuffer, running: bool) -> StepOutcome {
        let Some(mut glide) = self.active.take() else {
            return StepOutcome::Idle;
        };
        if !running {
            tracing::debug!("Animation aborted at step {}/{}: stopped", glide.step, glide.steps);
            return StepOutcome::Aborted(AbortReason::Stopped);
        }
        if !glide.matches(buffer) {
            tracing::debug!("Animation aborted at step {}/{}: buffer changed", glide.step, glide.steps);
            return StepOutcome::Aborted(AbortReason::BufferChanged);
        }

        glide.step += 1;
        if buffer.replace_last(glide.position()).is_err() {
            return StepOutcome::Aborted(AbortReason::BufferChanged);
        }
        if glide.step >= glide.steps {
            StepOutcome::Finished
        } else {
            self.active = Some(glide);
            StepOutcome::Advanced
        }
    }

    /// Jump straight to the target, if the buffer still matches
    pub fn finish(&mut self, buffer: &mut SeriesBuffer) {
        if let Some(glide) = self.active.take() {
            if glide.matches(buffer) {
                // Length matched, so the buffer is non-empty
                let _ = buffer.replace_last(glide.to);
            }
        }
    }

    /// Drop the in-flight glide, leaving the last point where it is
    pub fn abort(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_points() -> SeriesBuffer {
        SeriesBuffer::from_points(vec![Point::new(0.0, 10.0), Point::new(100.0, 20.0)])
    }

    fn controller(steps: usize) -> AnimationController {
        AnimationController::new(&AnimationConfig {
            steps,
            ..AnimationConfig::default()
        })
    }

    #[test]
    fn test_start_moves_last_to_previous() {
        let mut buf = two_points();
        let mut anim = controller(10);
        assert!(anim.start(&mut buf));
        assert_eq!(buf.last().unwrap(), Point::new(0.0, 10.0));
        assert_eq!(buf.count(), 2);
        assert_eq!(anim.remaining_steps(), 10);
    }

    #[test]
    fn test_start_needs_two_points() {
        let mut buf = SeriesBuffer::from_points(vec![Point::new(0.0, 1.0)]);
        let mut anim = controller(10);
        assert!(!anim.start(&mut buf));
        assert_eq!(buf.last().unwrap(), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_steps_interpolate_to_target() {
        let mut buf = two_points();
        let mut anim = controller(4);
        anim.start(&mut buf);

        assert_eq!(anim.step(&mut buf, true), StepOutcome::Advanced);
        assert_eq!(buf.last().unwrap(), Point::new(25.0, 12.5));
        assert_eq!(anim.step(&mut buf, true), StepOutcome::Advanced);
        assert_eq!(buf.last().unwrap(), Point::new(50.0, 15.0));
        assert_eq!(anim.step(&mut buf, true), StepOutcome::Advanced);
        assert_eq!(anim.step(&mut buf, true), StepOutcome::Finished);
        assert_eq!(buf.last().unwrap(), Point::new(100.0, 20.0));
        assert_eq!(anim.step(&mut buf, true), StepOutcome::Idle);
        assert!(!anim.is_active());
    }

    #[test]
    fn test_stop_freezes_partial_position() {
        let mut buf = two_points();
        let mut anim = controller(4);
        anim.start(&mut buf);
        anim.step(&mut buf, true);

        assert_eq!(
            anim.step(&mut buf, false),
            StepOutcome::Aborted(AbortReason::Stopped)
        );
        assert_eq!(buf.last().unwrap(), Point::new(25.0, 12.5));
        assert!(!anim.is_active());
    }

    #[test]
    fn test_buffer_swap_aborts() {
        let mut buf = two_points();
        let mut anim = controller(4);
        anim.start(&mut buf);

        buf.replace_all(vec![Point::new(5.0, 5.0), Point::new(6.0, 6.0)]);
        assert_eq!(
            anim.step(&mut buf, true),
            StepOutcome::Aborted(AbortReason::BufferChanged)
        );
        assert_eq!(buf.last().unwrap(), Point::new(6.0, 6.0));
    }

    #[test]
    fn test_cleared_buffer_aborts_without_panic() {
        let mut buf = two_points();
        let mut anim = controller(4);
        anim.start(&mut buf);
        buf.clear();
        assert_eq!(
            anim.step(&mut buf, true),
            StepOutcome::Aborted(AbortReason::BufferChanged)
        );
        anim.finish(&mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_finish_jumps_to_target() {
        let mut buf = two_points();
        let mut anim = controller(100);
        anim.start(&mut buf);
        anim.step(&mut buf, true);
        anim.finish(&mut buf);
        assert_eq!(buf.last().unwrap(), Point::new(100.0, 20.0));
        assert!(!anim.is_active());
    }

    #[test]
    fn test_disabled_animation_never_starts() {
        let mut buf = two_points();
        let mut anim = AnimationController::new(&AnimationConfig {
            enabled: false,
            ..AnimationConfig::default()
        });
        assert!(!anim.start(&mut buf));
        assert_eq!(buf.last().unwrap(), Point::new(100.0, 20.0));
    }
}
