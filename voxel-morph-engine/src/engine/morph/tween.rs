use bevy::math::curve::{Curve, EaseFunction, EasingCurve};

/// Delay-then-ease clock. Holds no endpoints itself; the components in
/// `transition` pair it with whatever value they interpolate.
#[derive(Debug, Clone)]
pub struct Tween {
    delay: f32,
    duration: f32,
    elapsed: f32,
    ease: EaseFunction,
}

impl Tween {
    pub fn new(delay: f32, duration: f32, ease: EaseFunction) -> Self {
        Self {
            delay,
            duration,
            elapsed: 0.0,
            ease,
        }
    }

    /// Advance the clock and return the eased progress. Back-style easings
    /// may overshoot 1.0; the time axis is clamped, the value axis is not.
    pub fn tick(&mut self, delta: f32) -> f32 {
        self.elapsed += delta;
        self.progress()
    }

    pub fn progress(&self) -> f32 {
        let t = ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0);
        EasingCurve::new(0.0, 1.0, self.ease).sample_clamped(t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_still_during_the_delay() {
        let mut tween = Tween::new(0.5, 1.0, EaseFunction::Linear);
        assert_eq!(tween.tick(0.3), 0.0);
        assert!(!tween.finished());
    }

    #[test]
    fn linear_progress_after_the_delay() {
        let mut tween = Tween::new(0.5, 1.0, EaseFunction::Linear);
        let progress = tween.tick(1.0);
        assert!((progress - 0.5).abs() < 1e-5);
    }

    #[test]
    fn completes_and_reports_finished() {
        let mut tween = Tween::new(0.2, 0.4, EaseFunction::QuadraticIn);
        let progress = tween.tick(10.0);
        assert!((progress - 1.0).abs() < 1e-5);
        assert!(tween.finished());
    }

    #[test]
    fn back_out_overshoots_past_one() {
        let mut tween = Tween::new(0.0, 1.0, EaseFunction::BackOut);
        let mut peak = 0.0_f32;
        for _ in 0..50 {
            peak = peak.max(tween.tick(0.02));
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn zero_elapsed_is_zero_progress() {
        let tween = Tween::new(0.0, 1.0, EaseFunction::CubicOut);
        assert_eq!(tween.progress(), 0.0);
    }
}
