use crate::easing::Ease;
use glam::Vec3;

/// Values a tween can interpolate between.
pub trait Lerp: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

/// Wall-clock tween: sampled with absolute seconds, independent of frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T: Lerp> {
    pub from: T,
    pub to: T,
    pub start_sec: f64,
    pub duration_sec: f64,
    pub ease: Ease,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start_sec: f64, duration_sec: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_sec,
            duration_sec,
            ease,
        }
    }

    /// Linear progress in \[0, 1\]. Zero-length tweens are complete immediately.
    pub fn progress(&self, now_sec: f64) -> f32 {
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        ((now_sec - self.start_sec) / self.duration_sec).clamp(0.0, 1.0) as f32
    }

    pub fn sample(&self, now_sec: f64) -> T {
        let p = self.ease.apply(self.progress(now_sec));
        self.from.lerp_to(self.to, p)
    }

    pub fn is_finished(&self, now_sec: f64) -> bool {
        self.progress(now_sec) >= 1.0
    }
}
