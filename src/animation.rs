use std::time::Duration;

pub const ANIMATION_DURATION: Duration = Duration::from_millis(1000);
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Cubic ease-out count-up from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    pub from: u64,
    pub to: u64,
    pub duration: Duration,
}

impl Tween {
    /// The count-up used after an increment: one below the target, up to it.
    pub fn count_up(target: u64) -> Self {
        Self {
            from: target.saturating_sub(1),
            to: target,
            duration: ANIMATION_DURATION,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, elapsed: Duration) -> u64 {
        let t = self.progress(elapsed);
        if t >= 1.0 {
            return self.to;
        }
        let eased = 1.0 - (1.0 - t).powi(3);
        let delta = self.to as f64 - self.from as f64;
        let value = (self.from as f64 + delta * eased).floor();
        value.max(0.0) as u64
    }

    /// Samples one value per frame until the duration has elapsed. The last
    /// frame is always exactly `to`.
    pub fn frames(&self, frame: Duration) -> Vec<u64> {
        let mut values = Vec::new();
        if frame.is_zero() {
            values.push(self.to);
            return values;
        }
        let mut elapsed = Duration::ZERO;
        while elapsed < self.duration {
            values.push(self.value_at(elapsed));
            elapsed += frame;
        }
        values.push(self.to);
        values
    }
}
