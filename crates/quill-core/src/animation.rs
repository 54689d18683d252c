//! Time-eased values.
//!
//! An [`AnimatedValue`] separates intent (the target) from presentation (the
//! value sampled at an instant). Driver state machines only ever set targets;
//! whoever renders samples the value. Retargeting mid-flight starts the new
//! tween from wherever the old one currently is, so the last request wins
//! without a visible jump.

use std::{ops::Sub, time::Duration};

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, slow finish (cubic).
    EaseOut,
    /// Slow start and finish (cubic).
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map progress `t` in `[0, 1]` onto the curve. Out-of-range input is
    /// clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            },
        }
    }
}

/// Timing shared by every tween a driver starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Time to travel the full distance.
    pub duration: Duration,
    /// Curve.
    pub easing: Easing,
}

impl AnimationConfig {
    /// Default tween length.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

    /// Config that settles every tween immediately.
    pub fn instant() -> Self {
        Self { duration: Duration::ZERO, easing: Easing::Linear }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration: Self::DEFAULT_DURATION, easing: Easing::default() }
    }
}

/// A value easing toward a target over time.
///
/// Generic over the instant type so simulation can drive it with virtual time.
#[derive(Debug, Clone)]
pub struct AnimatedValue<I> {
    from: f32,
    to: f32,
    /// Start of the current tween. `None` when settled.
    started: Option<I>,
    config: AnimationConfig,
}

impl<I> AnimatedValue<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create a settled value.
    pub fn new(value: f32, config: AnimationConfig) -> Self {
        Self { from: value, to: value, started: None, config }
    }

    /// Where the value is heading.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Sample the value at `now`.
    pub fn value_at(&self, now: I) -> f32 {
        let Some(started) = self.started else {
            return self.to;
        };
        if now <= started {
            return self.from;
        }

        let elapsed = now - started;
        let duration = self.config.duration;
        if duration.is_zero() || elapsed >= duration {
            return self.to;
        }

        let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
        self.from + (self.to - self.from) * self.config.easing.apply(progress)
    }

    /// True once the value has reached its target at `now`.
    pub fn is_settled(&self, now: I) -> bool {
        match self.started {
            None => true,
            Some(started) => now > started && now - started >= self.config.duration,
        }
    }

    /// Start easing toward `target` from the value sampled at `now`.
    ///
    /// Re-requesting the current target leaves an in-flight tween untouched.
    pub fn animate_to(&mut self, target: f32, now: I) {
        if target == self.to {
            return;
        }

        let current = self.value_at(now);
        tracing::trace!(from = current, to = target, "retarget");
        self.from = current;
        self.to = target;
        self.started =
            if current == target || self.config.duration.is_zero() { None } else { Some(now) };
        if self.started.is_none() {
            self.from = target;
        }
    }

    /// Jump to `value` without a tween.
    pub fn snap_to(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.started = None;
    }
}
