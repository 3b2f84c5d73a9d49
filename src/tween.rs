/// Linear interpolation of a scalar over a fixed duration.
///
/// Driven by frame deltas rather than wall-clock callbacks, so a tween only
/// moves while the render loop is running.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    completed: bool,
}

/// Result of advancing a tween by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    pub value: f32,
    /// True only on the step that reaches the end value.
    pub just_completed: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            completed: false,
        }
    }

    pub fn value(&self) -> f32 {
        let t = if self.duration <= f32::EPSILON {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        self.from + (self.to - self.from) * t
    }

    pub fn advance(&mut self, dt: f32) -> TweenStep {
        if self.completed {
            return TweenStep { value: self.to, just_completed: false };
        }
        self.elapsed += dt.max(0.0);
        let just_completed = self.elapsed >= self.duration;
        if just_completed {
            self.completed = true;
        }
        TweenStep { value: self.value(), just_completed }
    }
}
