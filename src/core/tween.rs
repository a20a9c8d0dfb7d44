use glam::Vec3;

/// Normalised progress of a linear animation, clamped to `[0, 1]`.
///
/// A non-positive duration completes immediately.
#[inline]
pub fn progress_ratio(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenState {
    Idle,
    Running {
        /// Latched on the first tick after `start`.
        start_ms: Option<f64>,
        duration_ms: f64,
        from: Vec3,
        to: Vec3,
    },
    Done,
}

/// Linear position animation driven by frame timestamps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    state: TweenState,
}

impl Default for Tween {
    fn default() -> Self {
        Self {
            state: TweenState::Idle,
        }
    }
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration_ms: f64) -> Self {
        let mut t = Self::default();
        t.start(from, to, duration_ms);
        t
    }

    pub fn start(&mut self, from: Vec3, to: Vec3, duration_ms: f64) {
        self.state = TweenState::Running {
            start_ms: None,
            duration_ms,
            from,
            to,
        };
    }

    pub fn cancel(&mut self) {
        self.state = TweenState::Idle;
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self.state, TweenState::Done)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, TweenState::Running { .. })
    }

    /// Advance to `now_ms` and return the interpolated value, or `None` when
    /// the tween is not running.
    pub fn tick(&mut self, now_ms: f64) -> Option<Vec3> {
        let TweenState::Running {
            start_ms,
            duration_ms,
            from,
            to,
        } = self.state
        else {
            return None;
        };
        let start = start_ms.unwrap_or(now_ms);
        let t = progress_ratio(now_ms - start, duration_ms);
        let value = if t >= 1.0 { to } else { from.lerp(to, t) };
        self.state = if t >= 1.0 {
            TweenState::Done
        } else {
            TweenState::Running {
                start_ms: Some(start),
                duration_ms,
                from,
                to,
            }
        };
        Some(value)
    }
}
