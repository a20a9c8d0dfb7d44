use std::cell::Cell;
use std::rc::Rc;

/// Shared on/off switch between the scene and the transition overlay.
///
/// Clones share one cell; everything runs on the page's event loop so no
/// synchronisation is involved.
#[derive(Clone, Debug, Default)]
pub struct TransitionSignal {
    active: Rc<Cell<bool>>,
}

impl TransitionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn activate(&self) {
        self.active.set(true);
    }

    #[inline]
    pub fn deactivate(&self) {
        self.active.set(false);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Time origin for the overlay shader.
///
/// The origin is latched on the first active frame and dropped on any
/// inactive frame, so every activation starts again at zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayClock {
    start_ms: Option<f64>,
}

impl OverlayClock {
    /// Elapsed seconds since activation, or `None` when nothing should draw.
    pub fn tick(&mut self, active: bool, now_ms: f64) -> Option<f32> {
        if !active {
            self.start_ms = None;
            return None;
        }
        let start = *self.start_ms.get_or_insert(now_ms);
        Some(((now_ms - start) * 0.001) as f32)
    }

    /// Frame gate for the overlay: the clock follows the signal either way,
    /// but nothing draws without a linked program.
    pub fn draw_time(&mut self, active: bool, has_program: bool, now_ms: f64) -> Option<f32> {
        let elapsed = self.tick(active, now_ms)?;
        has_program.then_some(elapsed)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.start_ms.is_some()
    }
}
