// Scripted camera fly-through triggered by the confirm key.
//
// Approach (linear move to a fixed framing) chains into Dolly (straight push
// along -Z with X/Y held), then the transition is revealed and, after a hold,
// the page navigates away. `reset` drops whatever phase is in flight,
// including a pending navigation; confirm during the hold is ignored.

use crate::constants::{
    APPROACH_DURATION_MS, APPROACH_TARGET, DOLLY_DURATION_MS, DOLLY_END_Z,
    HOLD_BEFORE_NAVIGATE_MS,
};
use crate::core::tween::Tween;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SequencePhase {
    Idle,
    Approach(Tween),
    Dolly(Tween),
    Hold { since_ms: f64 },
    Finished,
}

/// Side effects the frame loop performs on behalf of the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceEvent {
    /// Show the red overlay and switch the transition signal on.
    Reveal,
    /// Switch the transition signal off and leave the page.
    Navigate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SequenceStep {
    pub position: Option<Vec3>,
    pub event: Option<SequenceEvent>,
}

#[derive(Clone, Debug)]
pub struct CameraSequence {
    phase: SequencePhase,
}

impl Default for CameraSequence {
    fn default() -> Self {
        Self {
            phase: SequencePhase::Idle,
        }
    }
}

impl CameraSequence {
    #[inline]
    pub fn phase(&self) -> &SequencePhase {
        &self.phase
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, SequencePhase::Idle | SequencePhase::Finished)
    }

    /// Start (or restart) the fly-through from `current`. Ignored once the
    /// transition is revealed; only `reset` cancels a pending navigation.
    /// Returns whether a new approach started.
    pub fn confirm(&mut self, current: Vec3) -> bool {
        if matches!(self.phase, SequencePhase::Hold { .. }) {
            return false;
        }
        self.phase =
            SequencePhase::Approach(Tween::new(current, APPROACH_TARGET, APPROACH_DURATION_MS));
        true
    }

    pub fn reset(&mut self) {
        self.phase = SequencePhase::Idle;
    }

    pub fn tick(&mut self, now_ms: f64) -> SequenceStep {
        match &mut self.phase {
            SequencePhase::Idle | SequencePhase::Finished => SequenceStep::default(),
            SequencePhase::Approach(tween) => {
                let position = tween.tick(now_ms);
                if tween.is_done() {
                    let dolly_end = Vec3::new(APPROACH_TARGET.x, APPROACH_TARGET.y, DOLLY_END_Z);
                    self.phase = SequencePhase::Dolly(Tween::new(
                        APPROACH_TARGET,
                        dolly_end,
                        DOLLY_DURATION_MS,
                    ));
                }
                SequenceStep {
                    position,
                    event: None,
                }
            }
            SequencePhase::Dolly(tween) => {
                let position = tween.tick(now_ms);
                let mut event = None;
                if tween.is_done() {
                    self.phase = SequencePhase::Hold { since_ms: now_ms };
                    event = Some(SequenceEvent::Reveal);
                }
                SequenceStep { position, event }
            }
            SequencePhase::Hold { since_ms } => {
                if now_ms - *since_ms >= HOLD_BEFORE_NAVIGATE_MS {
                    self.phase = SequencePhase::Finished;
                    SequenceStep {
                        position: None,
                        event: Some(SequenceEvent::Navigate),
                    }
                } else {
                    SequenceStep::default()
                }
            }
        }
    }
}
