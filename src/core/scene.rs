// Platform-free scene state: the camera, its orbit controller and the
// scripted sequence, plus the rules tying them to the transition signal.
//
// The web layer owns DOM side effects; everything here can run on the host.

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_HOME, CAMERA_NEAR, PAN_MAX, PAN_MIN,
};
use crate::core::camera::PerspectiveCamera;
use crate::core::keys::KeyAction;
use crate::core::orbit::OrbitControls;
use crate::core::sequence::{CameraSequence, SequenceEvent};
use crate::core::signal::TransitionSignal;

#[derive(Clone, Debug)]
pub struct SceneState {
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub sequence: CameraSequence,
}

impl SceneState {
    pub fn new(aspect: f32) -> Self {
        let mut camera = PerspectiveCamera::new(CAMERA_FOV_Y_DEG, aspect, CAMERA_NEAR, CAMERA_FAR);
        camera.position = CAMERA_HOME;
        let controls = OrbitControls::default();
        camera.look_at(controls.target);
        Self {
            camera,
            controls,
            sequence: CameraSequence::default(),
        }
    }

    pub fn resize(&mut self, css_width: f32, css_height: f32) {
        self.camera.set_aspect(css_width, css_height);
    }

    /// Returns false when the key was ignored.
    pub fn handle_key(&mut self, action: KeyAction, signal: &TransitionSignal) -> bool {
        match action {
            KeyAction::Reset => {
                self.reset(signal);
                true
            }
            KeyAction::Confirm => self.sequence.confirm(self.camera.position),
        }
    }

    /// Snap home and drop any running or pending transition.
    pub fn reset(&mut self, signal: &TransitionSignal) {
        self.camera.position = CAMERA_HOME;
        self.sequence.reset();
        signal.deactivate();
    }

    /// One frame: sequence first, then the controller, then the pan clamp.
    /// Returns the sequence event the caller must act on, if any.
    pub fn advance(&mut self, now_ms: f64, signal: &TransitionSignal) -> Option<SequenceEvent> {
        let step = self.sequence.tick(now_ms);
        if let Some(p) = step.position {
            self.camera.position = p;
        }
        match step.event {
            Some(SequenceEvent::Reveal) => signal.activate(),
            Some(SequenceEvent::Navigate) => signal.deactivate(),
            None => {}
        }
        self.controls.update(&mut self.camera);
        self.controls.clamp_target(PAN_MIN, PAN_MAX);
        step.event
    }
}
