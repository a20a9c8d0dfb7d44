// Damped orbit controller.
//
// Pointer handlers accumulate rotation, dolly and pan requests; `update`
// applies a fraction of them every frame (damping), clamps the polar angle
// and distance, and writes the camera position. The camera always looks at
// `target`.

use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR, ORBIT_MIN_DISTANCE,
    ORBIT_MIN_POLAR, ORBIT_PAN_SPEED, ORBIT_ROTATE_SPEED, ORBIT_WHEEL_STEP, ORBIT_ZOOM_SPEED,
};
use crate::core::camera::PerspectiveCamera;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

/// Spherical coordinates around the Y axis: `phi` from +Y, `theta` from +Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }

    /// Keep phi away from the poles so the basis never degenerates.
    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

/// Which gesture a pointer drag is driving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Dolly,
    Pan,
}

/// Pick a drag mode from the DOM `button` value and modifier state.
#[inline]
pub fn drag_mode_for_button(button: i16, pan_modifier: bool) -> Option<DragMode> {
    match button {
        0 if pan_modifier => Some(DragMode::Pan),
        0 => Some(DragMode::Rotate),
        1 => Some(DragMode::Dolly),
        2 => Some(DragMode::Pan),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    pub(crate) spherical_delta: Spherical,
    pub(crate) scale: f32,
    pub(crate) pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            enable_zoom: true,
            enable_pan: true,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar_angle: ORBIT_MIN_POLAR,
            max_polar_angle: ORBIT_MAX_POLAR,
            spherical_delta: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Drag rotation: a full-height drag turns the camera one revolution.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, client_height: f32) {
        let h = client_height.max(1.0);
        self.rotate_left(TAU * dx / h * self.rotate_speed);
        self.rotate_up(TAU * dy / h * self.rotate_speed);
    }

    pub fn dolly_in(&mut self, dolly_scale: f32) {
        if self.enable_zoom {
            self.scale *= dolly_scale;
        }
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        if self.enable_zoom {
            self.scale /= dolly_scale;
        }
    }

    #[inline]
    pub fn zoom_scale(&self) -> f32 {
        ORBIT_WHEEL_STEP.powf(self.zoom_speed)
    }

    /// Wheel zoom: negative `delta_y` (wheel up) moves closer.
    pub fn zoom_by_wheel(&mut self, delta_y: f32) {
        let s = self.zoom_scale();
        if delta_y < 0.0 {
            self.dolly_in(s);
        } else if delta_y > 0.0 {
            self.dolly_out(s);
        }
    }

    /// Middle-button drag: dragging down moves away.
    pub fn dolly_by_pixels(&mut self, dy: f32) {
        let s = self.zoom_scale();
        if dy > 0.0 {
            self.dolly_out(s);
        } else if dy < 0.0 {
            self.dolly_in(s);
        }
    }

    /// Screen-space pan scaled so the target follows the pointer at the
    /// target's depth.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, client_height: f32, camera: &PerspectiveCamera) {
        if !self.enable_pan {
            return;
        }
        let h = client_height.max(1.0);
        let distance = (camera.position - self.target).length()
            * (camera.fov_y_radians() / 2.0).tan();
        let left = 2.0 * dx * distance / h * self.pan_speed;
        let up = 2.0 * dy * distance / h * self.pan_speed;
        self.pan_offset += camera.right() * -left;
        self.pan_offset += camera.up_vector() * up;
    }

    /// Apply pending input to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        if self.enable_damping {
            spherical.theta += self.spherical_delta.theta * self.damping_factor;
            spherical.phi += self.spherical_delta.phi * self.damping_factor;
        } else {
            spherical.theta += self.spherical_delta.theta;
            spherical.phi += self.spherical_delta.phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle);
        spherical.make_safe();
        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= keep;
            self.spherical_delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        before.distance_squared(camera.position) > EPS
    }

    /// Keep the look-at target inside an axis-aligned box.
    pub fn clamp_target(&mut self, min: Vec3, max: Vec3) {
        self.target = self.target.clamp(min, max);
    }
}
