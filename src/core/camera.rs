// Perspective camera used by the scene renderer and the orbit controller.
//
// Right-handed, Y-up. The projection uses the wgpu depth range (0..1).

use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees,
            aspect,
            near,
            far,
        }
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    #[inline]
    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera-space +X expressed in world space.
    pub fn right(&self) -> Vec3 {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        if right == Vec3::ZERO {
            Vec3::X
        } else {
            right
        }
    }

    /// Camera-space +Y expressed in world space.
    pub fn up_vector(&self) -> Vec3 {
        let forward = (self.target - self.position).normalize_or_zero();
        let up = self.right().cross(forward).normalize_or_zero();
        if up == Vec3::ZERO {
            Vec3::Y
        } else {
            up
        }
    }
}
