use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Camera that trails the character at a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 7.0),
            target: Vec3::ZERO,
            fov: 75.0,
        }
    }
}

impl CameraRig {
    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Moves the camera so it keeps its current offset from a new target.
    pub fn follow(&mut self, target: Vec3) {
        let offset = self.position - self.target;
        self.target = target;
        self.position = target + offset;
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        let projection =
            Mat4::perspective_rh_gl(self.fov.to_radians(), aspect.max(0.01), 0.1, 1000.0);
        projection * view
    }
}
