use glam::Vec3;

use crate::config::GameConfig;
use crate::input::MoveKey;

/// Translates directional keys into camera-relative character motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionMapper {
    pub speed: f32,
    pub boundary: f32,
}

impl Default for MotionMapper {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl MotionMapper {
    pub fn new(speed: f32, boundary: f32) -> Self {
        Self { speed, boundary }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.move_speed, config.boundary)
    }

    /// Unit movement direction on the ground plane, or zero when the keys
    /// cancel out or none are given.
    pub fn direction(keys: &[MoveKey], camera_forward: Vec3) -> Vec3 {
        let forward = ground_forward(camera_forward);
        let right = forward.cross(Vec3::Y);
        let sum = keys.iter().fold(Vec3::ZERO, |acc, key| {
            acc + match key {
                MoveKey::Forward => forward,
                MoveKey::Back => -forward,
                MoveKey::Right => right,
                MoveKey::Left => -right,
            }
        });
        sum.normalize_or_zero()
    }

    /// Position after pressing `keys` once, clamped to the ground plane.
    pub fn step(&self, position: Vec3, keys: &[MoveKey], camera_forward: Vec3) -> Vec3 {
        let moved = position + Self::direction(keys, camera_forward) * self.speed;
        self.clamp(moved)
    }

    /// Clamps both ground axes to `[-boundary, boundary]`; height is left alone.
    /// A negative or NaN boundary pins the axes to zero instead of panicking.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        let limit = if self.boundary >= 0.0 { self.boundary } else { 0.0 };
        Vec3::new(
            position.x.max(-limit).min(limit),
            position.y,
            position.z.max(-limit).min(limit),
        )
    }
}

fn ground_forward(camera_forward: Vec3) -> Vec3 {
    let flat = Vec3::new(camera_forward.x, 0.0, camera_forward.z).normalize_or_zero();
    if flat == Vec3::ZERO {
        Vec3::NEG_Z
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOOKING_NORTH: Vec3 = Vec3::new(0.0, -5.0, -7.0);

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn movement_is_camera_relative() {
        assert!(approx(
            MotionMapper::direction(&[MoveKey::Forward], LOOKING_NORTH),
            Vec3::NEG_Z
        ));
        assert!(approx(
            MotionMapper::direction(&[MoveKey::Right], LOOKING_NORTH),
            Vec3::X
        ));
        // Camera looking along +X turns "forward" into +X and "right" into +Z.
        assert!(approx(
            MotionMapper::direction(&[MoveKey::Right], Vec3::new(1.0, -1.0, 0.0)),
            Vec3::Z
        ));
    }

    #[test]
    fn opposing_keys_cancel() {
        let dir = MotionMapper::direction(&[MoveKey::Left, MoveKey::Right], LOOKING_NORTH);
        assert_eq!(dir, Vec3::ZERO);
        assert_eq!(MotionMapper::direction(&[], LOOKING_NORTH), Vec3::ZERO);
    }

    #[test]
    fn diagonal_is_normalized() {
        let dir = MotionMapper::direction(&[MoveKey::Forward, MoveKey::Right], LOOKING_NORTH);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn straight_down_camera_falls_back_to_north() {
        assert!(approx(
            MotionMapper::direction(&[MoveKey::Forward], Vec3::NEG_Y),
            Vec3::NEG_Z
        ));
    }

    #[test]
    fn bad_boundary_does_not_panic() {
        let start = Vec3::new(1.0, 0.5, -1.0);
        for boundary in [-1.0, f32::NAN] {
            let mapper = MotionMapper::new(0.1, boundary);
            let end = mapper.step(start, &[MoveKey::Right], LOOKING_NORTH);
            assert_eq!(end, Vec3::new(0.0, 0.5, 0.0));
        }
    }

    #[test]
    fn position_is_clamped_to_boundary() {
        let start = Vec3::new(4.4, 0.5, 0.0);
        for speed in [0.1, 0.5, 25.0] {
            let mapper = MotionMapper::new(speed, 4.5);
            let end = mapper.step(start, &[MoveKey::Right], LOOKING_NORTH);
            assert_eq!(end.x, 4.5);
            assert_eq!(end.y, 0.5);
        }
    }
}
