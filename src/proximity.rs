use glam::Vec3;

/// Returns `true` when `a` and `b` are strictly closer than `threshold`.
pub fn in_range(a: Vec3, b: Vec3, threshold: f32) -> bool {
    a.distance(b) < threshold
}
