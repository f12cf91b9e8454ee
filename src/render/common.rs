use glam::{Mat4, Vec2, Vec3};

use crate::camera::CameraRig;
use crate::registry::{Entity, EntityKind};

/// Camera state consumed by renderers.
#[derive(Clone, Debug)]
pub struct CameraParams {
    pub view_proj: Mat4,
    pub position: Vec3,
}

impl CameraParams {
    pub fn from_rig(rig: &CameraRig, aspect: f32) -> Self {
        Self {
            view_proj: rig.view_proj(aspect),
            position: rig.position,
        }
    }
}

/// An entity flattened to screen space.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub id: String,
    pub kind: EntityKind,
    pub screen: Vec2,
    pub radius: f32,
    pub color: Vec3,
    pub depth: f32,
}

/// Projects a world point to pixel coordinates, or `None` when it falls
/// outside the view volume.
pub fn project_to_screen(view_proj: Mat4, point: Vec3, size: (u32, u32)) -> Option<Vec2> {
    let ndc = project_ndc(view_proj, point)?;
    if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
        return None;
    }
    Some(ndc_to_pixels(ndc, size))
}

/// Like [`project_to_screen`] but only rejects points behind the camera, so
/// polygons can extend past the canvas edge.
pub fn project_unclipped(view_proj: Mat4, point: Vec3, size: (u32, u32)) -> Option<Vec2> {
    project_ndc(view_proj, point).map(|ndc| ndc_to_pixels(ndc, size))
}

fn project_ndc(view_proj: Mat4, point: Vec3) -> Option<Vec3> {
    let clip = view_proj * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    Some(clip.truncate() / clip.w)
}

fn ndc_to_pixels(ndc: Vec3, size: (u32, u32)) -> Vec2 {
    let (width, height) = (size.0 as f32, size.1 as f32);
    Vec2::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height)
}

/// Active, visible entities back to front.
pub fn draw_list(entities: &[Entity], camera: &CameraParams, size: (u32, u32)) -> Vec<Sprite> {
    let mut sprites: Vec<Sprite> = entities
        .iter()
        .filter(|entity| entity.active && entity.visible)
        .filter_map(|entity| {
            let screen = project_to_screen(camera.view_proj, entity.position, size)?;
            let depth = camera.position.distance(entity.position);
            Some(Sprite {
                id: entity.id.clone(),
                kind: entity.kind,
                screen,
                radius: (size.1 as f32 * 0.25 / depth.max(0.5)).clamp(4.0, 80.0),
                color: entity.color,
                depth,
            })
        })
        .collect();
    sprites.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    sprites
}

/// CSS `rgb()` string for a colour in 0–1 space.
pub fn css_color(color: Vec3) -> String {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    format!("rgb({}, {}, {})", c.x as u8, c.y as u8, c.z as u8)
}
