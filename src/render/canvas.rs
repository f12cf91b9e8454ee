use std::f64::consts::TAU;

use anyhow::{anyhow, Result};
use glam::Vec3;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::registry::Entity;

use super::common::{css_color, draw_list, project_unclipped, CameraParams};

/// Draws the world onto a 2D canvas by projecting entity positions.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    boundary: f32,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, boundary: f32) -> Result<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|err| anyhow!("failed to query canvas context: {err:?}"))?
            .ok_or_else(|| anyhow!("canvas does not support 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("failed to cast canvas context"))?;
        Ok(Self {
            canvas,
            context,
            boundary,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width().max(1), self.canvas.height().max(1))
    }

    pub fn aspect(&self) -> f32 {
        let (width, height) = self.size();
        width as f32 / height as f32
    }

    pub fn render(&self, entities: &[Entity], camera: &CameraParams) -> Result<(), JsValue> {
        let size = self.size();
        self.context.set_fill_style_str("#87ceeb");
        self.context
            .fill_rect(0.0, 0.0, size.0 as f64, size.1 as f64);
        self.draw_ground(camera, size);

        for sprite in draw_list(entities, camera, size) {
            self.context.set_fill_style_str(&css_color(sprite.color));
            self.context.begin_path();
            self.context.arc(
                sprite.screen.x as f64,
                sprite.screen.y as f64,
                sprite.radius as f64,
                0.0,
                TAU,
            )?;
            self.context.fill();
        }
        Ok(())
    }

    fn draw_ground(&self, camera: &CameraParams, size: (u32, u32)) {
        let b = self.boundary;
        let corners = [
            Vec3::new(-b, 0.0, -b),
            Vec3::new(b, 0.0, -b),
            Vec3::new(b, 0.0, b),
            Vec3::new(-b, 0.0, b),
        ];
        let projected: Option<Vec<_>> = corners
            .iter()
            .map(|corner| project_unclipped(camera.view_proj, *corner, size))
            .collect();
        let Some(points) = projected else {
            return;
        };
        self.context.set_fill_style_str("#3cb371");
        self.context.begin_path();
        for (index, point) in points.iter().enumerate() {
            if index == 0 {
                self.context.move_to(point.x as f64, point.y as f64);
            } else {
                self.context.line_to(point.x as f64, point.y as f64);
            }
        }
        self.context.close_path();
        self.context.fill();
    }
}
