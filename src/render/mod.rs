pub mod common;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use common::{css_color, draw_list, project_to_screen, project_unclipped, CameraParams, Sprite};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
