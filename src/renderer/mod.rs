//! Backend-agnostic rendering
//!
//! The scene pass walks the world once per frame and issues primitive draw
//! calls into a `RenderTarget`. Backends implement the trait; `VertexBatch`
//! is a ready-made target producing a triangle list.

pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::geometry::Rect;
use crate::sim::state::Color;

pub use scene::draw_scene;
pub use shapes::{TextLabel, VertexBatch};
pub use vertex::{Vertex, ball_color, colors, hsl};

/// Sink for 2D draw calls in screen space (y down)
pub trait RenderTarget {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: Color);
    fn polyline(&mut self, points: &[Vec2], width: f32, color: Color, closed: bool);
    /// Text centered on `pos`
    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color);
}
