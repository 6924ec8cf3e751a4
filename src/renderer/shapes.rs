//! Shape generation for 2D primitives
//!
//! `VertexBatch` turns draw calls into a flat triangle list ready for upload.

use glam::Vec2;
use std::f32::consts::PI;

use super::RenderTarget;
use super::vertex::Vertex;
use crate::sim::geometry::Rect;
use crate::sim::state::Color;

/// Segment count giving smooth edges at the given radius
pub fn segments_for(radius: f32) -> u32 {
    (radius * 0.8).clamp(12.0, 48.0) as u32
}

/// Point on a circle
#[inline]
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    Vec2::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
}

fn push_quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = on_circle(center, radius, theta1);
        let p2 = on_circle(center, radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: Color,
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = on_circle(center, inner_radius, theta1);
        let outer1 = on_circle(center, outer_radius, theta1);
        let inner2 = on_circle(center, inner_radius, theta2);
        let outer2 = on_circle(center, outer_radius, theta2);

        push_quad(&mut vertices, inner1, outer1, inner2, outer2, color);
    }

    vertices
}

/// Generate vertices for a line segment of the given width
pub fn thick_line(a: Vec2, b: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let side = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, a + side, a - side, b + side, b - side, color);
    vertices
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(rect: &Rect, color: Color) -> Vec<Vertex> {
    let tl = rect.pos;
    let tr = Vec2::new(rect.right(), rect.top());
    let bl = Vec2::new(rect.left(), rect.bottom());
    let br = Vec2::new(rect.right(), rect.bottom());

    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, tl, bl, tr, br, color);
    vertices
}

/// A text draw call; glyph rendering is left to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// Center of the text
    pub pos: Vec2,
    pub text: String,
    pub size: f32,
    pub color: Color,
}

/// Render target that tessellates everything into one triangle list
#[derive(Debug, Default)]
pub struct VertexBatch {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's geometry, keeping the allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl RenderTarget for VertexBatch {
    fn fill_rect(&mut self, area: Rect, color: Color) {
        self.vertices.extend(rect(&area, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(circle(center, radius, color, segments_for(radius)));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let half = width * 0.5;
        self.vertices.extend(ring(
            center,
            (radius - half).max(0.0),
            radius + half,
            color,
            segments_for(radius),
        ));
    }

    fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        self.vertices.extend(thick_line(a, b, width, color));
    }

    fn polyline(&mut self, points: &[Vec2], width: f32, color: Color, closed: bool) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], width, color);
        }
        if closed && points.len() > 2 {
            self.line(points[points.len() - 1], points[0], width, color);
        }
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
        self.labels.push(TextLabel {
            pos,
            text: text.to_string(),
            size,
            color,
        });
    }
}
