//! Vertex type and palette for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::state::Color;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for course elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const GRID: [f32; 4] = [1.0, 1.0, 1.0, 0.05];
    pub const PROGRESS_FILL: [f32; 4] = [0.0, 1.0, 1.0, 0.3];

    pub const LAUNCHER_ON: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const LAUNCHER_OFF: [f32; 4] = [1.0, 0.67, 0.0, 1.0];
    pub const LAUNCHER_FILL: [f32; 4] = [0.13, 0.13, 0.0, 1.0];
    pub const TRAP: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const TRAP_FILL: [f32; 4] = [0.13, 0.0, 0.0, 1.0];
    pub const HOLE: [f32; 4] = [0.67, 0.0, 1.0, 1.0];
    pub const HOLE_FILL: [f32; 4] = [0.07, 0.0, 0.07, 1.0];
    pub const HOLE_SPIRAL: [f32; 4] = [0.63, 0.0, 1.0, 0.5];
    pub const GEAR: [f32; 4] = [1.0, 0.67, 0.0, 1.0];
    pub const GEAR_FILL: [f32; 4] = [0.2, 0.13, 0.0, 1.0];
    pub const GEAR_HUB: [f32; 4] = [0.4, 0.33, 0.27, 1.0];
    pub const BUMPER: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BUMPER_CORE: [f32; 4] = [0.0, 0.67, 0.0, 1.0];
    pub const BUMPER_EDGE: [f32; 4] = [0.0, 0.27, 0.0, 1.0];
    pub const SPRING: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const SPRING_FILL: [f32; 4] = [0.27, 0.27, 0.0, 1.0];
    pub const VIBRATOR: [f32; 4] = [1.0, 0.0, 0.67, 1.0];
    pub const VIBRATOR_FILL: [f32; 4] = [0.2, 0.0, 0.07, 1.0];
    pub const WIND: [f32; 4] = [0.4, 0.8, 1.0, 1.0];
    pub const FINISH: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
}

/// HSL to RGBA. Hue in degrees, saturation and lightness in [0, 1].
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m, 1.0]
}

pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Distinct display color for a ball number (golden-angle hue steps)
pub fn ball_color(number: u32) -> Color {
    hsl(number as f32 * 137.508, 0.75, 0.55)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl(0.0, 1.0, 0.5), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsl(120.0, 1.0, 0.5), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsl(240.0, 1.0, 0.5), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(hsl(360.0, 1.0, 0.5), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsl(0.0, 0.0, 1.0), colors::WHITE));
    }

    #[test]
    fn test_ball_colors_differ() {
        assert_ne!(ball_color(1), ball_color(2));
        for n in 1..50 {
            assert!(ball_color(n).iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_vertex_is_pod() {
        let vertices = [Vertex::new(1.0, 2.0, colors::CYAN)];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
