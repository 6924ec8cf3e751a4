//! Per-frame scene pass
//!
//! Draw order: background and grid, obstacles near the view, the finish strip,
//! balls, then the HUD (progress bar and mode label). Every animation is driven
//! by the world's frame counter.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::RenderTarget;
use super::vertex::{colors, hsl, with_alpha};
use crate::course::CourseMode;
use crate::sim::geometry::Rect;
use crate::sim::state::{
    Ball, BumperObstacle, Color, GearObstacle, HoleObstacle, LauncherObstacle, SpringObstacle,
    TrapObstacle, VibratorObstacle, WindObstacle,
};
use crate::sim::{Obstacle, WorldState};

/// Obstacles this far outside the view are skipped
pub const CULL_MARGIN: f32 = 300.0;
/// Height of the checkered strip at the bottom of the world
pub const FINISH_STRIP_HEIGHT: f32 = 25.0;
const CHECKER_SIZE: f32 = 30.0;
const GRID_SPACING: f32 = 80.0;
const GEAR_TOOTH_HEIGHT: f32 = 15.0;

/// True if an obstacle anchored at `anchor_y` is close enough to the view to draw
pub fn in_view(anchor_y: f32, camera_y: f32, view_height: f32) -> bool {
    anchor_y >= camera_y - CULL_MARGIN && anchor_y <= camera_y + view_height + CULL_MARGIN
}

/// Draw one frame of the race
pub fn draw_scene(state: &WorldState, mode: CourseMode, target: &mut dyn RenderTarget) {
    draw_background(state, target);

    {
        let mut world = WorldView {
            target: &mut *target,
            dy: -state.camera_y,
        };
        for obstacle in &state.obstacles {
            if in_view(obstacle.anchor_y(), state.camera_y, state.height) {
                draw_obstacle(obstacle, state.frame_count, &mut world);
            }
        }
        draw_finish(state, &mut world);
        for ball in &state.balls {
            draw_ball(ball, &mut world);
        }
    }

    draw_hud(state, mode, target);
}

/// Shifts world coordinates into screen space
struct WorldView<'a> {
    target: &'a mut dyn RenderTarget,
    dy: f32,
}

impl WorldView<'_> {
    #[inline]
    fn at(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x, p.y + self.dy)
    }
}

impl RenderTarget for WorldView<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let moved = Rect {
            pos: self.at(rect.pos),
            size: rect.size,
        };
        self.target.fill_rect(moved, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let center = self.at(center);
        self.target.fill_circle(center, radius, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let center = self.at(center);
        self.target.stroke_circle(center, radius, width, color);
    }

    fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        let (a, b) = (self.at(a), self.at(b));
        self.target.line(a, b, width, color);
    }

    fn polyline(&mut self, points: &[Vec2], width: f32, color: Color, closed: bool) {
        let moved: Vec<Vec2> = points.iter().map(|p| self.at(*p)).collect();
        self.target.polyline(&moved, width, color, closed);
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
        let pos = self.at(pos);
        self.target.text(pos, text, size, color);
    }
}

fn stroke_rect(target: &mut dyn RenderTarget, rect: &Rect, width: f32, color: Color) {
    let corners = [
        rect.pos,
        Vec2::new(rect.right(), rect.top()),
        Vec2::new(rect.right(), rect.bottom()),
        Vec2::new(rect.left(), rect.bottom()),
    ];
    target.polyline(&corners, width, color, true);
}

/// Slowly cycling two-tone backdrop with a scrolling grid
fn draw_background(state: &WorldState, target: &mut dyn RenderTarget) {
    let (w, h) = (state.width, state.height);
    let hue = state.frame_count as f32 * 0.03 * 10.0;

    target.fill_rect(Rect::new(0.0, 0.0, w, h * 0.5), hsl(hue, 0.5, 0.15));
    target.fill_rect(Rect::new(0.0, h * 0.5, w, h * 0.5), hsl(hue + 60.0, 0.4, 0.08));

    let mut x = 0.0;
    while x < w {
        target.line(Vec2::new(x, 0.0), Vec2::new(x, h), 1.0, colors::GRID);
        x += GRID_SPACING;
    }

    if h > 0.0 {
        let scroll = (state.frame_count as f32 * 1.5) % GRID_SPACING;
        let mut y = 0.0;
        while y < h {
            let row = (y + scroll) % h;
            target.line(Vec2::new(0.0, row), Vec2::new(w, row), 1.0, colors::GRID);
            y += GRID_SPACING;
        }
    }
}

fn draw_obstacle(obstacle: &Obstacle, frame: u64, target: &mut dyn RenderTarget) {
    match obstacle {
        Obstacle::Line(l) => target.line(l.start, l.end, 4.0, colors::CYAN),
        Obstacle::Circle(c) => {
            target.fill_circle(c.center, c.radius, colors::BLACK);
            target.stroke_circle(c.center, c.radius, 3.0, colors::CYAN);
        }
        Obstacle::Rotator(r) => {
            let (a, b) = r.endpoints();
            target.line(a, b, 5.0, colors::MAGENTA);
            target.fill_circle(r.center, 10.0, colors::WHITE);
        }
        Obstacle::Launcher(l) => draw_launcher(l, frame, target),
        Obstacle::Trap(t) => draw_trap(t, target),
        Obstacle::Hole(h) => draw_hole(h, frame, target),
        Obstacle::Gear(g) => draw_gear(g, target),
        Obstacle::Bumper(b) => draw_bumper(b, frame, target),
        Obstacle::Spring(s) => draw_spring(s, target),
        Obstacle::Vibrator(v) => draw_vibrator(v, frame, target),
        Obstacle::Wind(w) => draw_wind(w, frame, target),
    }
}

fn draw_launcher(launcher: &LauncherObstacle, frame: u64, target: &mut dyn RenderTarget) {
    let flash = (frame / 5) % 2 == 0;
    let edge = if flash { colors::LAUNCHER_ON } else { colors::LAUNCHER_OFF };
    let rect = &launcher.rect;

    target.fill_rect(*rect, colors::LAUNCHER_FILL);
    stroke_rect(target, rect, 3.0, edge);
    target.text(
        Vec2::new(rect.center().x, rect.top() + 17.0),
        "JUMP!",
        14.0,
        colors::WHITE,
    );
}

fn draw_trap(trap: &TrapObstacle, target: &mut dyn RenderTarget) {
    let c = trap.center;
    target.fill_circle(c, trap.radius, colors::TRAP_FILL);
    target.stroke_circle(c, trap.radius, 3.0, colors::TRAP);
    target.line(c + Vec2::new(-8.0, -8.0), c + Vec2::new(8.0, 8.0), 3.0, colors::TRAP);
    target.line(c + Vec2::new(8.0, -8.0), c + Vec2::new(-8.0, 8.0), 3.0, colors::TRAP);
}

/// Pulsing disc with a turning spiral
fn draw_hole(hole: &HoleObstacle, frame: u64, target: &mut dyn RenderTarget) {
    let pulse = (frame as f32 * 0.1).sin() * 3.0;
    let radius = (hole.radius + pulse).max(0.0);
    target.fill_circle(hole.center, radius, colors::HOLE_FILL);
    target.stroke_circle(hole.center, radius, 3.0, colors::HOLE);

    let spin = frame as f32 * 0.05;
    let mut spiral = Vec::new();
    let mut a = 0.0_f32;
    while a < 2.0 * TAU {
        let r = a * 2.0;
        spiral.push(hole.center + Vec2::new((a + spin).cos(), (a + spin).sin()) * r);
        a += 0.2;
    }
    target.polyline(&spiral, 2.0, colors::HOLE_SPIRAL, false);
}

/// Toothed outline rotated by the gear's angle, with a hub
fn draw_gear(gear: &GearObstacle, target: &mut dyn RenderTarget) {
    let teeth = gear.teeth.max(1) as f32;
    let inner = gear.radius;
    let outer = gear.radius + GEAR_TOOTH_HEIGHT;
    let point = |fraction: f32, r: f32| {
        let theta = gear.angle + fraction / teeth * 2.0 * PI;
        gear.center + Vec2::new(theta.cos(), theta.sin()) * r
    };

    let mut outline = Vec::with_capacity(gear.teeth as usize * 4);
    for i in 0..gear.teeth.max(1) {
        let i = i as f32;
        outline.push(point(i, inner));
        outline.push(point(i + 0.3, outer));
        outline.push(point(i + 0.5, outer));
        outline.push(point(i + 0.8, inner));
    }

    target.fill_circle(gear.center, inner, colors::GEAR_FILL);
    target.polyline(&outline, 3.0, colors::GEAR, true);
    target.fill_circle(gear.center, 12.0, colors::GEAR_HUB);
    target.stroke_circle(gear.center, 12.0, 3.0, colors::GEAR);
}

fn draw_bumper(bumper: &BumperObstacle, frame: u64, target: &mut dyn RenderTarget) {
    let pulse = (frame as f32 * 0.15 + bumper.center.x).sin() * 2.0;
    let radius = (bumper.radius + pulse).max(0.0);
    target.fill_circle(bumper.center, radius, colors::BUMPER_EDGE);
    target.fill_circle(bumper.center, radius * 0.6, colors::BUMPER_CORE);
    target.stroke_circle(bumper.center, radius, 3.0, colors::BUMPER);
}

/// Pad pushed down by its compression, with five coils on top
fn draw_spring(spring: &SpringObstacle, target: &mut dyn RenderTarget) {
    let squash = spring.compressed * 5.0;
    let r = &spring.rect;
    let pad = Rect::new(r.left(), r.top() + squash, r.size.x, (r.size.y - squash).max(0.0));

    target.fill_rect(pad, colors::SPRING_FILL);
    stroke_rect(target, &pad, 3.0, colors::SPRING);

    for i in 0..5 {
        let x = r.left() + 10.0 + i as f32 * (r.size.x - 20.0) / 4.0;
        target.line(
            Vec2::new(x, pad.top()),
            Vec2::new(x, pad.top() - 8.0),
            3.0,
            colors::SPRING,
        );
    }
}

/// Pad at its current offset with arrowheads on both sides
fn draw_vibrator(vibrator: &VibratorObstacle, frame: u64, target: &mut dyn RenderTarget) {
    let rect = vibrator.rect_at(frame);
    target.fill_rect(rect, colors::VIBRATOR_FILL);
    stroke_rect(target, &rect, 3.0, colors::VIBRATOR);

    let mid = rect.top() + rect.size.y / 2.0;
    let left = [
        Vec2::new(rect.left() - 15.0, mid),
        Vec2::new(rect.left() - 5.0, rect.top()),
        Vec2::new(rect.left() - 5.0, rect.bottom()),
    ];
    let right = [
        Vec2::new(rect.right() + 15.0, mid),
        Vec2::new(rect.right() + 5.0, rect.top()),
        Vec2::new(rect.right() + 5.0, rect.bottom()),
    ];
    target.polyline(&left, 3.0, colors::VIBRATOR, true);
    target.polyline(&right, 3.0, colors::VIBRATOR, true);
}

/// Translucent zone with chevrons drifting in the wind direction
fn draw_wind(wind: &WindObstacle, frame: u64, target: &mut dyn RenderTarget) {
    let r = &wind.rect;
    target.fill_rect(*r, with_alpha(colors::WIND, 0.15));
    if r.size.y <= 0.0 {
        return;
    }

    let streak = with_alpha(colors::WIND, 0.6);
    for i in 0..8 {
        let x = r.left() + ((i % 4) as f32 + 0.5) * (r.size.x / 4.0);
        let travel = (frame as f32 * 3.0 + i as f32 * 50.0) % r.size.y;
        let y = r.bottom() - travel;
        let chevron = [
            Vec2::new(x - 5.0, y + 15.0),
            Vec2::new(x, y),
            Vec2::new(x + 5.0, y + 15.0),
        ];
        target.polyline(&chevron, 1.0, streak, false);
    }
}

/// Checkered strip at the bottom of the world
fn draw_finish(state: &WorldState, target: &mut dyn RenderTarget) {
    let top = state.world_height - FINISH_STRIP_HEIGHT;
    target.fill_rect(Rect::new(0.0, top, state.width, FINISH_STRIP_HEIGHT), colors::FINISH);

    let mut x = 0.0;
    let mut index = 0;
    while x < state.width {
        let color = if index % 2 == 0 { colors::BLACK } else { colors::WHITE };
        target.fill_rect(Rect::new(x, top, CHECKER_SIZE, FINISH_STRIP_HEIGHT), color);
        x += CHECKER_SIZE;
        index += 1;
    }

    target.text(
        Vec2::new(state.width / 2.0, state.world_height - 45.0),
        "FINISH",
        36.0,
        colors::FINISH,
    );
}

fn draw_ball(ball: &Ball, target: &mut dyn RenderTarget) {
    target.fill_circle(ball.pos, ball.radius, ball.color);
    target.stroke_circle(ball.pos, ball.radius, 2.0, colors::BLACK);
    target.text(ball.pos, &ball.number.to_string(), ball.radius, colors::WHITE);
}

/// Progress bar down the left edge and the mode label
fn draw_hud(state: &WorldState, mode: CourseMode, target: &mut dyn RenderTarget) {
    let scroll_range = state.world_height - state.height;
    let progress = if scroll_range > 0.0 {
        (state.camera_y / scroll_range).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let track = Rect::new(5.0, 50.0, 8.0, state.height - 100.0);

    target.fill_rect(
        Rect::new(track.left(), track.top(), track.size.x, track.size.y * progress),
        colors::PROGRESS_FILL,
    );
    stroke_rect(target, &track, 1.0, colors::CYAN);

    let label_color = match mode {
        CourseMode::Fixed => colors::CYAN,
        CourseMode::Random => colors::MAGENTA,
    };
    target.text(
        Vec2::new(20.0, 30.0),
        &format!("MODE {}", mode.number()),
        14.0,
        label_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::VertexBatch;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Rect(Rect, Color),
        Circle(Vec2, f32, Color),
        Ring(Vec2, f32, Color),
        Line(Vec2, Vec2, Color),
        Poly(Vec<Vec2>, Color),
        Text(Vec2, String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl RenderTarget for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.calls.push(Call::Rect(rect, color));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.calls.push(Call::Circle(center, radius, color));
        }
        fn stroke_circle(&mut self, center: Vec2, radius: f32, _width: f32, color: Color) {
            self.calls.push(Call::Ring(center, radius, color));
        }
        fn line(&mut self, a: Vec2, b: Vec2, _width: f32, color: Color) {
            self.calls.push(Call::Line(a, b, color));
        }
        fn polyline(&mut self, points: &[Vec2], _width: f32, color: Color, _closed: bool) {
            self.calls.push(Call::Poly(points.to_vec(), color));
        }
        fn text(&mut self, pos: Vec2, text: &str, _size: f32, _color: Color) {
            self.calls.push(Call::Text(pos, text.to_string()));
        }
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(_, t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    fn world() -> WorldState {
        WorldState::new(VIEW_WIDTH, VIEW_HEIGHT, WORLD_HEIGHT)
    }

    #[test]
    fn test_culling_margin() {
        assert!(in_view(0.0, 0.0, 600.0));
        assert!(in_view(-300.0, 0.0, 600.0));
        assert!(in_view(900.0, 0.0, 600.0));
        assert!(!in_view(901.0, 0.0, 600.0));
        assert!(!in_view(699.0, 1000.0, 600.0));
    }

    #[test]
    fn test_offscreen_obstacles_skipped() {
        let mut state = world();
        state.obstacles.push(Obstacle::bumper(400.0, 300.0, 18.0, 9.0));
        state.obstacles.push(Obstacle::bumper(200.0, 4000.0, 18.0, 9.0));

        let mut recorder = Recorder::default();
        draw_scene(&state, CourseMode::Fixed, &mut recorder);

        let bumper_rings: Vec<Vec2> = recorder
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Ring(center, _, color) if *color == colors::BUMPER => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(bumper_rings, vec![Vec2::new(400.0, 300.0)]);
    }

    #[test]
    fn test_world_items_follow_camera() {
        let mut state = world();
        state.camera_y = 800.0;
        state.balls.push(Ball::new(Vec2::new(250.0, 1000.0), 18.0, 3, [0.5, 0.2, 0.9, 1.0]));

        let mut recorder = Recorder::default();
        draw_scene(&state, CourseMode::Fixed, &mut recorder);

        assert!(recorder.calls.contains(&Call::Circle(
            Vec2::new(250.0, 200.0),
            18.0,
            [0.5, 0.2, 0.9, 1.0]
        )));
        assert!(recorder.calls.contains(&Call::Text(Vec2::new(250.0, 200.0), "3".to_string())));
    }

    #[test]
    fn test_hud_and_finish_labels() {
        let state = world();
        let mut recorder = Recorder::default();
        draw_scene(&state, CourseMode::Random, &mut recorder);

        let texts = recorder.texts();
        assert!(texts.contains(&"MODE 2"));
        assert!(texts.contains(&"FINISH"));
    }

    #[test]
    fn test_finish_strip_is_checkered() {
        let mut state = world();
        state.camera_y = WORLD_HEIGHT - VIEW_HEIGHT;
        let mut recorder = Recorder::default();
        draw_scene(&state, CourseMode::Fixed, &mut recorder);

        let strip_top = VIEW_HEIGHT - FINISH_STRIP_HEIGHT;
        let checkers: Vec<Color> = recorder
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Rect(r, color) if r.pos.y == strip_top && r.size.x == CHECKER_SIZE => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(checkers.len(), (VIEW_WIDTH / CHECKER_SIZE).ceil() as usize);
        assert_eq!(checkers[0], colors::BLACK);
        assert_eq!(checkers[1], colors::WHITE);
    }

    #[test]
    fn test_spring_drawn_compressed() {
        let mut state = world();
        state.obstacles.push(Obstacle::Spring(SpringObstacle {
            rect: Rect::new(100.0, 200.0, 70.0, 14.0),
            force: 14.0,
            compressed: 1.0,
        }));
        let mut recorder = Recorder::default();
        draw_scene(&state, CourseMode::Fixed, &mut recorder);

        assert!(recorder
            .calls
            .contains(&Call::Rect(Rect::new(100.0, 205.0, 70.0, 9.0), colors::SPRING_FILL)));
    }

    #[test]
    fn test_full_course_tessellates() {
        let mut engine = crate::PhysicsEngine::with_seed(VIEW_WIDTH, VIEW_HEIGHT, CourseMode::Fixed, 8);
        engine.spawn_balls(4, BALL_RADIUS);
        for _ in 0..30 {
            engine.update();
        }

        let mut batch = VertexBatch::new();
        engine.draw(&mut batch);
        assert!(batch.triangle_count() > 0);
        assert_eq!(batch.vertices.len() % 3, 0);
        assert!(batch.labels.iter().any(|l| l.text == "1"));
        assert!(batch.vertices.iter().all(|v| v.position[0].is_finite() && v.position[1].is_finite()));
    }
}
