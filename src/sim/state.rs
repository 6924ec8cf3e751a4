//! World state and core simulation types
//!
//! Everything the per-frame step mutates lives here: balls, the obstacle list,
//! the camera and the frame counter that drives every animation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::rng::RandomSource;
use crate::consts::*;
use crate::standings::Standings;
use crate::unit_from_angle;

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

/// A racing ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Label shown on the ball (1..N)
    pub number: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Set once the ball passes the bottom of the world; only `clear()` resets it
    #[serde(default)]
    pub finished: bool,
}

impl Ball {
    /// Ball at rest
    pub fn new(pos: Vec2, radius: f32, number: u32, color: Color) -> Self {
        Self {
            number,
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
            finished: false,
        }
    }

    /// Ball with a random initial velocity in [-5, 5) on each axis
    pub fn spawn(
        pos: Vec2,
        radius: f32,
        number: u32,
        color: Color,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let vel = Vec2::new(
            rng.jitter(BALL_SPAWN_SPEED_SPREAD),
            rng.jitter(BALL_SPAWN_SPEED_SPREAD),
        );
        Self::new(pos, radius, number, color).with_velocity(vel)
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Apply gravity and friction, then move by one unit timestep
    pub fn integrate(&mut self, gravity: f32, friction: f32) {
        self.vel.y += gravity;
        self.vel *= friction;
        self.pos += self.vel;
    }
}

/// Static disc with elastic deflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleObstacle {
    pub center: Vec2,
    pub radius: f32,
}

/// Static segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineObstacle {
    pub start: Vec2,
    pub end: Vec2,
}

/// Segment spinning about its midpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatorObstacle {
    pub center: Vec2,
    pub length: f32,
    /// Radians, advanced by `speed` every frame
    pub angle: f32,
    /// Radians per frame (sign gives direction)
    pub speed: f32,
}

impl RotatorObstacle {
    /// Current endpoints of the spinning bar
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let half = unit_from_angle(self.angle) * (self.length / 2.0);
        (self.center - half, self.center + half)
    }
}

/// Pad that throws any downward ball straight up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherObstacle {
    pub rect: Rect,
    pub force: f32,
}

/// Zone that sends a ball back up to `penalty_y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrapObstacle {
    pub center: Vec2,
    pub radius: f32,
    pub penalty_y: f32,
}

/// Zone that drops a ball further down to `teleport_y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleObstacle {
    pub center: Vec2,
    pub radius: f32,
    pub teleport_y: f32,
}

/// Toothed spinning disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearObstacle {
    pub center: Vec2,
    /// Body radius; teeth reach `GEAR_TOOTH_CLEARANCE` further
    pub radius: f32,
    pub teeth: u32,
    pub angle: f32,
    pub speed: f32,
}

impl GearObstacle {
    /// Radius the balls actually collide with
    #[inline]
    pub fn effective_radius(&self) -> f32 {
        self.radius + GEAR_TOOTH_CLEARANCE
    }
}

/// Powered disc that kicks balls away at a fixed speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BumperObstacle {
    pub center: Vec2,
    pub radius: f32,
    pub force: f32,
}

/// Pad that bounces downward balls up and shows a decaying compression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringObstacle {
    pub rect: Rect,
    pub force: f32,
    /// 1.0 right after a bounce, decays to 0.0
    #[serde(default)]
    pub compressed: f32,
}

/// Pad sliding side to side on a sine wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibratorObstacle {
    /// Rest position
    pub rect: Rect,
    pub amplitude: f32,
    pub phase: f32,
}

impl VibratorObstacle {
    /// Phase angle of the oscillation at `frame`
    #[inline]
    pub fn wave_angle(&self, frame: u64) -> f32 {
        frame as f32 * VIBRATOR_FREQUENCY + self.phase
    }

    /// Horizontal displacement from rest at `frame`
    pub fn offset_at(&self, frame: u64) -> f32 {
        self.wave_angle(frame).sin() * self.amplitude
    }

    /// Where the pad is at `frame`
    pub fn rect_at(&self, frame: u64) -> Rect {
        self.rect.shifted_x(self.offset_at(frame))
    }
}

/// Zone that pushes every ball inside it by a constant force per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindObstacle {
    pub rect: Rect,
    pub force: Vec2,
}

/// Obstacle kinds (closed set)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Obstacle {
    Circle(CircleObstacle),
    Line(LineObstacle),
    Rotator(RotatorObstacle),
    Launcher(LauncherObstacle),
    Trap(TrapObstacle),
    Hole(HoleObstacle),
    Gear(GearObstacle),
    Bumper(BumperObstacle),
    Spring(SpringObstacle),
    Vibrator(VibratorObstacle),
    Wind(WindObstacle),
}

/// Tag of an obstacle, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Circle,
    Line,
    Rotator,
    Launcher,
    Trap,
    Hole,
    Gear,
    Bumper,
    Spring,
    Vibrator,
    Wind,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Circle => "circle",
            ObstacleKind::Line => "line",
            ObstacleKind::Rotator => "rotator",
            ObstacleKind::Launcher => "launcher",
            ObstacleKind::Trap => "trap",
            ObstacleKind::Hole => "hole",
            ObstacleKind::Gear => "gear",
            ObstacleKind::Bumper => "bumper",
            ObstacleKind::Spring => "spring",
            ObstacleKind::Vibrator => "vibrator",
            ObstacleKind::Wind => "wind",
        }
    }
}

impl std::fmt::Display for ObstacleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Obstacle {
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Obstacle::Line(LineObstacle {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
        })
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Obstacle::Circle(CircleObstacle {
            center: Vec2::new(x, y),
            radius,
        })
    }

    pub fn bumper(x: f32, y: f32, radius: f32, force: f32) -> Self {
        Obstacle::Bumper(BumperObstacle {
            center: Vec2::new(x, y),
            radius,
            force,
        })
    }

    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Circle(_) => ObstacleKind::Circle,
            Obstacle::Line(_) => ObstacleKind::Line,
            Obstacle::Rotator(_) => ObstacleKind::Rotator,
            Obstacle::Launcher(_) => ObstacleKind::Launcher,
            Obstacle::Trap(_) => ObstacleKind::Trap,
            Obstacle::Hole(_) => ObstacleKind::Hole,
            Obstacle::Gear(_) => ObstacleKind::Gear,
            Obstacle::Bumper(_) => ObstacleKind::Bumper,
            Obstacle::Spring(_) => ObstacleKind::Spring,
            Obstacle::Vibrator(_) => ObstacleKind::Vibrator,
            Obstacle::Wind(_) => ObstacleKind::Wind,
        }
    }

    /// Vertical reference used for view culling (top edge for lines and zones)
    pub fn anchor_y(&self) -> f32 {
        match self {
            Obstacle::Line(l) => l.start.y.min(l.end.y),
            Obstacle::Circle(c) => c.center.y,
            Obstacle::Rotator(r) => r.center.y,
            Obstacle::Trap(t) => t.center.y,
            Obstacle::Hole(h) => h.center.y,
            Obstacle::Gear(g) => g.center.y,
            Obstacle::Bumper(b) => b.center.y,
            Obstacle::Launcher(l) => l.rect.top(),
            Obstacle::Spring(s) => s.rect.top(),
            Obstacle::Vibrator(v) => v.rect.top(),
            Obstacle::Wind(w) => w.rect.top(),
        }
    }

    /// Advance the obstacle's own animation by one frame
    ///
    /// Rotators and gears turn by their speed; springs relax toward rest.
    pub fn advance(&mut self) {
        match self {
            Obstacle::Rotator(r) => r.angle += r.speed,
            Obstacle::Gear(g) => g.angle += g.speed,
            Obstacle::Spring(s) => {
                if s.compressed > 0.0 {
                    s.compressed = (s.compressed - SPRING_DECAY).max(0.0);
                }
            }
            _ => {}
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Viewport (and world) width
    pub width: f32,
    /// Viewport height
    pub height: f32,
    /// Total scroll length; crossing it finishes a ball
    pub world_height: f32,
    /// Balls in spawn order (iteration order is part of the physics)
    pub balls: Vec<Ball>,
    /// Obstacles in resolution order
    pub obstacles: Vec<Obstacle>,
    /// Vertical scroll offset of the view
    pub camera_y: f32,
    /// Frames since the last reset; drives all animation
    pub frame_count: u64,
    /// Finishing order of this run
    pub standings: Standings,
}

impl WorldState {
    pub fn new(width: f32, height: f32, world_height: f32) -> Self {
        Self {
            width,
            height,
            world_height,
            balls: Vec::new(),
            obstacles: Vec::new(),
            camera_y: 0.0,
            frame_count: 0,
            standings: Standings::new(),
        }
    }

    /// First ball in list order that has finished
    pub fn goal_ball(&self) -> Option<&Ball> {
        self.balls.iter().find(|b| b.finished)
    }

    /// Drop all balls and rewind the clock; obstacles stay
    pub fn reset_run(&mut self) {
        self.balls.clear();
        self.camera_y = 0.0;
        self.frame_count = 0;
        self.standings = Standings::new();
    }
}
