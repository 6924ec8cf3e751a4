//! Marble Race - a physics draw where numbered balls race down an obstacle course
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (balls, obstacles, collisions, world state)
//! - `course`: Fixed and randomized obstacle course generators
//! - `engine`: The `PhysicsEngine` facade a presentation loop drives
//! - `renderer`: Backend-agnostic draw pass and vertex tessellation
//! - `standings`: Finishing order of a run
//! - `settings`: Data-driven race and physics configuration

pub mod course;
pub mod engine;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod standings;

pub use course::{Course, CourseMode};
pub use engine::PhysicsEngine;
pub use settings::{PhysicsParams, Settings};
pub use standings::Standings;

/// Race configuration constants
pub mod consts {
    /// Default viewport dimensions
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Total scroll length of the course
    pub const WORLD_HEIGHT: f32 = 9000.0;

    /// Integration defaults (per frame, unit timestep)
    pub const GRAVITY: f32 = 0.5;
    pub const FRICTION: f32 = 0.99;
    pub const RESTITUTION: f32 = 0.55;
    /// Velocity kept by both balls after a ball-ball contact
    pub const BALL_PAIR_DAMPING: f32 = 0.9;

    /// Camera keeps the lead ball this far down the viewport (fraction of height)
    pub const CAMERA_LEAD: f32 = 0.6;
    /// Exponential easing factor toward the camera target
    pub const CAMERA_EASING: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 18.0;
    /// Initial velocity spread per axis (velocity drawn from [-SPREAD/2, SPREAD/2))
    pub const BALL_SPAWN_SPEED_SPREAD: f32 = 10.0;

    /// Clearance added around a gear's body for its teeth
    pub const GEAR_TOOTH_CLEARANCE: f32 = 10.0;
    /// Tangential kick multipliers (tuned by eye)
    pub const GEAR_KICK: f32 = 50.0;
    pub const ROTATOR_KICK: f32 = 25.0;
    /// Extra reach of a rotator's kick beyond its half length
    pub const ROTATOR_KICK_REACH: f32 = 10.0;

    /// Spring compression lost per tick
    pub const SPRING_DECAY: f32 = 0.1;

    /// Vibrator angular frequency (radians per frame)
    pub const VIBRATOR_FREQUENCY: f32 = 0.1;

    /// Distances below this are treated as coincident points
    pub const EPSILON: f32 = 1e-6;
}

/// Perpendicular of a vector (rotated +90° in screen space)
#[inline]
pub fn perp(v: glam::Vec2) -> glam::Vec2 {
    glam::Vec2::new(-v.y, v.x)
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> glam::Vec2 {
    glam::Vec2::new(theta.cos(), theta.sin())
}
