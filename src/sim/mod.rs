//! Frame-stepped simulation module
//!
//! All race physics lives here. The module is pure with respect to its inputs:
//! - Unit timestep per frame
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (obstacle list order, then ball index order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{reflect_velocity, resolve_ball_pair, resolve_obstacle};
pub use geometry::{Rect, closest_point_on_segment};
pub use rng::{RandomSource, SimRng};
pub use state::{
    Ball, BumperObstacle, CircleObstacle, GearObstacle, HoleObstacle, LauncherObstacle,
    LineObstacle, Obstacle, ObstacleKind, RotatorObstacle, SpringObstacle, TrapObstacle,
    VibratorObstacle, WindObstacle, WorldState,
};
pub use tick::tick;
