//! Collision detection and response between balls and obstacles
//!
//! Every geometric resolver follows the same shape: detect overlap, push the
//! ball out along the contact normal, then apply the kind's velocity response
//! (reflect, override, replace vertical speed, add force, or teleport).

use glam::Vec2;

use super::geometry::closest_point_on_segment;
use super::rng::RandomSource;
use super::state::{
    Ball, BumperObstacle, CircleObstacle, GearObstacle, HoleObstacle, LauncherObstacle,
    Obstacle, RotatorObstacle, SpringObstacle, TrapObstacle, VibratorObstacle, WindObstacle,
};
use crate::consts::*;
use crate::{perp, unit_from_angle};

/// Per-frame values the resolvers need from the world
#[derive(Debug, Clone, Copy)]
pub struct ContactParams {
    pub restitution: f32,
    /// World width (traps recenter balls on it)
    pub width: f32,
    /// Current frame counter
    pub frame: u64,
}

/// Reflect velocity off a surface, keeping `restitution` of the bounce
///
/// v' = v - 2(v·n)n·restitution
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal * restitution
}

/// Resolve one ball against one obstacle. Returns true on contact.
pub fn resolve_obstacle(
    ball: &mut Ball,
    obstacle: &mut Obstacle,
    params: &ContactParams,
    rng: &mut dyn RandomSource,
) -> bool {
    match obstacle {
        Obstacle::Circle(c) => resolve_circle(ball, c, params.restitution),
        Obstacle::Line(l) => resolve_segment(ball, l.start, l.end, params.restitution),
        Obstacle::Rotator(r) => resolve_rotator(ball, r, params.restitution),
        Obstacle::Launcher(l) => resolve_launcher(ball, l),
        Obstacle::Trap(t) => resolve_trap(ball, t, params.width, rng),
        Obstacle::Hole(h) => resolve_hole(ball, h, rng),
        Obstacle::Gear(g) => resolve_gear(ball, g, params.restitution),
        Obstacle::Bumper(b) => resolve_bumper(ball, b),
        Obstacle::Spring(s) => resolve_spring(ball, s),
        Obstacle::Vibrator(v) => resolve_vibrator(ball, v, params.frame),
        Obstacle::Wind(w) => resolve_wind(ball, w),
    }
}

/// Normalized contact offset, straight up when the centers coincide
fn contact_normal(offset: Vec2, dist: f32) -> Vec2 {
    if dist > EPSILON { offset / dist } else { Vec2::NEG_Y }
}

pub fn resolve_circle(ball: &mut Ball, circle: &CircleObstacle, restitution: f32) -> bool {
    let offset = ball.pos - circle.center;
    let dist = offset.length();
    let min_dist = ball.radius + circle.radius;
    if dist >= min_dist {
        return false;
    }

    let normal = contact_normal(offset, dist);
    ball.pos += normal * (min_dist - dist);
    ball.vel = reflect_velocity(ball.vel, normal, restitution);
    true
}

/// Deflect off the nearest point of segment `start`-`end`
pub fn resolve_segment(ball: &mut Ball, start: Vec2, end: Vec2, restitution: f32) -> bool {
    let closest = closest_point_on_segment(ball.pos, start, end);
    let offset = ball.pos - closest;
    let dist = offset.length();
    if dist >= ball.radius {
        return false;
    }

    let normal = if dist > EPSILON {
        offset / dist
    } else {
        // Center sits on the segment: push out on the upper side
        let n = perp(end - start).normalize_or_zero();
        if n == Vec2::ZERO {
            Vec2::NEG_Y
        } else if n.y > 0.0 {
            -n
        } else {
            n
        }
    };

    ball.pos += normal * (ball.radius - dist);
    ball.vel = reflect_velocity(ball.vel, normal, restitution);
    true
}

pub fn resolve_rotator(ball: &mut Ball, rotator: &RotatorObstacle, restitution: f32) -> bool {
    let (a, b) = rotator.endpoints();
    let hit = resolve_segment(ball, a, b, restitution);

    // Anything close to the spinning bar gets swept along with it
    let reach = rotator.length / 2.0 + ball.radius + ROTATOR_KICK_REACH;
    if ball.pos.distance(rotator.center) < reach {
        ball.vel += perp(unit_from_angle(rotator.angle)) * rotator.speed * ROTATOR_KICK;
    }
    hit
}

pub fn resolve_gear(ball: &mut Ball, gear: &GearObstacle, restitution: f32) -> bool {
    let offset = ball.pos - gear.center;
    let dist = offset.length();
    let reach = gear.effective_radius() + ball.radius;
    if dist >= reach {
        return false;
    }

    let normal = contact_normal(offset, dist);
    let approach = normal.y.atan2(normal.x);
    let tooth_angle = (gear.teeth as f32 * (approach - gear.angle)) % std::f32::consts::TAU;
    let tooth = tooth_angle.sin() * 0.5 + 0.5;

    ball.pos += normal * (reach - dist);
    ball.vel += perp(normal) * gear.speed * GEAR_KICK * tooth;
    ball.vel = reflect_velocity(ball.vel, normal, restitution);
    true
}

/// Bumpers replace the velocity outright: speed after contact is always `force`
pub fn resolve_bumper(ball: &mut Ball, bumper: &BumperObstacle) -> bool {
    let offset = ball.pos - bumper.center;
    let dist = offset.length();
    let min_dist = ball.radius + bumper.radius;
    if dist >= min_dist {
        return false;
    }

    let normal = contact_normal(offset, dist);
    ball.pos = bumper.center + normal * min_dist;
    ball.vel = normal * bumper.force;
    true
}

pub fn resolve_launcher(ball: &mut Ball, launcher: &LauncherObstacle) -> bool {
    if !launcher.rect.touches_ball(ball.pos, ball.radius) || ball.vel.y <= 0.0 {
        return false;
    }
    ball.vel.y = -launcher.force;
    ball.pos.y = launcher.rect.top() - ball.radius - 2.0;
    true
}

pub fn resolve_spring(ball: &mut Ball, spring: &mut SpringObstacle) -> bool {
    if !spring.rect.touches_ball(ball.pos, ball.radius) || ball.vel.y <= 0.0 {
        return false;
    }
    ball.vel.y = -spring.force;
    ball.pos.y = spring.rect.top() - ball.radius - 2.0;
    spring.compressed = 1.0;
    true
}

pub fn resolve_vibrator(ball: &mut Ball, vibrator: &VibratorObstacle, frame: u64) -> bool {
    let rect = vibrator.rect_at(frame);
    if !rect.touches_ball(ball.pos, ball.radius) {
        return false;
    }
    ball.pos.y = rect.top() - ball.radius - 1.0;
    ball.vel.y *= -0.5;
    ball.vel.x += vibrator.wave_angle(frame).cos() * 2.0;
    true
}

pub fn resolve_wind(ball: &mut Ball, wind: &WindObstacle) -> bool {
    if !wind.rect.contains(ball.pos) {
        return false;
    }
    ball.vel += wind.force;
    true
}

/// Drop the ball deeper into the course, keeping part of its fall speed
pub fn resolve_hole(ball: &mut Ball, hole: &HoleObstacle, rng: &mut dyn RandomSource) -> bool {
    if ball.pos.distance(hole.center) >= hole.radius - 5.0 {
        return false;
    }
    ball.pos.y = hole.teleport_y;
    ball.pos.x = hole.center.x + rng.jitter(50.0);
    ball.vel.y = ball.vel.y.abs() * 0.5 + 3.0;
    ball.vel.x = rng.jitter(5.0);
    true
}

/// Send the ball back to the penalty height, recentered
pub fn resolve_trap(
    ball: &mut Ball,
    trap: &TrapObstacle,
    width: f32,
    rng: &mut dyn RandomSource,
) -> bool {
    if ball.pos.distance(trap.center) >= trap.radius {
        return false;
    }
    ball.pos.y = trap.penalty_y;
    ball.pos.x = width / 2.0 + rng.jitter(100.0);
    ball.vel.y = 0.0;
    ball.vel.x = rng.jitter(3.0);
    true
}

/// Keep the ball inside [r, width - r], bouncing off the side
pub fn clamp_to_bounds(ball: &mut Ball, width: f32, restitution: f32) {
    if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x *= -restitution;
    }
    if ball.pos.x + ball.radius > width {
        ball.pos.x = width - ball.radius;
        ball.vel.x *= -restitution;
    }
}

/// Separate two overlapping balls and exchange their normal velocities
///
/// Velocities are rotated into the contact frame, the normal components
/// swapped, rotated back, and both damped.
pub fn resolve_ball_pair(a: &mut Ball, b: &mut Ball, damping: f32) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist >= min_dist {
        return false;
    }

    let normal = if dist > EPSILON { delta / dist } else { Vec2::X };
    let correction = normal * ((min_dist - dist) / 2.0);
    a.pos -= correction;
    b.pos += correction;

    let tangent = perp(normal);
    let (a_n, a_t) = (a.vel.dot(normal), a.vel.dot(tangent));
    let (b_n, b_t) = (b.vel.dot(normal), b.vel.dot(tangent));
    a.vel = (normal * b_n + tangent * a_t) * damping;
    b.vel = (normal * a_n + tangent * b_t) * damping;
    true
}
