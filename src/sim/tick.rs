//! Per-frame simulation step
//!
//! Advances the world by one frame: obstacle animation, ball integration,
//! obstacle and ball-ball collisions, finish detection, camera follow.

use super::collision::{ContactParams, clamp_to_bounds, resolve_ball_pair, resolve_obstacle};
use super::rng::RandomSource;
use super::state::WorldState;
use crate::settings::PhysicsParams;

/// Advance the world by one frame (unit timestep)
pub fn tick(state: &mut WorldState, params: &PhysicsParams, rng: &mut dyn RandomSource) {
    state.frame_count += 1;

    for obstacle in &mut state.obstacles {
        obstacle.advance();
    }

    let contact = ContactParams {
        restitution: params.restitution,
        width: state.width,
        frame: state.frame_count,
    };

    let mut lead_y: f32 = 0.0;

    for i in 0..state.balls.len() {
        let (head, tail) = state.balls.split_at_mut(i + 1);
        let ball = &mut head[i];

        ball.integrate(params.gravity, params.friction);

        // Every obstacle, in list order, no early exit
        for obstacle in state.obstacles.iter_mut() {
            resolve_obstacle(ball, obstacle, &contact, rng);
        }

        clamp_to_bounds(ball, state.width, params.restitution);

        for other in tail.iter_mut() {
            if resolve_ball_pair(ball, other, params.ball_damping) {
                // Separation must not push either ball through a side wall
                clamp_to_bounds(ball, state.width, params.restitution);
                clamp_to_bounds(other, state.width, params.restitution);
            }
        }

        if ball.pos.y > lead_y {
            lead_y = ball.pos.y;
        }

        if ball.pos.y > state.world_height && !ball.finished {
            ball.finished = true;
            state.standings.record(ball.number, state.frame_count);
            log::info!(
                "Ball {} finished at frame {} (place {})",
                ball.number,
                state.frame_count,
                state.standings.len()
            );
        }
    }

    follow_camera(state, lead_y, params);
}

/// Ease the camera toward keeping the lead ball in view
fn follow_camera(state: &mut WorldState, lead_y: f32, params: &PhysicsParams) {
    let max_camera = (state.world_height - state.height).max(0.0);
    let target = (lead_y - state.height * params.camera_lead).clamp(0.0, max_camera);
    state.camera_y += (target - state.camera_y) * params.camera_easing;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::geometry::Rect;
    use crate::sim::rng::{ReplayRandom, SimRng};
    use crate::sim::state::{Ball, GearObstacle, HoleObstacle, Obstacle, RotatorObstacle, SpringObstacle};
    use glam::Vec2;
    use proptest::prelude::*;

    fn world() -> WorldState {
        WorldState::new(VIEW_WIDTH, VIEW_HEIGHT, WORLD_HEIGHT)
    }

    fn walls(width: f32, world_height: f32) -> Vec<Obstacle> {
        vec![
            Obstacle::line(0.0, 0.0, 0.0, world_height),
            Obstacle::line(width, 0.0, width, world_height),
        ]
    }

    #[test]
    fn test_frame_counter_advances() {
        let mut state = world();
        let params = PhysicsParams::default();
        let mut rng = ReplayRandom::constant(0.5);
        for _ in 0..5 {
            tick(&mut state, &params, &mut rng);
        }
        assert_eq!(state.frame_count, 5);
    }

    #[test]
    fn test_rotating_phase_is_linear() {
        let mut state = world();
        state.obstacles.push(Obstacle::Gear(GearObstacle {
            center: Vec2::new(300.0, 1000.0),
            radius: 38.0,
            teeth: 8,
            angle: 0.25,
            speed: 0.035,
        }));
        state.obstacles.push(Obstacle::Rotator(RotatorObstacle {
            center: Vec2::new(400.0, 2000.0),
            length: 300.0,
            angle: 1.0,
            speed: -0.04,
        }));
        let params = PhysicsParams::default();
        let mut rng = ReplayRandom::constant(0.5);
        let n = 100;
        for _ in 0..n {
            tick(&mut state, &params, &mut rng);
        }
        match (&state.obstacles[0], &state.obstacles[1]) {
            (Obstacle::Gear(g), Obstacle::Rotator(r)) => {
                assert!((g.angle - (0.25 + n as f32 * 0.035)).abs() < 1e-4);
                assert!((r.angle - (1.0 - n as f32 * 0.04)).abs() < 1e-4);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_spring_compression_decays_to_zero() {
        let mut state = world();
        state.obstacles.push(Obstacle::Spring(SpringObstacle {
            rect: Rect::new(100.0, 500.0, 70.0, 14.0),
            force: 14.0,
            compressed: 1.0,
        }));
        let params = PhysicsParams::default();
        let mut rng = ReplayRandom::constant(0.5);

        let compression = |state: &WorldState| match &state.obstacles[0] {
            Obstacle::Spring(s) => s.compressed,
            _ => unreachable!(),
        };

        let mut previous = compression(&state);
        for _ in 0..20 {
            tick(&mut state, &params, &mut rng);
            let current = compression(&state);
            assert!(current >= 0.0);
            if previous > 0.0 {
                let expected = (previous - SPRING_DECAY).max(0.0);
                assert!((current - expected).abs() < 1e-6);
                assert!(current < previous);
            } else {
                assert_eq!(current, 0.0);
            }
            previous = current;
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn test_ball_past_world_height_finishes() {
        let mut state = world();
        let params = PhysicsParams::default();
        let mut rng = ReplayRandom::constant(0.5);
        state.balls.push(Ball::new(Vec2::new(200.0, 100.0), BALL_RADIUS, 1, [1.0; 4]));
        state.balls.push(Ball::new(Vec2::new(600.0, 100.0), BALL_RADIUS, 2, [1.0; 4]));

        tick(&mut state, &params, &mut rng);
        assert!(state.goal_ball().is_none());

        state.balls[1].pos.y = WORLD_HEIGHT + 1.0;
        tick(&mut state, &params, &mut rng);
        assert!(state.balls[1].finished);
        assert_eq!(state.goal_ball().map(|b| b.number), Some(2));
        assert_eq!(state.standings.winner(), Some(2));

        // Flag sticks even if the ball is dragged back up
        state.balls[1].pos.y = 100.0;
        tick(&mut state, &params, &mut rng);
        assert!(state.balls[1].finished);
        assert_eq!(state.standings.len(), 1);
    }

    #[test]
    fn test_ball_inside_hole_drops_to_teleport_height() {
        let mut state = world();
        let hole = HoleObstacle {
            center: Vec2::new(320.0, 400.0),
            radius: 20.0,
            teleport_y: 600.0,
        };
        state.obstacles.push(Obstacle::Hole(hole.clone()));
        state.balls.push(Ball::new(hole.center, BALL_RADIUS, 1, [1.0; 4]));

        let params = PhysicsParams::default();
        let mut rng = SimRng::new(3);
        tick(&mut state, &params, &mut rng);

        let ball = &state.balls[0];
        assert_eq!(ball.pos.y, hole.teleport_y);
        assert!((ball.pos.x - hole.center.x).abs() <= 25.0);
        assert!(ball.vel.y > 0.0);
    }

    /// Race two balls between bare walls; returns the frame each one finished on
    fn race_pair(a: Ball, b: Ball) -> [Option<u64>; 2] {
        let mut state = world();
        state.obstacles = walls(state.width, state.world_height);
        state.balls.push(a);
        state.balls.push(b);

        let params = PhysicsParams::default();
        let mut rng = ReplayRandom::constant(0.5);
        let mut finish_ticks = [None, None];

        for frame in 1..=2000u64 {
            tick(&mut state, &params, &mut rng);
            for (i, ball) in state.balls.iter().enumerate() {
                assert!(ball.pos.x > 0.0 && ball.pos.x < state.width);
                if ball.finished && finish_ticks[i].is_none() {
                    finish_ticks[i] = Some(frame);
                }
            }
            if finish_ticks.iter().all(Option::is_some) {
                break;
            }
        }
        finish_ticks
    }

    #[test]
    fn test_mirrored_balls_finish_together() {
        let vel = Vec2::new(0.0, 2.0);
        let ticks = race_pair(
            Ball::new(Vec2::new(240.0, 50.0), BALL_RADIUS, 1, [1.0; 4]).with_velocity(vel),
            Ball::new(Vec2::new(560.0, 50.0), BALL_RADIUS, 2, [1.0; 4]).with_velocity(vel),
        );
        assert!(ticks[0].is_some());
        assert_eq!(ticks[0], ticks[1]);
    }

    #[test]
    fn test_stacked_balls_finish_together() {
        // Same spot, same velocity: the pair separates sideways and falls in step
        let vel = Vec2::new(0.0, 2.0);
        let ticks = race_pair(
            Ball::new(Vec2::new(400.0, 50.0), BALL_RADIUS, 1, [1.0; 4]).with_velocity(vel),
            Ball::new(Vec2::new(400.0, 50.0), BALL_RADIUS, 2, [1.0; 4]).with_velocity(vel),
        );
        assert!(ticks[0].is_some());
        assert_eq!(ticks[0], ticks[1]);
    }

    #[test]
    fn test_stacked_balls_against_wall_finish_together() {
        let vel = Vec2::new(-3.0, 2.0);
        let ticks = race_pair(
            Ball::new(Vec2::new(BALL_RADIUS, 50.0), BALL_RADIUS, 1, [1.0; 4]).with_velocity(vel),
            Ball::new(Vec2::new(BALL_RADIUS, 50.0), BALL_RADIUS, 2, [1.0; 4]).with_velocity(vel),
        );
        assert!(ticks[0].is_some());
        assert_eq!(ticks[0], ticks[1]);
    }

    #[test]
    fn test_camera_eases_and_stays_in_bounds() {
        let mut state = world();
        let params = PhysicsParams::default();
        let mut rng = ReplayRandom::constant(0.5);
        state.balls.push(Ball::new(Vec2::new(400.0, 3000.0), BALL_RADIUS, 1, [1.0; 4]));

        tick(&mut state, &params, &mut rng);
        let lead = state.balls[0].pos.y;
        let target = lead - VIEW_HEIGHT * CAMERA_LEAD;
        // One easing step, not a snap
        assert!((state.camera_y - target * CAMERA_EASING).abs() < 1e-2);

        for _ in 0..500 {
            tick(&mut state, &params, &mut rng);
            assert!(state.camera_y >= 0.0);
            assert!(state.camera_y <= WORLD_HEIGHT - VIEW_HEIGHT + 1e-3);
        }
    }

    #[test]
    fn test_no_balls_keeps_camera_at_top() {
        let mut state = world();
        let params = PhysicsParams::default();
        let mut rng = ReplayRandom::constant(0.5);
        tick(&mut state, &params, &mut rng);
        assert_eq!(state.camera_y, 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_balls_never_leave_sides(
            xs in proptest::collection::vec(20.0f32..780.0, 1..6),
            vx in -60.0f32..60.0,
            seed in any::<u64>(),
        ) {
            let mut state = world();
            state.obstacles = walls(state.width, state.world_height);
            for (i, x) in xs.iter().enumerate() {
                state.balls.push(
                    Ball::new(Vec2::new(*x, 40.0 + i as f32 * 5.0), BALL_RADIUS, i as u32 + 1, [1.0; 4])
                        .with_velocity(Vec2::new(vx, 0.0)),
                );
            }
            let params = PhysicsParams::default();
            let mut rng = SimRng::new(seed);
            for _ in 0..150 {
                tick(&mut state, &params, &mut rng);
                for ball in &state.balls {
                    prop_assert!(ball.pos.x >= ball.radius - 1e-3);
                    prop_assert!(ball.pos.x <= state.width - ball.radius + 1e-3);
                }
            }
        }
    }
}
