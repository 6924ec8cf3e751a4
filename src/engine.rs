//! Engine facade
//!
//! `PhysicsEngine` owns the world, the physics tuning and the random source,
//! and exposes the operations a presentation loop needs: build a course, add
//! balls, step, draw, and ask for the winner.

use glam::Vec2;

use crate::course::{Course, CourseMode};
use crate::renderer::{RenderTarget, ball_color, draw_scene};
use crate::settings::{PhysicsParams, Settings};
use crate::sim::{Ball, Obstacle, RandomSource, SimRng, WorldState, tick};
use crate::standings::Standings;

/// Spawn band above the entry funnel
const SPAWN_Y: f32 = 40.0;

pub struct PhysicsEngine {
    state: WorldState,
    params: PhysicsParams,
    mode: CourseMode,
    rng: Box<dyn RandomSource>,
}

impl PhysicsEngine {
    /// Engine with an entropy-seeded random source
    pub fn new(width: f32, height: f32, mode: CourseMode) -> Self {
        let rng = SimRng::from_entropy();
        log::info!("Random seed: {}", rng.seed());
        Self::with_rng(width, height, mode, Box::new(rng))
    }

    /// Engine whose random courses and spawns are reproducible
    pub fn with_seed(width: f32, height: f32, mode: CourseMode, seed: u64) -> Self {
        Self::with_rng(width, height, mode, Box::new(SimRng::new(seed)))
    }

    pub fn with_rng(
        width: f32,
        height: f32,
        mode: CourseMode,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self::build(width, height, mode, PhysicsParams::default(), rng)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let rng = match settings.seed {
            Some(seed) => SimRng::new(seed),
            None => {
                let rng = SimRng::from_entropy();
                log::info!("Random seed: {}", rng.seed());
                rng
            }
        };
        Self::build(
            settings.width,
            settings.height,
            settings.mode,
            settings.physics,
            Box::new(rng),
        )
    }

    fn build(
        width: f32,
        height: f32,
        mode: CourseMode,
        params: PhysicsParams,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let mut engine = Self {
            state: WorldState::new(width, height, params.world_height),
            params,
            mode,
            rng,
        };
        engine.regenerate();
        engine
    }

    /// Switch course generator and rebuild the course; balls stay where they are
    pub fn set_mode(&mut self, mode: CourseMode) {
        log::info!("Course mode: {} -> {}", self.mode, mode);
        self.mode = mode;
        self.regenerate();
    }

    /// Rebuild the course in the current mode
    pub fn regenerate(&mut self) {
        let course = Course::generate(
            self.mode,
            self.state.width,
            self.state.world_height,
            self.rng.as_mut(),
        );
        self.state.obstacles = course.obstacles;
    }

    /// Install a prebuilt course
    pub fn set_course(&mut self, course: Course) {
        if course.width != self.state.width {
            log::warn!(
                "Course built for width {} installed in a world {} wide",
                course.width,
                self.state.width
            );
        }
        self.mode = course.mode;
        self.state.obstacles = course.obstacles;
    }

    pub fn add_ball(&mut self, ball: Ball) {
        self.state.balls.push(ball);
    }

    /// Spawn `count` numbered balls around the top center with random velocities
    pub fn spawn_balls(&mut self, count: u32, radius: f32) {
        let first = self.state.balls.len() as u32 + 1;
        let center = self.state.width / 2.0;
        let spread = self.state.width * 0.3;

        for i in 0..count {
            let number = first + i;
            let x = center + self.rng.jitter(spread);
            let y = SPAWN_Y - i as f32 * radius * 2.2;
            let ball = Ball::spawn(
                Vec2::new(x, y),
                radius,
                number,
                ball_color(number),
                self.rng.as_mut(),
            );
            self.state.balls.push(ball);
        }
        log::info!("Spawned {} balls", count);
    }

    /// Remove all balls and rewind the clock; the course stays
    pub fn clear(&mut self) {
        self.state.reset_run();
    }

    /// Advance one frame
    pub fn update(&mut self) {
        tick(&mut self.state, &self.params, self.rng.as_mut());
    }

    /// Emit this frame's draw calls
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        draw_scene(&self.state, self.mode, target);
    }

    /// First finished ball in list order
    pub fn goal_ball(&self) -> Option<&Ball> {
        self.state.goal_ball()
    }

    pub fn is_finished(&self) -> bool {
        self.goal_ball().is_some()
    }

    pub fn standings(&self) -> &Standings {
        &self.state.standings
    }

    pub fn balls(&self) -> &[Ball] {
        &self.state.balls
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.state.obstacles
    }

    pub fn camera_y(&self) -> f32 {
        self.state.camera_y
    }

    pub fn frame_count(&self) -> u64 {
        self.state.frame_count
    }

    pub fn mode(&self) -> CourseMode {
        self.mode
    }

    pub fn world_height(&self) -> f32 {
        self.state.world_height
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }
}
