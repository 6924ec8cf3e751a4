//! Obstacle course generation
//!
//! A course is an ordered obstacle list stacked top to bottom over a vertical
//! world. `Fixed` mode is hand-authored and deterministic; `Random` mode stacks
//! ten randomly chosen sections. Both share the entry funnel, the finale and the
//! two full-height side walls.

mod fixed;
mod random;

pub use random::SectionKind;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BALL_RADIUS;
use crate::sim::geometry::{Rect, disc_half_chord, segment_x_at};
use crate::sim::{
    GearObstacle, HoleObstacle, Obstacle, RandomSource, RotatorObstacle, SpringObstacle,
    VibratorObstacle, WindObstacle,
};

/// First section starts this far down, below the entry funnel
pub const ENTRY_BOTTOM: f32 = 170.0;

/// Vertical spacing between navigability samples
const SAMPLE_STEP: f32 = 4.0;

/// Course generator selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CourseMode {
    /// Hand-authored course, identical every time
    #[default]
    Fixed,
    /// Ten randomly chosen sections
    Random,
}

impl CourseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseMode::Fixed => "Fixed",
            CourseMode::Random => "Random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" | "1" => Some(CourseMode::Fixed),
            "random" | "2" => Some(CourseMode::Random),
            _ => None,
        }
    }

    /// Mode number shown in the HUD
    pub fn number(&self) -> u8 {
        match self {
            CourseMode::Fixed => 1,
            CourseMode::Random => 2,
        }
    }
}

impl std::fmt::Display for CourseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated obstacle course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub mode: CourseMode,
    pub width: f32,
    /// Obstacles in resolution order
    pub obstacles: Vec<Obstacle>,
    /// Lowest y reached by the authored sections (bottom of the exit pipe)
    pub bottom: f32,
}

impl Course {
    /// Build a course for a world `width` wide and `world_height` tall
    ///
    /// Fixed mode never draws from `rng`.
    pub fn generate(
        mode: CourseMode,
        width: f32,
        world_height: f32,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let course = match mode {
            CourseMode::Fixed => fixed::build(width, world_height),
            CourseMode::Random => random::build(width, world_height, rng),
        };

        log::info!(
            "Generated {} course: {} obstacles, sections end at y={:.0}",
            mode,
            course.obstacles.len(),
            course.bottom
        );
        if course.bottom > world_height {
            log::warn!(
                "Course runs past the finish line ({:.0} > {:.0})",
                course.bottom,
                world_height
            );
        }
        if !course.is_navigable(BALL_RADIUS) {
            log::warn!("{} course has a gap narrower than one ball", mode);
        }

        course
    }

    /// Widest horizontally free interval at height `y`
    ///
    /// Lines block at their crossing point, discs by their chord, pads by their
    /// extent and vibrators by their full sweep. Rotators, holes, traps and wind
    /// never seal a row.
    pub fn widest_gap_at(&self, y: f32) -> f32 {
        let mut blocked = self.blocked_at(y);
        blocked.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut cursor = 0.0_f32;
        let mut widest = 0.0_f32;
        for (lo, hi) in blocked {
            if lo > cursor {
                widest = widest.max(lo - cursor);
            }
            cursor = cursor.max(hi);
        }
        widest.max(self.width - cursor)
    }

    /// True if a ball of `ball_radius` fits through every row of the course
    pub fn is_navigable(&self, ball_radius: f32) -> bool {
        let diameter = ball_radius * 2.0;
        let mut y = 0.0;
        while y <= self.bottom {
            if self.widest_gap_at(y) < diameter {
                log::debug!("Course blocked at y={:.0}", y);
                return false;
            }
            y += SAMPLE_STEP;
        }
        true
    }

    /// Horizontal intervals blocked at `y`, clipped to the course width
    fn blocked_at(&self, y: f32) -> Vec<(f32, f32)> {
        let disc = |center: Vec2, radius: f32| {
            disc_half_chord(center, radius, y).map(|h| (center.x - h, center.x + h))
        };
        let pad = |rect: &Rect, reach: f32| {
            (y >= rect.top() && y <= rect.bottom()).then(|| (rect.left() - reach, rect.right() + reach))
        };

        self.obstacles
            .iter()
            .filter_map(|obstacle| match obstacle {
                Obstacle::Line(l) => segment_x_at(l.start, l.end, y).map(|x| (x, x)),
                Obstacle::Circle(c) => disc(c.center, c.radius),
                Obstacle::Bumper(b) => disc(b.center, b.radius),
                Obstacle::Gear(g) => disc(g.center, g.effective_radius()),
                Obstacle::Spring(s) => pad(&s.rect, 0.0),
                Obstacle::Launcher(l) => pad(&l.rect, 0.0),
                Obstacle::Vibrator(v) => pad(&v.rect, v.amplitude.abs()),
                Obstacle::Rotator(_) | Obstacle::Hole(_) | Obstacle::Trap(_) | Obstacle::Wind(_) => None,
            })
            .map(|(lo, hi)| (lo.max(0.0), hi.min(self.width)))
            .collect()
    }
}

/// Accumulates obstacles for one course, positions given in pixels
pub(crate) struct CourseBuilder {
    width: f32,
    obstacles: Vec<Obstacle>,
}

impl CourseBuilder {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            obstacles: Vec::new(),
        }
    }

    /// Course width
    #[inline]
    pub fn w(&self) -> f32 {
        self.width
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.obstacles.push(Obstacle::line(x1, y1, x2, y2));
    }

    pub fn bumper(&mut self, x: f32, y: f32, radius: f32, force: f32) {
        self.obstacles.push(Obstacle::bumper(x, y, radius, force));
    }

    pub fn hole(&mut self, x: f32, y: f32, radius: f32, teleport_y: f32) {
        self.obstacles.push(Obstacle::Hole(HoleObstacle {
            center: Vec2::new(x, y),
            radius,
            teleport_y,
        }));
    }

    pub fn gear(&mut self, x: f32, y: f32, radius: f32, teeth: u32, angle: f32, speed: f32) {
        self.obstacles.push(Obstacle::Gear(GearObstacle {
            center: Vec2::new(x, y),
            radius,
            teeth,
            angle,
            speed,
        }));
    }

    pub fn rotator(&mut self, x: f32, y: f32, length: f32, angle: f32, speed: f32) {
        self.obstacles.push(Obstacle::Rotator(RotatorObstacle {
            center: Vec2::new(x, y),
            length,
            angle,
            speed,
        }));
    }

    pub fn spring(&mut self, x: f32, y: f32, width: f32, height: f32, force: f32) {
        self.obstacles.push(Obstacle::Spring(SpringObstacle {
            rect: Rect::new(x, y, width, height),
            force,
            compressed: 0.0,
        }));
    }

    pub fn vibrator(&mut self, x: f32, y: f32, width: f32, height: f32, amplitude: f32, phase: f32) {
        self.obstacles.push(Obstacle::Vibrator(VibratorObstacle {
            rect: Rect::new(x, y, width, height),
            amplitude,
            phase,
        }));
    }

    pub fn wind(&mut self, x: f32, y: f32, width: f32, height: f32, force: Vec2) {
        self.obstacles.push(Obstacle::Wind(WindObstacle {
            rect: Rect::new(x, y, width, height),
            force,
        }));
    }

    /// Upward-pointing chevron of half-size `size` centered on (`x`, `y`)
    pub fn chevron(&mut self, x: f32, y: f32, size: f32) {
        self.line(x - size, y + size, x, y - size);
        self.line(x, y - size, x + size, y + size);
    }

    /// Funnel from both walls down to a centered mouth; the left lip ends at
    /// `inner`·W and the right lip mirrors it
    pub fn funnel(&mut self, y: f32, depth: f32, inner: f32) {
        let w = self.width;
        self.line(0.0, y, w * inner, y + depth);
        self.line(w, y, w * (1.0 - inner), y + depth);
    }

    /// Closing bottleneck whose mouth is `2 * half_gap` wide
    pub fn bottleneck(&mut self, y: f32, depth: f32, half_gap: f32) {
        let w = self.width;
        self.line(0.0, y, w / 2.0 - half_gap, y + depth);
        self.line(w, y, w / 2.0 + half_gap, y + depth);
    }

    /// Entry funnel at the very top of every course
    pub fn entry(&mut self) {
        let w = self.width;
        self.line(0.0, 0.0, w * 0.4, 120.0);
        self.line(w, 0.0, w * 0.6, 120.0);
    }

    /// Bumper pairs hugging both walls over `[start, end)`, every other step
    pub fn wall_bumpers(&mut self, start: f32, end: f32, spacing: f32) {
        let w = self.width;
        let mut y = start;
        let mut count = 0;
        while y < end {
            count += 1;
            if count % 2 == 1 {
                self.bumper(25.0, y, 15.0, 10.0);
                self.bumper(w - 25.0, y, 15.0, 10.0);
            }
            y += spacing;
        }
    }

    /// Vertical exit pipe of half-width `gap` centered on the course
    pub fn pipe(&mut self, y: f32, length: f32, gap: f32) {
        let x = self.width / 2.0;
        self.line(x - gap, y, x - gap, y + length);
        self.line(x + gap, y, x + gap, y + length);
    }

    /// Full-height side walls; always the last two obstacles
    pub fn walls(&mut self, world_height: f32) {
        let w = self.width;
        self.line(0.0, 0.0, 0.0, world_height);
        self.line(w, 0.0, w, world_height);
    }

    pub fn finish(self, mode: CourseMode, bottom: f32) -> Course {
        Course {
            mode,
            width: self.width,
            obstacles: self.obstacles,
            bottom,
        }
    }
}
