//! Randomized course
//!
//! Ten sections, each an archetype picked uniformly and then randomized within
//! bounded ranges. The entry funnel, the finale and the walls never change.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{Course, CourseBuilder, CourseMode, ENTRY_BOTTOM};
use crate::sim::RandomSource;

const SECTION_COUNT: usize = 10;

/// Section archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Slide,
    Gear,
    Bumper,
    Rotator,
    Spring,
    Deflector,
    Mixed,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Slide,
        SectionKind::Gear,
        SectionKind::Bumper,
        SectionKind::Rotator,
        SectionKind::Spring,
        SectionKind::Deflector,
        SectionKind::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Slide => "slide",
            SectionKind::Gear => "gear",
            SectionKind::Bumper => "bumper",
            SectionKind::Rotator => "rotator",
            SectionKind::Spring => "spring",
            SectionKind::Deflector => "deflector",
            SectionKind::Mixed => "mixed",
        }
    }

    /// Pick an archetype uniformly
    pub fn pick(rng: &mut dyn RandomSource) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// Build this section starting at `cy`; returns the advanced cursor
    fn build(self, b: &mut CourseBuilder, cy: f32, rng: &mut dyn RandomSource) -> f32 {
        match self {
            SectionKind::Slide => slide_section(b, cy, rng),
            SectionKind::Gear => gear_section(b, cy, rng),
            SectionKind::Bumper => bumper_section(b, cy, rng),
            SectionKind::Rotator => rotator_section(b, cy, rng),
            SectionKind::Spring => spring_section(b, cy, rng),
            SectionKind::Deflector => deflector_section(b, cy, rng),
            SectionKind::Mixed => mixed_section(b, cy, rng),
        }
    }
}

pub(super) fn build(width: f32, world_height: f32, rng: &mut dyn RandomSource) -> Course {
    let mut b = CourseBuilder::new(width);
    b.entry();

    let mut cy = ENTRY_BOTTOM;
    for section in 0..SECTION_COUNT {
        let kind = SectionKind::pick(rng);
        log::debug!("Section {}: {} at y={:.0}", section + 1, kind.as_str(), cy);
        cy = kind.build(&mut b, cy, rng);

        if rng.chance(0.5) {
            b.wall_bumpers(cy - 200.0, cy, 150.0);
        }

        // Short centering funnel after every third section, except the last
        if section < SECTION_COUNT - 1 && section % 3 == 2 {
            b.funnel(cy, 80.0, 0.42);
            cy += 120.0;
        }
    }

    let w = b.w();
    b.bottleneck(cy, 250.0, 45.0);
    b.rotator(w * 0.5, cy + 120.0, w * 0.22, 0.0, 0.05);
    cy += 300.0;

    // Wider and shorter than the fixed pipe, nothing inside
    let length = 280.0;
    b.pipe(cy, length, 42.0);
    cy += length;

    b.walls(world_height);
    b.finish(CourseMode::Random, cy)
}

/// 2-3 short slides alternating sides, each with a 30% chance of a hole
fn slide_section(b: &mut CourseBuilder, mut cy: f32, rng: &mut dyn RandomSource) -> f32 {
    let w = b.w();
    let count = 2 + rng.index(2);

    for i in 0..count {
        let drop = rng.range(40.0, 70.0);
        let (start, end) = if i % 2 == 0 {
            (w * rng.range(0.1, 0.2), w * rng.range(0.45, 0.6))
        } else {
            (w * rng.range(0.8, 0.9), w * rng.range(0.4, 0.55))
        };
        b.line(start, cy, end, cy + drop);

        if rng.chance(0.3) {
            let x = w * rng.range(0.3, 0.7);
            b.hole(x, cy + drop / 2.0, 18.0, cy + 150.0);
        }

        cy += drop + 40.0;
    }
    cy
}

/// 1-2 rows of 1-2 gears on distinct slots, then a slide
fn gear_section(b: &mut CourseBuilder, mut cy: f32, rng: &mut dyn RandomSource) -> f32 {
    let w = b.w();
    let rows = 1 + rng.index(2);

    for _ in 0..rows {
        let mut slots = vec![0.3, 0.5, 0.7];
        let gears = 1 + rng.index(2);
        for _ in 0..gears {
            let slot = slots.remove(rng.index(slots.len()));
            let dir = rng.sign();
            let radius = rng.range(35.0, 45.0);
            let angle = rng.range(0.0, PI);
            let speed = 0.03 * dir + rng.range(0.0, 0.02);
            b.gear(w * slot, cy, radius, 8, angle, speed);
        }
        cy += 120.0;
    }

    b.line(w * 0.1, cy, w * 0.5, cy + 50.0);
    cy + 90.0
}

/// 1-2 rows of 2-4 bumpers, then a slide
fn bumper_section(b: &mut CourseBuilder, mut cy: f32, rng: &mut dyn RandomSource) -> f32 {
    let w = b.w();
    let rows = 1 + rng.index(2);

    for _ in 0..rows {
        let count = 2 + rng.index(3);
        let spacing = 0.7 / count as f32;
        for i in 0..count {
            let x = w * (0.15 + i as f32 * spacing + rng.range(0.0, 0.1));
            let radius = rng.range(16.0, 22.0);
            let force = rng.range(8.0, 12.0);
            b.bumper(x, cy, radius, force);
        }
        cy += 80.0;
    }

    b.line(w * 0.15, cy, w * 0.55, cy + 50.0);
    cy + 90.0
}

/// 1-2 centered rotators spinning in alternating directions, then a slide
fn rotator_section(b: &mut CourseBuilder, mut cy: f32, rng: &mut dyn RandomSource) -> f32 {
    let w = b.w();
    let count = 1 + rng.index(2);

    for i in 0..count {
        let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
        let length = w * rng.range(0.4, 0.6);
        let angle = rng.range(0.0, PI);
        let speed = 0.04 * dir + rng.range(0.0, 0.02);
        b.rotator(w * 0.5, cy, length, angle, speed);
        cy += 110.0;
    }

    b.line(w * 0.1, cy, w * 0.5, cy + 50.0);
    cy + 90.0
}

/// A row of 2-3 springs, then a slide from the right
fn spring_section(b: &mut CourseBuilder, mut cy: f32, rng: &mut dyn RandomSource) -> f32 {
    let w = b.w();
    let count = 2 + rng.index(2);
    let spacing = 0.6 / count as f32;

    for i in 0..count {
        let x = w * (0.15 + i as f32 * spacing);
        let width = rng.range(60.0, 80.0);
        let force = rng.range(12.0, 16.0);
        b.spring(x, cy, width, 12.0, force);
    }
    cy += 120.0;

    b.line(w * 0.85, cy, w * 0.5, cy + 50.0);
    cy + 90.0
}

/// 3-4 chevron deflectors, then a slide
fn deflector_section(b: &mut CourseBuilder, mut cy: f32, rng: &mut dyn RandomSource) -> f32 {
    let w = b.w();
    let cols = 3 + rng.index(2);
    let spacing = 0.7 / cols as f32;

    for c in 0..cols {
        let x = w * (0.15 + c as f32 * spacing);
        let size = rng.range(12.0, 16.0);
        b.chevron(x, cy, size);
    }
    cy += 80.0;

    b.line(w * 0.1, cy, w * 0.55, cy + 50.0);
    cy + 90.0
}

/// Gear beside a bumper, then either a rotator or a pair of springs
fn mixed_section(b: &mut CourseBuilder, mut cy: f32, rng: &mut dyn RandomSource) -> f32 {
    let w = b.w();

    if rng.next_f32() > 0.5 {
        b.gear(w * 0.35, cy, 35.0, 8, 0.0, 0.035);
        b.bumper(w * 0.65, cy, 18.0, 9.0);
    } else {
        b.bumper(w * 0.35, cy, 18.0, 9.0);
        b.gear(w * 0.65, cy, 35.0, 8, 0.0, -0.035);
    }
    cy += 110.0;

    if rng.next_f32() > 0.5 {
        b.rotator(w * 0.5, cy, w * 0.45, 0.0, 0.04);
        cy += 100.0;
    } else {
        b.spring(w * 0.3, cy, 70.0, 12.0, 13.0);
        b.spring(w * 0.55, cy, 70.0, 12.0, 13.0);
        cy += 110.0;
    }

    b.line(w * 0.15, cy, w * 0.5, cy + 50.0);
    cy + 90.0
}
