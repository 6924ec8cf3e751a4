//! Hand-authored course
//!
//! Ten themed sections between the entry funnel and the exit pipe. Every
//! position is a fraction of the course width, so the layout scales with the
//! viewport. Identical on every call.

use std::f32::consts::PI;

use glam::Vec2;

use super::{Course, CourseBuilder, CourseMode, ENTRY_BOTTOM};

pub(super) fn build(width: f32, world_height: f32) -> Course {
    let mut b = CourseBuilder::new(width);
    b.entry();

    let mut cy = ENTRY_BOTTOM;
    cy = zigzag_slides(&mut b, cy);
    b.wall_bumpers(ENTRY_BOTTOM, cy, 120.0);

    b.funnel(cy, 120.0, 0.42);
    cy += 170.0;

    cy = gear_pair(&mut b, cy);
    cy = bumpers_and_springs(&mut b, cy);
    b.wall_bumpers(cy - 350.0, cy, 150.0);

    cy = rotators(&mut b, cy);
    cy = deflectors_and_hole(&mut b, cy);

    b.funnel(cy, 140.0, 0.4);
    cy += 190.0;

    cy = vibrator_and_gears(&mut b, cy);
    b.wall_bumpers(cy - 400.0, cy, 140.0);

    cy = spring_row(&mut b, cy);
    cy = bumper_field(&mut b, cy);
    cy = final_mix(&mut b, cy);
    b.wall_bumpers(cy - 500.0, cy, 160.0);

    cy = final_slides(&mut b, cy);

    let bottom = finale(&mut b, cy);
    b.walls(world_height);
    b.finish(CourseMode::Fixed, bottom)
}

/// Short alternating slides with a bumper and a hole
fn zigzag_slides(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    b.line(w * 0.1, cy, w * 0.55, cy + 60.0);
    cy += 100.0;
    b.line(w * 0.9, cy, w * 0.45, cy + 60.0);
    b.bumper(w * 0.7, cy + 30.0, 18.0, 9.0);
    cy += 100.0;
    b.line(w * 0.1, cy, w * 0.7, cy + 80.0);
    b.hole(w * 0.4, cy + 40.0, 20.0, cy + 200.0);
    cy += 120.0;
    b.line(w * 0.9, cy, w * 0.3, cy + 80.0);
    cy + 120.0
}

/// Counter-rotating gears, two slides, then one big gear
fn gear_pair(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    b.gear(w * 0.35, cy, 38.0, 8, 0.0, 0.035);
    b.gear(w * 0.65, cy, 38.0, 8, PI / 4.0, -0.035);
    cy += 130.0;

    b.line(w * 0.15, cy, w * 0.5, cy + 50.0);
    b.bumper(w * 0.35, cy + 25.0, 16.0, 8.0);
    cy += 90.0;
    b.line(w * 0.85, cy, w * 0.5, cy + 50.0);
    cy += 90.0;

    b.gear(w * 0.5, cy, 42.0, 10, 0.0, 0.04);
    cy + 130.0
}

fn bumpers_and_springs(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    for x in [0.25, 0.5, 0.75] {
        b.bumper(w * x, cy, 20.0, 10.0);
    }
    cy += 100.0;

    b.spring(w * 0.2, cy, 70.0, 14.0, 14.0);
    b.spring(w * 0.55, cy, 70.0, 14.0, 14.0);
    cy += 130.0;

    b.line(w * 0.05, cy, w * 0.6, cy + 70.0);
    cy += 110.0;
    b.line(w * 0.95, cy, w * 0.4, cy + 70.0);
    cy + 110.0
}

fn rotators(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    b.rotator(w * 0.5, cy, w * 0.55, 0.0, 0.04);
    cy += 130.0;
    b.rotator(w * 0.5, cy, w * 0.55, PI / 3.0, -0.04);
    cy += 130.0;

    b.line(w * 0.1, cy, w * 0.5, cy + 55.0);
    cy += 90.0;
    b.line(w * 0.9, cy, w * 0.5, cy + 55.0);
    cy + 100.0
}

fn deflectors_and_hole(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    for c in 0..4 {
        b.chevron(w * 0.2 + c as f32 * w * 0.2, cy, 14.0);
    }
    cy += 90.0;

    b.bumper(w * 0.3, cy, 18.0, 9.0);
    b.bumper(w * 0.7, cy, 18.0, 9.0);
    cy += 100.0;

    b.line(w * 0.08, cy, w * 0.6, cy + 70.0);
    b.hole(w * 0.35, cy + 35.0, 18.0, cy + 180.0);
    cy += 110.0;
    b.line(w * 0.92, cy, w * 0.4, cy + 70.0);
    cy + 120.0
}

fn vibrator_and_gears(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    b.vibrator(w * 0.25, cy, w * 0.5, 12.0, 22.0, 0.0);
    cy += 120.0;

    b.gear(w * 0.3, cy, 35.0, 8, 0.0, 0.04);
    b.gear(w * 0.7, cy, 35.0, 8, 0.0, -0.04);
    cy += 120.0;

    b.line(w * 0.1, cy, w * 0.55, cy + 55.0);
    cy += 90.0;
    b.line(w * 0.9, cy, w * 0.45, cy + 55.0);
    b.bumper(w * 0.65, cy + 28.0, 16.0, 8.0);
    cy + 100.0
}

fn spring_row(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    for x in [0.15, 0.42, 0.7] {
        b.spring(w * x, cy, 65.0, 12.0, 13.0);
    }
    cy += 130.0;

    b.rotator(w * 0.5, cy, w * 0.5, 0.0, 0.045);
    cy += 120.0;

    b.line(w * 0.15, cy, w * 0.5, cy + 50.0);
    cy += 85.0;
    b.line(w * 0.85, cy, w * 0.5, cy + 50.0);
    cy + 90.0
}

/// Two staggered rows of bumpers
fn bumper_field(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    for x in [0.2, 0.4, 0.6, 0.8] {
        b.bumper(w * x, cy, 18.0, 9.0);
    }
    cy += 90.0;
    for x in [0.3, 0.5, 0.7] {
        b.bumper(w * x, cy, 18.0, 9.0);
    }
    cy += 100.0;

    b.line(w * 0.1, cy, w * 0.55, cy + 55.0);
    cy += 90.0;
    b.line(w * 0.9, cy, w * 0.45, cy + 55.0);
    cy + 100.0
}

fn final_mix(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    b.gear(w * 0.5, cy, 40.0, 10, 0.0, 0.045);
    cy += 120.0;

    b.rotator(w * 0.5, cy, w * 0.5, PI / 4.0, -0.05);
    cy += 110.0;

    for c in 0..5 {
        b.chevron(w * 0.1 + c as f32 * w * 0.2, cy, 12.0);
    }
    cy += 80.0;

    b.bumper(w * 0.35, cy, 16.0, 8.0);
    b.bumper(w * 0.65, cy, 16.0, 8.0);
    cy + 90.0
}

fn final_slides(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    b.line(w * 0.1, cy, w * 0.55, cy + 55.0);
    cy += 90.0;
    b.line(w * 0.9, cy, w * 0.45, cy + 55.0);
    cy += 90.0;
    b.line(w * 0.1, cy, w * 0.5, cy + 50.0);
    cy += 85.0;
    b.line(w * 0.9, cy, w * 0.5, cy + 50.0);
    cy + 100.0
}

/// Bottleneck with a small rotator and headwind, then a windy exit pipe.
/// Returns the bottom of the pipe.
fn finale(b: &mut CourseBuilder, mut cy: f32) -> f32 {
    let w = b.w();
    b.bottleneck(cy, 300.0, 45.0);
    b.rotator(w * 0.5, cy + 150.0, w * 0.25, 0.0, 0.05);
    b.wind(w * 0.2, cy, w * 0.6, 350.0, Vec2::new(0.0, -0.5));
    cy += 350.0;

    let gap = 38.0;
    let length = 350.0;
    b.pipe(cy, length, gap);
    b.wind(w / 2.0 - gap, cy, gap * 2.0, length, Vec2::new(0.0, -0.6));
    cy + length
}
