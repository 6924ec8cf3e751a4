//! Race settings and physics tuning
//!
//! Loaded from a JSON file on native builds; every field has a default so a
//! partial file is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::course::CourseMode;

/// Tunable physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Added to vy every frame
    pub gravity: f32,
    /// Velocity multiplier every frame
    pub friction: f32,
    /// Normal velocity retained on reflective contacts
    pub restitution: f32,
    /// Velocity multiplier applied to both balls of a colliding pair
    pub ball_damping: f32,
    /// Fraction of the view height kept above the lead ball
    pub camera_lead: f32,
    /// Fraction of the remaining distance the camera covers per frame
    pub camera_easing: f32,
    /// Finish line y
    pub world_height: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            restitution: RESTITUTION,
            ball_damping: BALL_PAIR_DAMPING,
            camera_lead: CAMERA_LEAD,
            camera_easing: CAMERA_EASING,
            world_height: WORLD_HEIGHT,
        }
    }
}

/// Race settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width (also the course width)
    pub width: f32,
    /// Viewport height
    pub height: f32,
    /// Course generator
    pub mode: CourseMode,

    // === Race ===
    /// Balls spawned at the start
    pub ball_count: u32,
    pub ball_radius: f32,
    /// Fixed seed for reproducible random courses
    pub seed: Option<u64>,
    /// Frames to simulate before giving up on a finisher
    pub tick_limit: u64,

    pub physics: PhysicsParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
            mode: CourseMode::Fixed,

            ball_count: 8,
            ball_radius: BALL_RADIUS,
            seed: None,
            tick_limit: 20_000,

            physics: PhysicsParams::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize settings as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}, using default settings", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
