//! Simulation settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result, positive_seconds};

/// Tunables for arcs, flights and trails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Globe radius (scene units)
    pub sphere_radius: f32,
    /// Lift of the arc control points above the surface
    pub arc_height: f32,

    // === Timing ===
    /// Seconds from launch to arrival
    pub flight_duration: f64,
    /// Minimum flight time between trail particles
    pub trail_spawn_interval: f64,
    /// Fade-out time of a trail particle
    pub trail_lifespan: f64,

    // === Spawning ===
    /// Scatter radius (degrees) for randomized source points
    pub spawn_spread_degrees: f32,
    /// Optional cap on concurrently flying projectiles
    pub max_live_projectiles: Option<usize>,
    /// Seed for scatter spawns and random colors
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sphere_radius: SPHERE_RADIUS,
            arc_height: ARC_HEIGHT,

            flight_duration: FLIGHT_DURATION,
            trail_spawn_interval: TRAIL_SPAWN_INTERVAL,
            trail_lifespan: TRAIL_LIFESPAN,

            spawn_spread_degrees: SPAWN_SPREAD_DEGREES,
            max_live_projectiles: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Check every construction-time constraint
    pub fn validate(&self) -> Result<()> {
        if !(self.sphere_radius.is_finite() && self.sphere_radius > 0.0) {
            return Err(Error::InvalidRadius(self.sphere_radius));
        }
        if !(self.arc_height.is_finite() && self.arc_height >= 0.0) {
            return Err(Error::InvalidArcHeight(self.arc_height));
        }
        positive_seconds(self.flight_duration, Error::InvalidDuration)?;
        positive_seconds(self.trail_spawn_interval, Error::InvalidTrailInterval)?;
        positive_seconds(self.trail_lifespan, Error::InvalidLifespan)?;
        // max_live_projectiles = Some(0) is allowed and refuses every spawn
        Ok(())
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
