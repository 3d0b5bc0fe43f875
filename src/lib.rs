//! Globe Arcs - projectiles flying over a globe, leaving fading trails
//!
//! Core modules:
//! - `sim`: Frame-clock simulation (geodesic mapping, arcs, projectiles, trails)
//! - `renderer`: Per-frame marker instances handed to the GPU collaborator
//! - `settings`: Data-driven tunables loaded from JSON
//! - `color`: `#rrggbb` colors
//! - `error`: Crate error type

pub mod color;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use error::{Error, Result};
pub use settings::Settings;

/// Simulation defaults
pub mod consts {
    /// Globe radius in scene units
    pub const SPHERE_RADIUS: f32 = 2.0;
    /// How far the arc control points are lifted above the surface
    pub const ARC_HEIGHT: f32 = 1.5;
    /// Seconds from launch to arrival
    pub const FLIGHT_DURATION: f64 = 5.0;

    /// Minimum flight time between two trail particles (seconds)
    pub const TRAIL_SPAWN_INTERVAL: f64 = 0.05;
    /// Seconds a trail particle takes to fade out
    pub const TRAIL_LIFESPAN: f64 = 0.5;

    /// Marker sizes handed to the renderer
    pub const PROJECTILE_MARKER_SIZE: f32 = 0.03;
    pub const TRAIL_MARKER_SIZE: f32 = 0.02;

    /// Random source points land within this many degrees of the region center
    pub const SPAWN_SPREAD_DEGREES: f32 = 30.0;

    /// Demo route: North America -> Australia
    pub const DEMO_SOURCE: (f32, f32) = (40.0, -100.0);
    pub const DEMO_DESTINATION: (f32, f32) = (-30.0, 140.0);

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED;

    /// Simulated display refresh for the headless demo (60 Hz)
    pub const FRAME_DT: f64 = 1.0 / 60.0;
}

/// Clamp a progress ratio into [0, 1]
#[inline]
pub fn clamp_unit(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}
