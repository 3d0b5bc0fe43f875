//! Projectiles: markers flying along a flight arc
//!
//! A projectile is Flying until its progress reaches 1, then Arrived for
//! good. Progress is `(now - start_time) / duration`, clamped to [0, 1].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::arc::FlightArc;
use super::geo::GeoPoint;
use super::trail::TrailParticle;
use crate::color::Color;
use crate::error::{Error, Result, positive_seconds};
use crate::settings::Settings;

/// Stable identifier of a projectile within its manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u64);

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Flight lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    Flying,
    /// Terminal: reached the end of the arc
    Arrived,
}

/// Timing parameters shared by every projectile of a manager
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightTiming {
    /// Seconds from launch to arrival
    pub duration: f64,
    /// Minimum flight time between two trail particles
    pub trail_spawn_interval: f64,
    /// Lifespan given to emitted trail particles
    pub trail_lifespan: f64,
}

impl FlightTiming {
    pub fn new(duration: f64, trail_spawn_interval: f64, trail_lifespan: f64) -> Result<Self> {
        Ok(Self {
            duration: positive_seconds(duration, Error::InvalidDuration)?,
            trail_spawn_interval: positive_seconds(
                trail_spawn_interval,
                Error::InvalidTrailInterval,
            )?,
            trail_lifespan: positive_seconds(trail_lifespan, Error::InvalidLifespan)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.flight_duration,
            settings.trail_spawn_interval,
            settings.trail_lifespan,
        )
    }
}

/// What a single projectile tick produced
#[derive(Debug, Clone, Default)]
pub struct ProjectileUpdate {
    /// Trail particle emitted this tick, if the spawn interval elapsed
    pub trail: Option<TrailParticle>,
    /// True only on the tick that completed the flight
    pub arrived: bool,
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub arc: FlightArc,
    pub color: Color,
    /// Clock time of launch (seconds)
    pub start_time: f64,
    pub timing: FlightTiming,
    /// Flight time (since launch) of the last trail emission
    last_trail_elapsed: f64,
    /// Progress in [0, 1] as of the last tick
    progress: f64,
    /// Position as of the last tick
    position: GeoPoint,
    phase: FlightPhase,
}

impl Projectile {
    pub fn new(
        id: ProjectileId,
        arc: FlightArc,
        color: Color,
        start_time: f64,
        timing: FlightTiming,
    ) -> Self {
        Self {
            id,
            position: arc.start,
            arc,
            color,
            start_time,
            timing,
            last_trail_elapsed: 0.0,
            progress: 0.0,
            phase: FlightPhase::Flying,
        }
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[inline]
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    #[inline]
    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    #[inline]
    pub fn is_arrived(&self) -> bool {
        self.phase == FlightPhase::Arrived
    }

    /// Clock time at which the flight completes
    #[inline]
    pub fn arrival_time(&self) -> f64 {
        self.start_time + self.timing.duration
    }

    /// Progress the flight would have at `now`, clamped to [0, 1]
    pub fn progress_at(&self, now: f64) -> f64 {
        if now >= self.arrival_time() {
            return 1.0;
        }
        crate::clamp_unit((now - self.start_time) / self.timing.duration)
    }

    /// Advance to `now`. Once Arrived this is a no-op, so the arrival
    /// notification fires exactly once.
    pub fn tick(&mut self, now: f64) -> ProjectileUpdate {
        if self.is_arrived() {
            return ProjectileUpdate::default();
        }

        let elapsed = (now - self.start_time).max(0.0);
        let t = self.progress_at(now);
        self.progress = t;
        self.position = self.arc.point_at(t as f32);

        let mut update = ProjectileUpdate::default();

        if elapsed - self.last_trail_elapsed > self.timing.trail_spawn_interval {
            self.last_trail_elapsed = elapsed;
            update.trail = Some(TrailParticle {
                source: self.id,
                position: self.position,
                color: self.color,
                birth_time: now,
                lifespan: self.timing.trail_lifespan,
            });
        }

        if t >= 1.0 {
            self.phase = FlightPhase::Arrived;
            update.arrived = true;
        }

        update
    }
}
