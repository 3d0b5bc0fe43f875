//! Projectile manager: owns the live set and the trail pool
//!
//! The live set is kept in insertion order and is only mutated at tick
//! boundaries or through explicit spawn/remove/clear calls.

use rand_pcg::Pcg32;

use super::arc::FlightArc;
use super::geo::LatLon;
use super::projectile::{FlightTiming, Projectile, ProjectileId};
use super::spawn::{RngState, SpawnRequest, scatter_request};
use super::trail::TrailParticle;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Upper bound on the up-front allocation for a scatter batch
const SCATTER_PREALLOC: usize = 1024;

/// Owner of every in-flight projectile and every fading trail particle
#[derive(Debug, Clone)]
pub struct ProjectileManager {
    pub(super) settings: Settings,
    pub(super) timing: FlightTiming,
    /// Live set, insertion order
    pub(super) projectiles: Vec<Projectile>,
    /// Trail pool, emission order
    pub(super) trails: Vec<TrailParticle>,
    /// Clock value of the most recent tick
    pub(super) now: f64,
    /// Number of completed ticks
    pub(super) ticks: u64,
    rng: Pcg32,
    next_id: u64,
}

impl ProjectileManager {
    /// Create an empty manager; fails if the settings are invalid
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let timing = FlightTiming::from_settings(&settings)?;
        let rng = RngState::new(settings.seed).to_rng();
        Ok(Self {
            settings,
            timing,
            projectiles: Vec::new(),
            trails: Vec::new(),
            now: 0.0,
            ticks: 0,
            rng,
            next_id: 1,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Clock value of the most recent tick (0 before the first)
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Reserve `count` consecutive projectile IDs, returning the first.
    /// IDs are never reused, so running out is an error rather than a wrap.
    fn reserve_ids(&mut self, count: usize) -> Result<u64> {
        let first = self.next_id;
        self.next_id = u64::try_from(count)
            .ok()
            .and_then(|n| first.checked_add(n))
            .ok_or(Error::IdsExhausted)?;
        Ok(first)
    }

    fn check_capacity(&self, additional: usize) -> Result<()> {
        let Some(limit) = self.settings.max_live_projectiles else {
            return Ok(());
        };
        match self.projectiles.len().checked_add(additional) {
            Some(total) if total <= limit => Ok(()),
            _ => Err(Error::AtCapacity { limit }),
        }
    }

    /// Validate a request and build its arc without touching the live set
    fn build_arc(&self, request: &SpawnRequest) -> Result<FlightArc> {
        let radius = self.settings.sphere_radius;
        let from = LatLon::new(request.from.lat, request.from.lon)?.to_cartesian(radius)?;
        let to = LatLon::new(request.to.lat, request.to.lon)?.to_cartesian(radius)?;
        FlightArc::new(from, to, self.settings.arc_height)
    }

    fn insert(&mut self, id: ProjectileId, arc: FlightArc, color: Color) {
        self.projectiles
            .push(Projectile::new(id, arc, color, self.now, self.timing));
    }

    /// Launch a projectile from one coordinate to another. It starts flying
    /// at the current manager clock.
    pub fn spawn(
        &mut self,
        from_lat: f32,
        from_lon: f32,
        to_lat: f32,
        to_lon: f32,
        color: Color,
    ) -> Result<ProjectileId> {
        self.spawn_request(SpawnRequest {
            from: LatLon { lat: from_lat, lon: from_lon },
            to: LatLon { lat: to_lat, lon: to_lon },
            color,
        })
    }

    /// [`spawn`](Self::spawn) with a `#rrggbb` color string
    pub fn spawn_hex(
        &mut self,
        from_lat: f32,
        from_lon: f32,
        to_lat: f32,
        to_lon: f32,
        color: &str,
    ) -> Result<ProjectileId> {
        let color = Color::from_hex(color)?;
        self.spawn(from_lat, from_lon, to_lat, to_lon, color)
    }

    pub fn spawn_request(&mut self, request: SpawnRequest) -> Result<ProjectileId> {
        self.check_capacity(1)?;
        let arc = self.build_arc(&request)?;
        let id = ProjectileId(self.reserve_ids(1)?);
        self.insert(id, arc, request.color);
        log::debug!(
            "Spawned projectile {} ({:.1}, {:.1}) -> ({:.1}, {:.1}) color {} at t={:.3}",
            id,
            request.from.lat,
            request.from.lon,
            request.to.lat,
            request.to.lon,
            request.color,
            self.now
        );
        Ok(id)
    }

    /// Launch `count` projectiles from random points around `center`, each
    /// with a random color, all toward `destination`. All-or-nothing: on any
    /// error the live set is left untouched.
    pub fn spawn_scatter(
        &mut self,
        count: usize,
        center: LatLon,
        destination: LatLon,
    ) -> Result<Vec<ProjectileId>> {
        self.check_capacity(count)?;
        let center = LatLon::new(center.lat, center.lon)?;
        let destination = LatLon::new(destination.lat, destination.lon)?;

        let spread = self.settings.spawn_spread_degrees;
        // Capacity hint only; `count` is caller-controlled
        let mut prepared = Vec::with_capacity(count.min(SCATTER_PREALLOC));
        for _ in 0..count {
            let request = scatter_request(center, spread, destination, &mut self.rng);
            prepared.push((self.build_arc(&request)?, request.color));
        }

        let first = self.reserve_ids(prepared.len())?;
        let ids: Vec<_> = prepared
            .into_iter()
            .zip(first..)
            .map(|((arc, color), raw)| {
                let id = ProjectileId(raw);
                self.insert(id, arc, color);
                id
            })
            .collect();
        log::info!(
            "Spawned {} projectiles around ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            ids.len(),
            center.lat,
            center.lon,
            destination.lat,
            destination.lon
        );
        Ok(ids)
    }

    /// Cancel a projectile at a tick boundary. Its trail particles keep fading.
    pub fn remove(&mut self, id: ProjectileId) -> Option<Projectile> {
        let index = self.projectiles.iter().position(|p| p.id == id)?;
        log::debug!("Removed projectile {} before arrival", id);
        Some(self.projectiles.remove(index))
    }

    /// Hard reset: drop every projectile and trail particle
    pub fn clear(&mut self) {
        log::info!(
            "Clearing {} projectiles and {} trail particles",
            self.projectiles.len(),
            self.trails.len()
        );
        self.projectiles.clear();
        self.trails.clear();
    }

    /// Live set in insertion order, as of the most recent tick
    pub fn snapshot(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Live trail particles in emission order
    pub fn trails(&self) -> &[TrailParticle] {
        &self.trails
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// True when nothing is flying and every trail has faded
    pub fn is_idle(&self) -> bool {
        self.projectiles.is_empty() && self.trails.is_empty()
    }
}
