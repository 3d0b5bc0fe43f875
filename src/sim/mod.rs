//! Frame-clock simulation module
//!
//! All projectile and trail logic lives here. This module must stay pure and
//! deterministic:
//! - Driven only by the `now` value passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the live set)
//! - No rendering or platform dependencies

pub mod arc;
pub mod geo;
pub mod manager;
pub mod projectile;
pub mod spawn;
pub mod tick;
pub mod trail;

pub use arc::FlightArc;
pub use geo::{GeoPoint, LatLon, lat_lon_to_vec3};
pub use manager::ProjectileManager;
pub use projectile::{FlightPhase, FlightTiming, Projectile, ProjectileId, ProjectileUpdate};
pub use spawn::{RngState, SpawnRequest, scatter_around};
pub use tick::TickReport;
pub use trail::TrailParticle;
