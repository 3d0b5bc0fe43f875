//! Geodesic mapping: latitude/longitude to points on the globe
//!
//! Spherical convention matches the globe texture: polar angle measured from
//! +Y, azimuth measured from +Z toward +X, with longitude shifted by -90° so
//! the lon=0 seam lines up with the texture seam.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A Cartesian point on (or above) the globe
pub type GeoPoint = Vec3;

/// Longitude offset aligning lon=0 with the texture seam
const LON_OFFSET_DEGREES: f32 = -90.0;

/// A validated geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f32,
    pub lon: f32,
}

impl LatLon {
    /// Build a coordinate, rejecting lat outside [-90, 90] or lon outside [-180, 180]
    pub fn new(lat: f32, lon: f32) -> Result<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Ok(Self { lat, lon })
        } else {
            Err(Error::InvalidCoordinate { lat, lon })
        }
    }

    /// Cartesian point at `radius` from the globe center
    pub fn to_cartesian(&self, radius: f32) -> Result<GeoPoint> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidRadius(radius));
        }
        Ok(lat_lon_to_vec3(self.lat, self.lon, radius))
    }
}

impl From<(f32, f32)> for LatLon {
    /// Unchecked conversion for compile-time constants; use [`LatLon::new`] for input
    fn from((lat, lon): (f32, f32)) -> Self {
        Self { lat, lon }
    }
}

/// Convert (lat, lon, radius) to a Cartesian point. Pure and unchecked.
#[inline]
pub fn lat_lon_to_vec3(lat: f32, lon: f32, radius: f32) -> GeoPoint {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0 + LON_OFFSET_DEGREES).to_radians();
    spherical_to_cartesian(radius, phi, theta)
}

/// (radius, polar angle from +Y, azimuth from +Z) to Cartesian
#[inline]
pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_radius = phi.sin() * radius;
    Vec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}
