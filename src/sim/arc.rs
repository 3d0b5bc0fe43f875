//! Flight arc geometry
//!
//! A flight arc is a single cubic Bézier segment between two points on the
//! globe:
//! - start, end: the endpoints on the surface
//! - control1, control2: the endpoints pushed along the shared midpoint
//!   direction, then rescaled onto the sphere of radius `|start| + arc_height`
//!
//! Progress along the arc is linear in the Bézier parameter, not in arc length.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use crate::error::{Error, Result};

/// Below this length `start + end` is treated as antipodal
const ANTIPODAL_EPSILON: f32 = 1e-4;

/// A curved flight path bulging away from the globe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightArc {
    pub start: GeoPoint,
    pub control1: GeoPoint,
    pub control2: GeoPoint,
    pub end: GeoPoint,
}

impl FlightArc {
    /// Build the arc between two surface points. Both endpoints are assumed
    /// to lie at the same distance from the globe center.
    pub fn new(start: GeoPoint, end: GeoPoint, arc_height: f32) -> Result<Self> {
        if !(arc_height.is_finite() && arc_height >= 0.0) {
            return Err(Error::InvalidArcHeight(arc_height));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(Error::DegenerateGeometry("non-finite endpoint"));
        }
        let radius = start.length();
        if radius <= f32::EPSILON || end.length() <= f32::EPSILON {
            return Err(Error::DegenerateGeometry("endpoint at the globe center"));
        }

        let lift = mid_direction(start, end) * arc_height;
        let control_radius = radius + arc_height;

        Ok(Self {
            start,
            control1: (start + lift).normalize_or_zero() * control_radius,
            control2: (end + lift).normalize_or_zero() * control_radius,
            end,
        })
    }

    /// Evaluate the curve at `t` (clamped to [0, 1]).
    /// Exactly `start` at 0 and exactly `end` at 1.
    pub fn point_at(&self, t: f32) -> GeoPoint {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        self.start * b0 + self.control1 * b1 + self.control2 * b2 + self.end * b3
    }

    /// First derivative at `t`, for orienting markers along the path
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        (self.control1 - self.start) * (3.0 * u * u)
            + (self.control2 - self.control1) * (6.0 * u * t)
            + (self.end - self.control2) * (3.0 * t * t)
    }

    /// Evenly spaced (in t) points along the arc, endpoints included
    pub fn sample(&self, num_points: usize) -> Vec<GeoPoint> {
        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                self.point_at(t)
            })
            .collect()
    }
}

/// Unit direction halfway between the endpoints.
///
/// For (near-)antipodal endpoints the sum vanishes; fall back to the part of
/// +Y perpendicular to `start` (or +X when `start` sits on the polar axis) so
/// the arc still bulges outward in a consistent plane.
fn mid_direction(start: Vec3, end: Vec3) -> Vec3 {
    let sum = start + end;
    if sum.length() > ANTIPODAL_EPSILON * start.length() {
        return sum.normalize();
    }

    log::debug!("Antipodal arc endpoints, using perpendicular fallback");
    let axis = start.normalize();
    let perpendicular = |v: Vec3| v - axis * axis.dot(v);
    let candidate = perpendicular(Vec3::Y);
    if candidate.length_squared() > ANTIPODAL_EPSILON {
        candidate.normalize()
    } else {
        perpendicular(Vec3::X).normalize()
    }
}
