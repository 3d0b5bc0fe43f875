//! Trail particles: fading markers dropped behind a projectile
//!
//! A particle snapshots its position when emitted and never follows the
//! projectile afterwards. Opacity decays linearly from 1 to 0 over its
//! lifespan; once the age ratio reaches 1 the owner drops it.

use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::projectile::ProjectileId;
use crate::color::Color;
use crate::error::{Error, Result, positive_seconds};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailParticle {
    /// Projectile that emitted this particle
    pub source: ProjectileId,
    pub position: GeoPoint,
    pub color: Color,
    /// Clock time of emission (seconds)
    pub birth_time: f64,
    /// Seconds until fully transparent
    pub lifespan: f64,
}

impl TrailParticle {
    pub fn new(
        source: ProjectileId,
        position: GeoPoint,
        color: Color,
        birth_time: f64,
        lifespan: f64,
    ) -> Result<Self> {
        let lifespan = positive_seconds(lifespan, Error::InvalidLifespan)?;
        Ok(Self {
            source,
            position,
            color,
            birth_time,
            lifespan,
        })
    }

    /// Age as a fraction of the lifespan (unclamped)
    #[inline]
    pub fn age_ratio(&self, now: f64) -> f64 {
        (now - self.birth_time) / self.lifespan
    }

    /// Raw `1 - age_ratio`; goes negative past expiry
    #[inline]
    pub fn opacity(&self, now: f64) -> f64 {
        1.0 - self.age_ratio(now)
    }

    /// Opacity clamped into [0, 1] for rendering
    #[inline]
    pub fn visible_opacity(&self, now: f64) -> f32 {
        crate::clamp_unit(self.opacity(now)) as f32
    }

    /// Whether the particle has fully faded and should be removed
    #[inline]
    pub fn is_expired(&self, now: f64) -> bool {
        self.age_ratio(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn particle(birth: f64, lifespan: f64) -> TrailParticle {
        TrailParticle::new(ProjectileId(1), Vec3::ONE, Color::CYAN, birth, lifespan).unwrap()
    }

    #[test]
    fn test_linear_fade() {
        let p = particle(10.0, 0.5);
        assert_eq!(p.opacity(10.0), 1.0);
        assert!((p.opacity(10.25) - 0.5).abs() < 1e-12);
        assert!(!p.is_expired(10.49));
        assert!(p.is_expired(10.5));
        assert!(p.opacity(10.5) <= 0.0);
    }

    #[test]
    fn test_visible_opacity_is_clamped() {
        let p = particle(1.0, 0.5);
        assert_eq!(p.visible_opacity(3.0), 0.0);
        // A clock reading before birth never exceeds full opacity
        assert_eq!(p.visible_opacity(0.0), 1.0);
    }

    #[test]
    fn test_invalid_lifespan() {
        for lifespan in [0.0, -0.5, f64::NAN] {
            assert!(matches!(
                TrailParticle::new(ProjectileId(1), Vec3::ZERO, Color::CYAN, 0.0, lifespan),
                Err(Error::InvalidLifespan(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn prop_opacity_non_increasing(
            birth in 0.0f64..100.0,
            lifespan in 0.01f64..5.0,
            a in 0.0f64..10.0,
            b in 0.0f64..10.0,
        ) {
            let p = particle(birth, lifespan);
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(p.opacity(birth + late) <= p.opacity(birth + early));
            if late >= lifespan + 1e-6 {
                prop_assert!(p.is_expired(birth + late));
                prop_assert!(p.opacity(birth + late) <= 1e-9);
            }
        }
    }
}
