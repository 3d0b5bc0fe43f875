//! Per-frame simulation tick
//!
//! One tick advances every live projectile exactly once with the same clock
//! value, ages the trail pool, then removes arrivals. Removal happens only
//! after the pass over the live set has finished.

use serde::Serialize;

use super::manager::ProjectileManager;
use super::projectile::ProjectileId;

/// Outcome of a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Projectiles that arrived (and were removed) this tick, in live-set order
    pub arrived: Vec<ProjectileId>,
    /// Trail particles emitted this tick
    pub trails_emitted: usize,
    /// Trail particles that faded out and were removed this tick
    pub trails_expired: usize,
}

impl ProjectileManager {
    /// Advance the simulation to clock value `now` (seconds).
    ///
    /// The clock must be finite and non-decreasing; an earlier or non-finite
    /// value is treated as the previous one.
    pub fn tick(&mut self, now: f64) -> TickReport {
        let now = if !now.is_finite() {
            log::warn!("Clock value {} is not finite, holding {:.4}", now, self.now);
            self.now
        } else if now < self.now {
            log::warn!(
                "Clock went backwards ({:.4} < {:.4}), holding previous value",
                now,
                self.now
            );
            self.now
        } else {
            now
        };
        self.now = now;
        self.ticks += 1;

        let mut report = TickReport::default();

        // Advance projectiles, collecting arrivals
        for projectile in self.projectiles.iter_mut() {
            let update = projectile.tick(now);
            if let Some(trail) = update.trail {
                self.trails.push(trail);
                report.trails_emitted += 1;
            }
            if update.arrived {
                report.arrived.push(projectile.id);
            }
        }

        // Age the trail pool (particles born this tick survive)
        let before = self.trails.len();
        self.trails.retain(|t| !t.is_expired(now));
        report.trails_expired = before - self.trails.len();

        // Remove arrivals now that iteration is complete
        if !report.arrived.is_empty() {
            self.projectiles.retain(|p| !p.is_arrived());
            for id in &report.arrived {
                log::debug!("Projectile {} arrived at t={:.3}", id, now);
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::consts::{DEMO_DESTINATION, DEMO_SOURCE};
    use crate::settings::Settings;
    use crate::sim::geo::LatLon;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn manager() -> ProjectileManager {
        ProjectileManager::new(Settings::default()).unwrap()
    }

    #[test]
    fn test_end_to_end_single_flight() {
        let mut m = manager();
        let id = m.spawn_hex(40.0, -100.0, -30.0, 140.0, "#00ffff").unwrap();

        for (now, expected) in [(0.0, 0.0), (1.0, 0.2), (2.0, 0.4), (3.0, 0.6), (4.0, 0.8)] {
            let report = m.tick(now);
            assert!(report.arrived.is_empty());
            let p = m.get(id).expect("still flying");
            assert!((p.progress() - expected).abs() < 1e-12, "t at now={now}");
        }

        let report = m.tick(5.0);
        assert_eq!(report.arrived, vec![id]);
        assert!(m.get(id).is_none());
        assert!(m.is_empty());

        // Later ticks never report it again
        assert!(m.tick(6.0).arrived.is_empty());
    }

    #[test]
    fn test_scatter_ten_then_tick() {
        let mut m = manager();
        let ids = m
            .spawn_scatter(10, DEMO_SOURCE.into(), DEMO_DESTINATION.into())
            .unwrap();
        m.tick(0.5);
        let live: HashSet<_> = m.snapshot().iter().map(|p| p.id).collect();
        assert_eq!(live.len(), 10);
        assert_eq!(live, ids.iter().copied().collect::<HashSet<_>>());
        for p in m.snapshot() {
            assert!(p.arc.start.is_finite() && p.arc.end.is_finite());
            assert!((p.progress() - 0.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_staggered_arrivals() {
        let mut m = manager();
        let first = m.spawn(0.0, 0.0, 10.0, 10.0, Color::CYAN).unwrap();
        m.tick(1.0);
        let second = m.spawn(0.0, 0.0, 20.0, 20.0, Color::CYAN).unwrap();
        assert_eq!(m.get(second).unwrap().start_time, 1.0);

        assert_eq!(m.tick(5.0).arrived, vec![first]);
        assert_eq!(m.snapshot().len(), 1);
        assert_eq!(m.tick(6.0).arrived, vec![second]);
        assert!(m.is_empty());
    }

    #[test]
    fn test_simultaneous_arrivals_keep_order() {
        let mut m = manager();
        let a = m.spawn(0.0, 0.0, 10.0, 10.0, Color::CYAN).unwrap();
        let b = m.spawn(5.0, 5.0, 10.0, 10.0, Color::CYAN).unwrap();
        let c = m.spawn(9.0, 9.0, 10.0, 10.0, Color::CYAN).unwrap();
        m.tick(1.0);
        m.remove(b);
        assert_eq!(m.tick(9.0).arrived, vec![a, c]);
    }

    #[test]
    fn test_trails_emitted_and_faded() {
        let mut m = manager();
        let id = m.spawn(0.0, 0.0, 10.0, 10.0, Color::new(255, 0, 0)).unwrap();

        assert_eq!(m.tick(0.0).trails_emitted, 0);
        let report = m.tick(0.1);
        assert_eq!(report.trails_emitted, 1);
        let trail = &m.trails()[0];
        assert_eq!(trail.source, id);
        assert_eq!(trail.birth_time, 0.1);
        assert_eq!(trail.color, Color::new(255, 0, 0));
        let snapshot_pos = trail.position;

        // Position is a snapshot: later flight does not move it
        m.tick(0.12);
        assert_eq!(m.trails()[0].position, snapshot_pos);

        // 0.1 + 0.5 lifespan: gone by 0.61
        let report = m.tick(0.61);
        assert!(report.trails_expired >= 1);
        assert!(m.trails().iter().all(|t| t.birth_time > 0.1));
    }

    #[test]
    fn test_trails_outlive_their_projectile() {
        let mut m = manager();
        m.spawn(0.0, 0.0, 10.0, 10.0, Color::CYAN).unwrap();
        m.tick(4.9);
        let report = m.tick(5.0);
        assert_eq!(report.arrived.len(), 1);
        assert!(m.is_empty());
        assert!(!m.trails().is_empty(), "trail keeps fading after arrival");
        assert!(!m.is_idle());

        m.tick(5.6);
        assert!(m.is_idle());
    }

    #[test]
    fn test_high_tick_rate_does_not_inflate_trails() {
        let mut m = manager();
        m.spawn(0.0, 0.0, 10.0, 10.0, Color::CYAN).unwrap();
        let mut emitted = 0;
        // 1000 Hz for one second of flight
        for i in 1..=1000 {
            emitted += m.tick(i as f64 * 0.001).trails_emitted;
        }
        assert!(emitted <= 20, "emitted {emitted}");
        assert!(emitted >= 15, "emitted {emitted}");
    }

    #[test]
    fn test_clock_going_backwards_is_held() {
        let mut m = manager();
        let id = m.spawn(0.0, 0.0, 10.0, 10.0, Color::CYAN).unwrap();
        m.tick(2.0);
        m.tick(1.0);
        assert_eq!(m.now(), 2.0);
        assert!((m.get(id).unwrap().progress() - 0.4).abs() < 1e-12);
        assert_eq!(m.tick_count(), 2);
    }

    #[test]
    fn test_non_finite_clock_is_held() {
        let mut m = manager();
        let first = m.spawn(0.0, 0.0, 10.0, 10.0, Color::CYAN).unwrap();
        m.tick(1.0);
        m.tick(f64::NAN);
        assert_eq!(m.now(), 1.0);
        let p = m.get(first).unwrap();
        assert!((p.progress() - 0.2).abs() < 1e-12);
        assert!(p.position().is_finite());

        // Spawned after the bad tick, it still launches at a real clock value
        let second = m.spawn(0.0, 0.0, 20.0, 20.0, Color::CYAN).unwrap();
        assert_eq!(m.get(second).unwrap().start_time, 1.0);
        m.tick(f64::INFINITY);
        m.tick(f64::NEG_INFINITY);
        assert_eq!(m.now(), 1.0);
        assert_eq!(m.tick_count(), 4);

        assert_eq!(m.tick(10.0).arrived, vec![first, second]);
        assert!(m.is_empty());
    }

    #[test]
    fn test_removed_mid_flight_never_reports_arrival() {
        let mut m = manager();
        let id = m.spawn(0.0, 0.0, 10.0, 10.0, Color::CYAN).unwrap();
        m.tick(1.0);
        assert!(m.remove(id).is_some());
        assert!(m.tick(10.0).arrived.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two managers with the same seed and clock produce identical state
        let mut m1 = manager();
        let mut m2 = manager();
        for m in [&mut m1, &mut m2] {
            m.spawn_scatter(4, DEMO_SOURCE.into(), DEMO_DESTINATION.into()).unwrap();
        }
        for i in 0..120 {
            let now = i as f64 / 60.0;
            assert_eq!(m1.tick(now), m2.tick(now));
        }
        assert_eq!(m1.trails().len(), m2.trails().len());
        for (a, b) in m1.snapshot().iter().zip(m2.snapshot()) {
            assert_eq!(a.position(), b.position());
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Spawn(f32, f32),
        Scatter(usize),
        Tick(f64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-90.0f32..=90.0, -180.0f32..=180.0).prop_map(|(lat, lon)| Op::Spawn(lat, lon)),
            (1usize..4).prop_map(Op::Scatter),
            (0.0f64..2.0).prop_map(Op::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_live_set_invariants(ops in proptest::collection::vec(op(), 1..60)) {
            let mut m = manager();
            let mut seen_arrivals = HashSet::new();
            let mut now = 0.0;
            for op in ops {
                match op {
                    Op::Spawn(lat, lon) => {
                        m.spawn(lat, lon, -30.0, 140.0, Color::CYAN).unwrap();
                    }
                    Op::Scatter(n) => {
                        m.spawn_scatter(n, LatLon::from(DEMO_SOURCE), LatLon::from(DEMO_DESTINATION)).unwrap();
                    }
                    Op::Tick(dt) => {
                        now += dt;
                        for id in m.tick(now).arrived {
                            prop_assert!(seen_arrivals.insert(id), "arrival reported twice");
                        }
                        for p in m.snapshot() {
                            prop_assert!((0.0..=1.0).contains(&p.progress()));
                            prop_assert!(!p.is_arrived());
                        }
                    }
                }
                let ids: HashSet<_> = m.snapshot().iter().map(|p| p.id).collect();
                prop_assert_eq!(ids.len(), m.len());
            }
        }
    }
}
