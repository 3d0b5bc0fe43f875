//! Globe Arcs headless demo
//!
//! Launches the demo volley (North America -> Australia), drives the manager
//! with a simulated 60 Hz display clock until every projectile has landed and
//! every trail has faded, then prints a JSON run summary.
//!
//! Usage: `globe-arcs [settings.json] [count]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use serde::Serialize;

    use globe_arcs::consts::{DEMO_DESTINATION, DEMO_SOURCE, FRAME_DT};
    use globe_arcs::renderer::{Frame, FrameStats};
    use globe_arcs::sim::{LatLon, ProjectileManager};
    use globe_arcs::{Result, Settings};

    /// Safety net against a non-terminating run (ten minutes of frames)
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Projectiles in the demo volley when no count is given
    const DEFAULT_COUNT: usize = 10;

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        spawned: usize,
        arrived: usize,
        trails_emitted: usize,
        frames: u64,
        simulated_seconds: f64,
        peak: FrameStats,
    }

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let count = match args.next() {
            Some(arg) => arg.parse().unwrap_or_else(|e| {
                log::warn!(
                    "Ignoring invalid count {:?} ({}), launching {}",
                    arg,
                    e,
                    DEFAULT_COUNT
                );
                DEFAULT_COUNT
            }),
            None => DEFAULT_COUNT,
        };

        log::info!(
            "Flight {:.1}s, arc height {:.2}, trail every {:.2}s fading over {:.2}s",
            settings.flight_duration,
            settings.arc_height,
            settings.trail_spawn_interval,
            settings.trail_lifespan
        );

        let seed = settings.seed;
        let mut manager = ProjectileManager::new(settings)?;
        let ids = manager.spawn_scatter(
            count,
            LatLon::from(DEMO_SOURCE),
            LatLon::from(DEMO_DESTINATION),
        )?;

        let mut arrived = 0;
        let mut trails_emitted = 0;
        let mut peak = FrameStats::default();
        let mut frames = 0;

        while !manager.is_idle() && frames < MAX_FRAMES {
            frames += 1;
            let now = frames as f64 * FRAME_DT;
            let report = manager.tick(now);
            arrived += report.arrived.len();
            trails_emitted += report.trails_emitted;

            let stats = Frame::build(&manager).stats();
            peak.projectiles = peak.projectiles.max(stats.projectiles);
            peak.trails = peak.trails.max(stats.trails);

            if frames % 60 == 0 {
                log::info!(
                    "t={:.1}s: {} in flight, {} trail particles",
                    now,
                    stats.projectiles,
                    stats.trails
                );
            }
        }

        if !manager.is_idle() {
            log::warn!("Stopped after {} frames with work remaining", frames);
        }

        let summary = RunSummary {
            seed,
            spawned: ids.len(),
            arrived,
            trails_emitted,
            frames,
            simulated_seconds: manager.now(),
            peak,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Globe Arcs (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build embeds the library directly; there is no binary entry point
}
