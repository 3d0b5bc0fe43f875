//! Per-frame marker lists handed to the renderer

use serde::Serialize;

use super::marker::MarkerInstance;
use crate::consts::{PROJECTILE_MARKER_SIZE, TRAIL_MARKER_SIZE};
use crate::sim::{FlightArc, ProjectileManager};

/// Everything the renderer draws for one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Opaque projectile markers, live-set order
    pub projectiles: Vec<MarkerInstance>,
    /// Fading trail markers, emission order
    pub trails: Vec<MarkerInstance>,
}

/// Counts for logging and summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameStats {
    pub projectiles: usize,
    pub trails: usize,
}

impl Frame {
    /// Build the frame from the manager state after its most recent tick
    pub fn build(manager: &ProjectileManager) -> Self {
        let now = manager.now();

        let projectiles = manager
            .snapshot()
            .iter()
            .map(|p| {
                MarkerInstance::new(p.position(), PROJECTILE_MARKER_SIZE, p.color.to_rgba(1.0))
            })
            .collect();

        let trails = manager
            .trails()
            .iter()
            .map(|t| {
                MarkerInstance::new(
                    t.position,
                    TRAIL_MARKER_SIZE,
                    t.color.to_rgba(t.visible_opacity(now)),
                )
            })
            .collect();

        Self { projectiles, trails }
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            projectiles: self.projectiles.len(),
            trails: self.trails.len(),
        }
    }

    /// All markers in draw order: trails first so projectiles sit on top
    pub fn instances(&self) -> Vec<MarkerInstance> {
        let mut all = Vec::with_capacity(self.trails.len() + self.projectiles.len());
        all.extend_from_slice(&self.trails);
        all.extend_from_slice(&self.projectiles);
        all
    }
}

/// Line-strip vertices (xyz) tracing an arc, for optional path drawing
pub fn arc_path(arc: &FlightArc, segments: usize) -> Vec<[f32; 3]> {
    arc.sample(segments.max(1) + 1)
        .into_iter()
        .map(|p| p.to_array())
        .collect()
}
