//! Render hand-off
//!
//! The core does not draw. Each frame it produces instanced sphere markers
//! (position, size, RGBA) that the GPU collaborator uploads as-is.

pub mod frame;
pub mod marker;

pub use frame::{Frame, FrameStats, arc_path};
pub use marker::MarkerInstance;
