//! Shared tunables for the voxel morph viewer.
//!
//! Everything that shapes the look of the demo lives here so the engine code
//! stays free of magic numbers: voxel grid settings, transition timings,
//! camera limits and the light rig.

pub mod animation;
pub mod camera;
pub mod render_settings;
pub mod voxel;
