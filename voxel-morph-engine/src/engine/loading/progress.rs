use bevy::prelude::*;

/// Bookkeeping for the staged startup. The state machine in
/// `core::app_state` watches these flags.
#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    /// Every catalog slot has either loaded or failed.
    pub slots_resolved: bool,
    /// Triangle surfaces extracted, per loaded model.
    pub surfaces_extracted: usize,
    pub voxelization_complete: bool,
}
