use bevy::prelude::*;

use crate::engine::loading::manifest_loader::ModelCatalog;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Voxelizing,
    Running,
}

// Transition to Voxelizing once every resolved model has its surfaces pulled
// out of the loaded scenes.
pub fn transition_to_voxelizing(
    loading_progress: Res<LoadingProgress>,
    catalog: Res<ModelCatalog>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.slots_resolved
        && loading_progress.surfaces_extracted >= catalog.ready_count()
    {
        println!("→ Transitioning to Voxelizing state");
        next_state.set(AppState::Voxelizing);
    }
}

// Final transition to running state
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.voxelization_complete {
        println!("→ All voxel sets ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
