use bevy::prelude::*;
use constants::voxel::{GRID_SIZE, MODEL_SIZE};

use crate::engine::loading::manifest_loader::{ModelCatalog, SlotStatus};
use crate::engine::loading::model_loader::ModelSurfaces;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::voxel::library::VoxelLibrary;
use crate::engine::voxel::voxelizer::voxelize;

/// Voxelize one model per update. Sampling a 9-unit box at quarter-unit
/// resolution takes a visible moment per model, so the work is spread across
/// frames instead of stalling the window.
pub fn voxelize_next_model(
    mut loading_progress: ResMut<LoadingProgress>,
    catalog: Res<ModelCatalog>,
    surfaces: Res<ModelSurfaces>,
    mut library: ResMut<VoxelLibrary>,
) {
    if loading_progress.voxelization_complete {
        return;
    }

    for (index, slot) in catalog.slots.iter().enumerate() {
        if slot.status != SlotStatus::Ready || library.sets[index].is_some() {
            continue;
        }
        let Some(slot_surfaces) = surfaces.per_slot[index].as_ref() else {
            continue;
        };

        let set = voxelize(slot_surfaces, GRID_SIZE, MODEL_SIZE);
        if set.is_empty() {
            warn!("Voxelization of '{}' produced no voxels", slot.name);
        } else {
            info!("✓ Voxelized '{}' into {} voxels", slot.name, set.len());
        }
        library.sets[index] = Some(set);
        return;
    }

    info!(
        "✓ Voxelization complete, cloud needs {} instances",
        library.max_count()
    );
    loading_progress.voxelization_complete = true;
}
