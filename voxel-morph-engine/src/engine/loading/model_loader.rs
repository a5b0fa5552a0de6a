use bevy::asset::RecursiveDependencyLoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::voxel::PREVIEW_MODEL_SIZE;

use crate::engine::camera::preview_camera::preview_layer;
use crate::engine::loading::manifest_loader::{ModelCatalog, SlotStatus};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::voxel::bounds::Bounds;
use crate::engine::voxel::surface::SurfaceMesh;

/// Root of one model's spawned preview scene.
#[derive(Component)]
pub struct PreviewModel {
    pub index: usize,
}

/// Extracted triangle surfaces per catalog slot, the voxelizer's input.
#[derive(Resource, Default)]
pub struct ModelSurfaces {
    pub per_slot: Vec<Option<Vec<SurfaceMesh>>>,
}

impl ModelSurfaces {
    pub fn reset(&mut self, slot_count: usize) {
        self.per_slot = vec![None; slot_count];
    }
}

/// Poll glTF downloads. A finished model gets its preview scene spawned; a
/// failed one is logged and skipped for the rest of the session.
pub fn check_model_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    mut catalog: ResMut<ModelCatalog>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    mut commands: Commands,
) {
    if loading_progress.slots_resolved || catalog.is_empty() {
        return;
    }

    for (index, slot) in catalog.slots.iter_mut().enumerate() {
        if slot.status != SlotStatus::Pending {
            continue;
        }

        match asset_server.recursive_dependency_load_state(&slot.gltf) {
            RecursiveDependencyLoadState::Loaded => {
                let Some(gltf) = gltf_assets.get(&slot.gltf) else {
                    continue;
                };
                let Some(scene) = gltf
                    .default_scene
                    .clone()
                    .or_else(|| gltf.scenes.first().cloned())
                else {
                    error!("✗ Model '{}' contains no scenes, skipping", slot.name);
                    slot.status = SlotStatus::Failed;
                    continue;
                };

                info!("✓ Model '{}' loaded", slot.name);
                // Hidden until the surfaces are measured and the preview
                // transform is normalized.
                let root = commands
                    .spawn((
                        PreviewModel { index },
                        SceneRoot(scene),
                        Transform::default(),
                        Visibility::Hidden,
                        preview_layer(index),
                    ))
                    .id();
                slot.preview_root = Some(root);
                slot.status = SlotStatus::Ready;
            }
            RecursiveDependencyLoadState::Failed(err) => {
                error!("✗ Model '{}' failed to load: {err}", slot.name);
                slot.status = SlotStatus::Failed;
            }
            _ => {}
        }
    }

    if catalog
        .slots
        .iter()
        .all(|slot| slot.status != SlotStatus::Pending)
    {
        let ready = catalog.ready_count();
        if ready == 0 {
            warn!("No models could be loaded; the cloud will stay empty");
        } else {
            info!("✓ {ready}/{} models resolved", catalog.len());
        }
        loading_progress.slots_resolved = true;
    }
}

/// Walk freshly spawned preview scenes, flatten their meshes into triangle
/// soups and normalize the preview to a fixed bounding-box diagonal.
pub fn extract_model_surfaces(
    mut loading_progress: ResMut<LoadingProgress>,
    mut catalog: ResMut<ModelCatalog>,
    mut surfaces: ResMut<ModelSurfaces>,
    children_query: Query<&Children>,
    mesh_query: Query<(&Mesh3d, &MeshMaterial3d<StandardMaterial>, &GlobalTransform)>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    for (index, slot) in catalog.slots.iter_mut().enumerate() {
        if slot.status != SlotStatus::Ready || slot.surfaces_extracted {
            continue;
        }
        let Some(root) = slot.preview_root else {
            continue;
        };

        let mesh_entities: Vec<Entity> = children_query
            .iter_descendants(root)
            .filter(|entity| mesh_query.contains(*entity))
            .collect();
        // Scene instances spawn a frame after the asset reports loaded.
        if mesh_entities.is_empty() {
            continue;
        }

        let mut extracted = Vec::new();
        for &entity in &mesh_entities {
            let Ok((mesh3d, material3d, transform)) = mesh_query.get(entity) else {
                continue;
            };
            let Some(mesh) = meshes.get(&mesh3d.0) else {
                continue;
            };

            let mut base_color = Color::WHITE;
            if let Some(material) = materials.get_mut(&material3d.0) {
                // Interior faces count in the parity test, and the preview
                // should show them too.
                material.double_sided = true;
                material.cull_mode = None;
                base_color = material.base_color;
            }

            if let Some(surface) = SurfaceMesh::from_mesh(mesh, transform, base_color) {
                extracted.push(surface);
            }
        }

        let bounds = Bounds::from_points(
            extracted
                .iter()
                .flat_map(|surface| surface.triangles.iter().flatten().copied()),
        );
        if bounds.is_empty() || bounds.diagonal() <= f32::EPSILON {
            warn!("Model '{}' has no usable geometry, skipping", slot.name);
            slot.status = SlotStatus::Failed;
            commands.entity(root).despawn();
            slot.preview_root = None;
            continue;
        }

        let factor = PREVIEW_MODEL_SIZE / bounds.diagonal();
        commands.entity(root).insert((
            Transform {
                translation: -bounds.center() * factor,
                scale: Vec3::splat(factor),
                ..default()
            },
            Visibility::Visible,
        ));
        // Render layers don't propagate through scene hierarchies; tag every
        // mesh so only this model's preview camera picks it up.
        for &entity in &mesh_entities {
            commands.entity(entity).insert(preview_layer(index));
        }

        info!(
            "✓ Extracted {} surface meshes from '{}'",
            extracted.len(),
            slot.name
        );
        surfaces.per_slot[index] = Some(extracted);
        slot.surfaces_extracted = true;
        loading_progress.surfaces_extracted += 1;
    }
}
