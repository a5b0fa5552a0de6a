use bevy::gltf::Gltf;
use bevy::prelude::*;
use serde::Deserialize;

use crate::engine::loading::model_loader::ModelSurfaces;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::voxel::library::VoxelLibrary;

/// Asset describing which models the demo shows. Lives at
/// `assets/models.json` and is parsed through `bevy_common_assets`.
#[derive(Asset, TypePath, Clone, Debug, Deserialize)]
pub struct ModelManifest {
    pub models: Vec<ModelEntry>,
    /// Slot shown first, before any selection happens.
    #[serde(default)]
    pub initial_model: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Pending,
    Ready,
    Failed,
}

/// One model of the catalog and everything the loader tracks about it.
pub struct ModelSlot {
    pub name: String,
    pub gltf: Handle<Gltf>,
    pub status: SlotStatus,
    /// Root entity of the spawned preview scene, once the glTF arrived.
    pub preview_root: Option<Entity>,
    pub surfaces_extracted: bool,
}

#[derive(Resource, Default)]
pub struct ModelCatalog {
    pub slots: Vec<ModelSlot>,
    /// Index of the currently shown model.
    pub active: usize,
}

impl ModelCatalog {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.status == SlotStatus::Ready)
            .count()
    }
}

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<ModelManifest>>,
}

/// Kick off the manifest download.
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading model manifest");
    manifest_loader.handle = Some(asset_server.load("models.json"));
}

/// Build the model catalog once the manifest arrives and start loading every
/// glTF it lists.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut catalog: ResMut<ModelCatalog>,
    mut surfaces: ResMut<ModelSurfaces>,
    mut library: ResMut<VoxelLibrary>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<ModelManifest>>,
) {
    if loading_progress.manifest_loaded {
        return;
    }

    let Some(ref handle) = manifest_loader.handle else {
        return;
    };
    let Some(manifest) = manifests.get(handle) else {
        return;
    };

    info!("✓ Model manifest loaded ({} models)", manifest.models.len());

    catalog.slots = manifest
        .models
        .iter()
        .map(|entry| ModelSlot {
            name: entry.name.clone(),
            gltf: asset_server.load(&entry.path),
            status: SlotStatus::Pending,
            preview_root: None,
            surfaces_extracted: false,
        })
        .collect();
    catalog.active = manifest.initial_model.min(catalog.len().saturating_sub(1));
    surfaces.reset(catalog.len());
    library.reset(catalog.len());

    loading_progress.manifest_loaded = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_parses_from_json() {
        let manifest: ModelManifest = serde_json::from_str(
            r#"{
                "models": [
                    { "name": "Bonsai", "path": "models/bonsai.glb" },
                    { "name": "Egg", "path": "models/egg.glb" }
                ],
                "initial_model": 1
            }"#,
        )
        .expect("manifest should deserialize");
        assert_eq!(manifest.models.len(), 2);
        assert_eq!(manifest.models[0].name, "Bonsai");
        assert_eq!(manifest.initial_model, 1);
    }

    #[test]
    fn initial_model_defaults_to_zero() {
        let manifest: ModelManifest = serde_json::from_str(
            r#"{ "models": [ { "name": "Egg", "path": "models/egg.glb" } ] }"#,
        )
        .expect("manifest should deserialize");
        assert_eq!(manifest.initial_model, 0);
    }
}
