use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::pbr::PointLightShadowMap;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use constants::camera::{MAIN_FAR, MAIN_FOV_DEGREES, MAIN_NEAR};
use constants::render_settings::{AMBIENT_BRIGHTNESS, FPS_FONT_SIZE, SHADOW_MAP_SIZE};

// Crate engine modules
use crate::engine::camera::orbit_camera::{MainCamera, OrbitCamera, camera_controller};
use crate::engine::camera::preview_camera::{
    PreviewLayout, create_preview_cameras, update_preview_cameras, update_preview_viewports,
};
use crate::engine::loading::manifest_loader::{
    ManifestLoader, ModelCatalog, ModelManifest, load_manifest_system, start_loading,
};
use crate::engine::loading::model_loader::{
    ModelSurfaces, check_model_loading, extract_model_surfaces,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::voxel_builder::voxelize_next_model;
use crate::engine::morph::transition::{
    ModelSelected, advance_color_tweens, advance_count_tween, advance_position_tweens,
    advance_turn_tween, start_transition,
};
use crate::engine::morph::voxel_cloud::spawn_voxel_cloud;
use crate::engine::scene::lighting::{spawn_lighting, track_camera_rotation};
use crate::engine::voxel::library::VoxelLibrary;

// Crate tools modules
use crate::tools::selector::{
    SelectorState, handle_model_selection, spawn_active_highlight, update_active_highlight,
};
use crate::tools::status_text::{clear_status_text, show_voxelizing_status, spawn_status_text};

use crate::engine::core::window_config::create_window_config;

// Transitions
use crate::engine::core::app_state::{AppState, transition_to_running, transition_to_voxelizing};

use crate::engine::systems::fps_tracking::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ModelManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ModelManifest>::new(&["json"]))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        })
        .insert_resource(PointLightShadowMap {
            size: SHADOW_MAP_SIZE,
        });

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<ModelCatalog>()
        .init_resource::<ModelSurfaces>()
        .init_resource::<VoxelLibrary>()
        .init_resource::<OrbitCamera>()
        .init_resource::<PreviewLayout>()
        .init_resource::<SelectorState>()
        .add_event::<ModelSelected>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, spawn_status_text, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                check_model_loading,
                extract_model_surfaces,
                create_preview_cameras,
                transition_to_voxelizing,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Voxelizing), show_voxelizing_status)
        .add_systems(
            Update,
            (voxelize_next_model, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Voxelizing)),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (clear_status_text, spawn_active_highlight, spawn_voxel_cloud),
        );

    // Camera and viewport upkeep runs in every state so the scene keeps
    // turning while models load.
    app.add_systems(
        Update,
        (
            camera_controller,
            track_camera_rotation,
            update_preview_viewports,
            update_preview_cameras,
        )
            .chain(),
    );

    // Runtime systems - only run when everything is ready
    let runtime_systems = (
        handle_model_selection,
        update_active_highlight,
        start_transition,
        advance_position_tweens,
        advance_color_tweens,
        advance_turn_tween,
        advance_count_tween,
    );

    app.add_systems(
        Update,
        runtime_systems
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: MAIN_FOV_DEGREES.to_radians(),
            near: MAIN_NEAR,
            far: MAIN_FAR,
            ..default()
        }),
        Transform::from_translation(orbit.eye()).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    spawn_lighting(&mut commands, meshes.as_mut(), materials.as_mut());

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: FPS_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
