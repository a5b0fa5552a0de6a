use bevy::prelude::*;
use constants::render_settings::{
    FILL_SPOT_INTENSITY, GROUND_PLANE_SIZE, GROUND_PLANE_Y, SPOT_RANGE, TOP_SPOT_INTENSITY,
};

use crate::engine::camera::orbit_camera::MainCamera;

/// Group holding the spot lights and the shadow plane. Its rotation copies
/// the main camera every frame, so the cloud is always lit from the viewer's
/// side no matter how far the orbit has wandered.
#[derive(Component)]
pub struct LightRig;

pub fn spawn_lighting(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands
        .spawn((LightRig, Transform::default(), Visibility::default()))
        .with_children(|rig| {
            rig.spawn((
                SpotLight {
                    intensity: TOP_SPOT_INTENSITY,
                    range: SPOT_RANGE,
                    shadows_enabled: true,
                    ..default()
                },
                Transform::from_xyz(0.0, 15.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
            ));
            rig.spawn((
                SpotLight {
                    intensity: FILL_SPOT_INTENSITY,
                    range: SPOT_RANGE,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_xyz(0.0, -4.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
            ));
            // Shadow catcher under the cloud. It rides in the rig so the
            // shadow stays oriented to the view, like the lights.
            rig.spawn((
                Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_PLANE_SIZE, GROUND_PLANE_SIZE))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.93, 0.93, 0.93),
                    perceptual_roughness: 1.0,
                    ..default()
                })),
                Transform::from_xyz(0.0, GROUND_PLANE_Y, 0.0),
            ));
        });
}

/// Copy the main camera's orientation onto the rig.
pub fn track_camera_rotation(
    mut rig_query: Query<&mut Transform, With<LightRig>>,
    camera_query: Query<&Transform, (With<MainCamera>, Without<LightRig>)>,
) {
    let (Ok(mut rig_transform), Ok(camera_transform)) =
        (rig_query.single_mut(), camera_query.single())
    else {
        return;
    };
    rig_transform.rotation = camera_transform.rotation;
}
