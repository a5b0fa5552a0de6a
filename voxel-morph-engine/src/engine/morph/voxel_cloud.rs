use bevy::prelude::*;
use constants::voxel::{BOX_SIZE, GRID_SIZE, SCATTER_LIGHTNESS, SCATTER_SATURATION};
use rand::Rng;

use crate::engine::loading::manifest_loader::ModelCatalog;
use crate::engine::morph::transition::ModelSelected;
use crate::engine::voxel::library::VoxelLibrary;

/// Root of the instance cloud. Yaw and visible count live here so tweens can
/// pick up from wherever the previous transition left them.
#[derive(Component)]
pub struct VoxelCloud {
    pub yaw: f32,
    pub visible: f32,
}

/// One cube of the cloud. The live color is cached here so tweens never have
/// to read it back out of the material assets.
#[derive(Component)]
pub struct VoxelInstance {
    pub index: usize,
    pub color: LinearRgba,
}

/// A coordinate in [-0.5, 0.5), snapped to the voxel grid.
pub fn scatter_coordinate(rng: &mut impl Rng) -> f32 {
    let v = rng.random::<f32>() - 0.5;
    v - v % GRID_SIZE
}

fn scatter_color(rng: &mut impl Rng) -> LinearRgba {
    LinearRgba::from(Color::hsl(
        rng.random_range(0.0..360.0),
        SCATTER_SATURATION,
        SCATTER_LIGHTNESS,
    ))
}

/// Spawn the cloud sized for the largest voxel set, scattered randomly, then
/// kick off the morph towards the initially active model.
pub fn spawn_voxel_cloud(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut catalog: ResMut<ModelCatalog>,
    library: Res<VoxelLibrary>,
    mut selections: EventWriter<ModelSelected>,
) {
    let count = library.max_count();
    if count == 0 {
        return;
    }

    let cube = meshes.add(Cuboid::new(BOX_SIZE, BOX_SIZE, BOX_SIZE));
    let mut rng = rand::rng();

    commands
        .spawn((
            VoxelCloud {
                yaw: 0.0,
                visible: count as f32,
            },
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for index in 0..count {
                let color = scatter_color(&mut rng);
                let position = Vec3::new(
                    scatter_coordinate(&mut rng),
                    scatter_coordinate(&mut rng),
                    scatter_coordinate(&mut rng),
                );
                let material = materials.add(StandardMaterial {
                    base_color: Color::from(color),
                    perceptual_roughness: 1.0,
                    ..default()
                });
                parent.spawn((
                    VoxelInstance { index, color },
                    Mesh3d(cube.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(position),
                ));
            }
        });

    // Morph out of the random scatter into the initial model.
    let target = library.resolve(catalog.active);
    catalog.active = target;
    selections.write(ModelSelected {
        previous: target,
        index: target,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn scatter_coordinates_are_grid_aligned() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = scatter_coordinate(&mut rng);
            assert!((-0.5..0.5).contains(&v));
            let cells = v / GRID_SIZE;
            assert!(
                (cells - cells.round()).abs() < 1e-4,
                "{v} is not on the grid"
            );
        }
    }
}
