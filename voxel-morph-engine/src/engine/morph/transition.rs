use bevy::color::Mix;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use constants::animation::{
    BASE_DURATION, COLOR_DELAY_FRACTION, COLOR_DURATION, COUNT_DURATION, DURATION_JITTER,
    DURATION_JITTER_POWER, POSITION_DELAY_MAX, TRANSITION_TURN, TRANSITION_TURN_DURATION,
};
use rand::Rng;

use crate::engine::morph::tween::Tween;
use crate::engine::morph::voxel_cloud::{VoxelCloud, VoxelInstance};
use crate::engine::voxel::library::VoxelLibrary;
use crate::engine::voxel::voxelizer::VoxelSet;

/// Fired when the user picks a model (or the initial one is shown).
#[derive(Event)]
pub struct ModelSelected {
    pub previous: usize,
    pub index: usize,
}

#[derive(Component)]
pub struct PositionTween {
    pub start: Vec3,
    pub end: Vec3,
    pub tween: Tween,
}

#[derive(Component)]
pub struct ColorTween {
    pub start: LinearRgba,
    pub end: LinearRgba,
    pub tween: Tween,
}

/// Extra spin of the whole cloud while a transition runs.
#[derive(Component)]
pub struct TurnTween {
    pub start: f32,
    pub end: f32,
    pub tween: Tween,
}

/// Animates how many instances are visible.
#[derive(Component)]
pub struct CountTween {
    pub start: f32,
    pub end: f32,
    pub tween: Tween,
}

/// Where one instance goes during a transition, and on what schedule.
#[derive(Debug, Clone, Copy)]
pub struct MorphTarget {
    pub position: Vec3,
    /// `None` when the instance has no counterpart in the new set; it keeps
    /// its color and the count tween hides it instead.
    pub color: Option<LinearRgba>,
    pub duration: f32,
    pub position_delay: f32,
    pub color_delay: f32,
}

/// Pick the target for instance `index`. Instances with a counterpart voxel
/// move there; the rest pile onto a random occupied position so they vanish
/// inside the model when the count tween hides them.
pub fn plan_morph_target(set: &VoxelSet, index: usize, rng: &mut impl Rng) -> MorphTarget {
    let jitter: f32 = rng.random();
    let duration = BASE_DURATION + DURATION_JITTER * jitter.powi(DURATION_JITTER_POWER);
    let position_delay = POSITION_DELAY_MAX * rng.random::<f32>();
    let color_delay = COLOR_DELAY_FRACTION * rng.random::<f32>() * duration;

    match set.voxels.get(index) {
        Some(voxel) => MorphTarget {
            position: voxel.position,
            color: Some(voxel.color),
            duration,
            position_delay,
            color_delay,
        },
        None => {
            let borrowed = set.voxels[rng.random_range(0..set.len())];
            MorphTarget {
                position: borrowed.position,
                color: None,
                duration,
                position_delay,
                color_delay,
            }
        }
    }
}

/// Retarget every instance towards the newly selected model. Replacing the
/// tween components cancels whatever the previous transition still had
/// running.
pub fn start_transition(
    mut selections: EventReader<ModelSelected>,
    library: Res<VoxelLibrary>,
    cloud_query: Query<(Entity, &VoxelCloud)>,
    instances: Query<(Entity, &Transform, &VoxelInstance)>,
    mut commands: Commands,
) {
    let Some(selection) = selections.read().last() else {
        return;
    };
    let Ok((cloud_entity, cloud)) = cloud_query.single() else {
        return;
    };
    let Some(target_set) = library.set(selection.index).filter(|set| !set.is_empty()) else {
        return;
    };

    info!(
        "Morphing model {} → {} ({} voxels)",
        selection.previous,
        selection.index,
        target_set.len()
    );

    let mut rng = rand::rng();
    for (entity, transform, instance) in &instances {
        let target = plan_morph_target(target_set, instance.index, &mut rng);
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert(PositionTween {
            start: transform.translation,
            end: target.position,
            tween: Tween::new(target.position_delay, target.duration, EaseFunction::BackOut),
        });
        match target.color {
            Some(color) => {
                entity_commands.insert(ColorTween {
                    start: instance.color,
                    end: color,
                    tween: Tween::new(target.color_delay, COLOR_DURATION, EaseFunction::QuadraticIn),
                });
            }
            None => {
                entity_commands.remove::<ColorTween>();
            }
        }
    }

    commands.entity(cloud_entity).insert((
        TurnTween {
            start: cloud.yaw,
            end: cloud.yaw + TRANSITION_TURN,
            tween: Tween::new(0.0, TRANSITION_TURN_DURATION, EaseFunction::CubicOut),
        },
        CountTween {
            start: cloud.visible,
            end: target_set.len() as f32,
            tween: Tween::new(0.0, COUNT_DURATION, EaseFunction::QuadraticOut),
        },
    ));
}

pub fn advance_position_tweens(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut PositionTween)>,
    mut commands: Commands,
) {
    let delta = time.delta_secs();
    for (entity, mut transform, mut position) in &mut query {
        let progress = position.tween.tick(delta);
        transform.translation = position.start.lerp(position.end, progress);
        if position.tween.finished() {
            commands.entity(entity).remove::<PositionTween>();
        }
    }
}

pub fn advance_color_tweens(
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(
        Entity,
        &mut VoxelInstance,
        &MeshMaterial3d<StandardMaterial>,
        &mut ColorTween,
    )>,
    mut commands: Commands,
) {
    let delta = time.delta_secs();
    for (entity, mut instance, material3d, mut color) in &mut query {
        let progress = color.tween.tick(delta);
        instance.color = color.start.mix(&color.end, progress);
        if let Some(material) = materials.get_mut(&material3d.0) {
            material.base_color = Color::from(instance.color);
        }
        if color.tween.finished() {
            commands.entity(entity).remove::<ColorTween>();
        }
    }
}

pub fn advance_turn_tween(
    time: Res<Time>,
    mut query: Query<(Entity, &mut VoxelCloud, &mut Transform, &mut TurnTween)>,
    mut commands: Commands,
) {
    let delta = time.delta_secs();
    for (entity, mut cloud, mut transform, mut turn) in &mut query {
        let progress = turn.tween.tick(delta);
        cloud.yaw = turn.start + (turn.end - turn.start) * progress;
        transform.rotation = Quat::from_rotation_y(cloud.yaw);
        if turn.tween.finished() {
            commands.entity(entity).remove::<TurnTween>();
        }
    }
}

pub fn advance_count_tween(
    time: Res<Time>,
    mut cloud_query: Query<(Entity, &mut VoxelCloud, &mut CountTween)>,
    mut instances: Query<(&VoxelInstance, &mut Visibility)>,
    mut commands: Commands,
) {
    let Ok((entity, mut cloud, mut count)) = cloud_query.single_mut() else {
        return;
    };
    let progress = count.tween.tick(time.delta_secs());
    cloud.visible = count.start + (count.end - count.start) * progress;

    let visible = cloud.visible.round() as usize;
    for (instance, mut visibility) in &mut instances {
        *visibility = if instance.index < visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    if count.tween.finished() {
        commands.entity(entity).remove::<CountTween>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::voxel::voxelizer::Voxel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_set() -> VoxelSet {
        VoxelSet {
            voxels: vec![
                Voxel {
                    position: Vec3::new(1.0, 0.0, 0.0),
                    color: LinearRgba::rgb(1.0, 0.0, 0.0),
                },
                Voxel {
                    position: Vec3::new(0.0, 2.0, 0.0),
                    color: LinearRgba::rgb(0.0, 1.0, 0.0),
                },
                Voxel {
                    position: Vec3::new(0.0, 0.0, 3.0),
                    color: LinearRgba::rgb(0.0, 0.0, 1.0),
                },
            ],
        }
    }

    #[test]
    fn matched_instance_targets_its_voxel() {
        let set = sample_set();
        let mut rng = StdRng::seed_from_u64(1);
        let target = plan_morph_target(&set, 1, &mut rng);
        assert_eq!(target.position, set.voxels[1].position);
        assert_eq!(target.color, Some(set.voxels[1].color));
    }

    #[test]
    fn surplus_instance_borrows_an_occupied_position() {
        let set = sample_set();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let target = plan_morph_target(&set, 99, &mut rng);
            assert!(target.color.is_none());
            assert!(
                set.voxels.iter().any(|v| v.position == target.position),
                "surplus target must coincide with an existing voxel"
            );
        }
    }

    #[test]
    fn schedule_stays_within_the_configured_ranges() {
        let set = sample_set();
        let mut rng = StdRng::seed_from_u64(3);
        for index in 0..100 {
            let target = plan_morph_target(&set, index % 4, &mut rng);
            assert!(target.duration >= BASE_DURATION);
            assert!(target.duration <= BASE_DURATION + DURATION_JITTER);
            assert!((0.0..POSITION_DELAY_MAX).contains(&target.position_delay));
            assert!(target.color_delay <= COLOR_DELAY_FRACTION * target.duration);
        }
    }
}
