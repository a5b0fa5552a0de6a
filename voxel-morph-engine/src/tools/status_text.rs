use bevy::prelude::*;
use constants::render_settings::STATUS_FONT_SIZE;

/// Full-screen container of the loading status message.
#[derive(Component)]
pub struct StatusOverlay;

#[derive(Component)]
pub struct StatusText;

pub fn spawn_status_text(mut commands: Commands) {
    commands
        .spawn((
            StatusOverlay,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                StatusText,
                Text::new("loading models..."),
                TextFont {
                    font_size: STATUS_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.25, 0.25, 0.25)),
            ));
        });
}

pub fn show_voxelizing_status(mut query: Query<&mut Text, With<StatusText>>) {
    for mut text in &mut query {
        text.0 = "calculating the voxels...".to_string();
    }
}

pub fn clear_status_text(
    overlays: Query<Entity, With<StatusOverlay>>,
    mut commands: Commands,
) {
    for entity in &overlays {
        commands.entity(entity).despawn();
    }
}
