use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::animation::HOLD_THRESHOLD;
use constants::render_settings::HIGHLIGHT_BORDER_PX;

use crate::engine::camera::preview_camera::PreviewLayout;
use crate::engine::loading::manifest_loader::ModelCatalog;
use crate::engine::morph::transition::ModelSelected;
use crate::engine::voxel::library::VoxelLibrary;

#[derive(Resource, Default)]
pub struct SelectorState {
    pressed_at: Option<f32>,
}

/// Click handling. A quick click on a preview panel selects that model, a
/// quick click anywhere else advances to the next one. Held presses belong
/// to the orbit controller and never select.
pub fn handle_model_selection(
    mut state: ResMut<SelectorState>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<PreviewLayout>,
    mut catalog: ResMut<ModelCatalog>,
    library: Res<VoxelLibrary>,
    mut selections: EventWriter<ModelSelected>,
    time: Res<Time>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        state.pressed_at = Some(time.elapsed_secs());
    }
    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }
    let Some(pressed_at) = state.pressed_at.take() else {
        return;
    };
    if time.elapsed_secs() - pressed_at >= HOLD_THRESHOLD {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let previous = catalog.active;
    let next = match layout.rects.iter().find(|rect| rect.contains(cursor)) {
        Some(rect) => {
            if !library.available(rect.index) {
                return;
            }
            rect.index
        }
        None => library.next_available(previous),
    };

    catalog.active = next;
    selections.write(ModelSelected {
        previous,
        index: next,
    });
}

/// Border drawn over the active model's preview panel.
#[derive(Component)]
pub struct ActiveHighlight;

pub fn spawn_active_highlight(mut commands: Commands) {
    commands.spawn((
        ActiveHighlight,
        Node {
            position_type: PositionType::Absolute,
            border: UiRect::all(Val::Px(HIGHLIGHT_BORDER_PX)),
            ..default()
        },
        BorderColor(Color::WHITE),
        BackgroundColor(Color::NONE),
    ));
}

pub fn update_active_highlight(
    catalog: Res<ModelCatalog>,
    layout: Res<PreviewLayout>,
    mut query: Query<&mut Node, With<ActiveHighlight>>,
) {
    let Ok(mut node) = query.single_mut() else {
        return;
    };
    let Some(rect) = layout
        .rects
        .iter()
        .find(|rect| rect.index == catalog.active)
    else {
        node.display = Display::None;
        return;
    };
    node.display = Display::Flex;
    node.left = Val::Px(rect.min.x);
    node.top = Val::Px(rect.min.y);
    node.width = Val::Px(rect.size().x);
    node.height = Val::Px(rect.size().y);
}
