use bevy::prelude::*;
use bevy::render::camera::Viewport;
use bevy::render::view::RenderLayers;
use bevy::window::PrimaryWindow;
use constants::camera::{
    PREVIEW_AUTO_ROTATE_SPEED, PREVIEW_DISTANCE, PREVIEW_FAR, PREVIEW_FOV_DEGREES,
    PREVIEW_HEIGHT_FRACTION, PREVIEW_MARGIN_PX, PREVIEW_MAX_SIDE_PX, PREVIEW_NEAR, PREVIEW_PITCH,
};
use constants::render_settings::{
    PREVIEW_BACKGROUND_LIGHTNESS, PREVIEW_BACKGROUND_SATURATION, PREVIEW_LIGHT_INTENSITY,
};

use crate::engine::loading::manifest_loader::{ModelCatalog, SlotStatus};

/// Render layer of one model's preview. Layer 0 stays reserved for the main
/// scene.
pub fn preview_layer(index: usize) -> RenderLayers {
    RenderLayers::layer(index + 1)
}

/// Auto-rotating orbit camera of one preview panel.
#[derive(Component)]
pub struct PreviewCamera {
    pub index: usize,
    pub yaw: f32,
}

/// Screen-space footprint of a preview panel, logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewRect {
    pub index: usize,
    pub min: Vec2,
    pub max: Vec2,
}

impl PreviewRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Current panel layout, shared with the selection tool for hit-testing.
#[derive(Resource, Default)]
pub struct PreviewLayout {
    pub rects: Vec<PreviewRect>,
}

/// Stack square panels down the right edge of the window.
pub fn layout_preview_rects(window_size: Vec2, count: usize) -> Vec<PreviewRect> {
    if count == 0 {
        return Vec::new();
    }
    let side = PREVIEW_MAX_SIDE_PX
        .min(PREVIEW_HEIGHT_FRACTION * window_size.y / count as f32)
        .max(1.0);

    (0..count)
        .map(|index| {
            let min = Vec2::new(
                window_size.x - side - PREVIEW_MARGIN_PX,
                PREVIEW_MARGIN_PX + index as f32 * (side + PREVIEW_MARGIN_PX),
            );
            PreviewRect {
                index,
                min,
                max: min + Vec2::splat(side),
            }
        })
        .collect()
}

/// Spawn a camera and a fill light for every model whose preview scene is
/// up. The viewport starts as a placeholder; `update_preview_viewports`
/// sizes it on the same frame.
pub fn create_preview_cameras(
    catalog: Res<ModelCatalog>,
    existing: Query<&PreviewCamera>,
    mut commands: Commands,
) {
    if catalog.is_empty() {
        return;
    }

    for (index, slot) in catalog.slots.iter().enumerate() {
        if slot.status != SlotStatus::Ready {
            continue;
        }
        if existing.iter().any(|camera| camera.index == index) {
            continue;
        }

        let hue = 360.0 * index as f32 / catalog.len() as f32;
        let background = Color::hsl(
            hue,
            PREVIEW_BACKGROUND_SATURATION,
            PREVIEW_BACKGROUND_LIGHTNESS,
        );

        commands.spawn((
            PreviewCamera { index, yaw: 0.0 },
            Camera3d::default(),
            Camera {
                order: 1 + index as isize,
                clear_color: ClearColorConfig::Custom(background),
                viewport: Some(Viewport {
                    physical_position: UVec2::ZERO,
                    physical_size: UVec2::ONE,
                    ..default()
                }),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: PREVIEW_FOV_DEGREES.to_radians(),
                near: PREVIEW_NEAR,
                far: PREVIEW_FAR,
                ..default()
            }),
            preview_layer(index),
            preview_eye(0.0),
        ));
        commands.spawn((
            PointLight {
                intensity: PREVIEW_LIGHT_INTENSITY,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(2.0, 0.0, 5.0),
            preview_layer(index),
        ));
    }
}

fn preview_eye(yaw: f32) -> Transform {
    let eye = Quat::from_rotation_y(yaw)
        * Vec3::new(0.0, PREVIEW_PITCH.sin(), PREVIEW_PITCH.cos())
        * PREVIEW_DISTANCE;
    Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y)
}

/// Keep every preview camera circling its model.
pub fn update_preview_cameras(
    time: Res<Time>,
    mut cameras: Query<(&mut PreviewCamera, &mut Transform)>,
) {
    for (mut preview, mut transform) in &mut cameras {
        preview.yaw += PREVIEW_AUTO_ROTATE_SPEED * time.delta_secs();
        *transform = preview_eye(preview.yaw);
    }
}

/// Recompute the panel strip from the window size and push the rects into
/// the camera viewports. Runs every frame so resizes just work.
pub fn update_preview_viewports(
    catalog: Res<ModelCatalog>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut layout: ResMut<PreviewLayout>,
    mut cameras: Query<(&PreviewCamera, &mut Camera)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let physical_size = UVec2::new(window.physical_width(), window.physical_height());
    if physical_size.x == 0 || physical_size.y == 0 {
        return;
    }

    let rects = layout_preview_rects(Vec2::new(window.width(), window.height()), catalog.len());
    let scale = window.scale_factor();

    for (preview, mut camera) in &mut cameras {
        let Some(rect) = rects.iter().find(|rect| rect.index == preview.index) else {
            continue;
        };
        let position = (rect.min * scale)
            .as_uvec2()
            .min(physical_size - UVec2::ONE);
        let size = (rect.size() * scale)
            .as_uvec2()
            .max(UVec2::ONE)
            .min(physical_size - position);
        camera.viewport = Some(Viewport {
            physical_position: position,
            physical_size: size,
            ..default()
        });
    }

    layout.rects = rects;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_use_the_side_cap_on_tall_windows() {
        let rects = layout_preview_rects(Vec2::new(1280.0, 800.0), 6);
        assert_eq!(rects.len(), 6);
        for rect in &rects {
            assert!((rect.size().x - PREVIEW_MAX_SIDE_PX).abs() < 1e-4);
            assert!((rect.size().y - PREVIEW_MAX_SIDE_PX).abs() < 1e-4);
        }
    }

    #[test]
    fn panels_shrink_on_short_windows() {
        let rects = layout_preview_rects(Vec2::new(1280.0, 300.0), 6);
        // 0.8 * 300 / 6 = 40 logical pixels.
        assert!((rects[0].size().x - 40.0).abs() < 1e-4);
    }

    #[test]
    fn panels_hug_the_right_edge_without_overlap() {
        let window = Vec2::new(1024.0, 768.0);
        let rects = layout_preview_rects(window, 5);
        for pair in rects.windows(2) {
            assert!(pair[0].max.y <= pair[1].min.y);
        }
        for rect in &rects {
            assert!(rect.max.x <= window.x);
            assert!(rect.min.x >= 0.0);
        }
    }

    #[test]
    fn contains_is_inclusive_of_min_exclusive_of_max() {
        let rect = PreviewRect {
            index: 0,
            min: Vec2::new(10.0, 10.0),
            max: Vec2::new(20.0, 20.0),
        };
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(19.9, 19.9)));
        assert!(!rect.contains(Vec2::new(20.0, 10.0)));
        assert!(!rect.contains(Vec2::new(5.0, 15.0)));
    }

    #[test]
    fn no_models_means_no_panels() {
        assert!(layout_preview_rects(Vec2::new(800.0, 600.0), 0).is_empty());
    }
}
