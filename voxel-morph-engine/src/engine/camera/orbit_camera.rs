use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    MAIN_AUTO_ROTATE_SPEED, MAIN_DAMPING, MAIN_INITIAL_PITCH, MAIN_MAX_DISTANCE, MAIN_MAX_PITCH,
    MAIN_MIN_DISTANCE, MAIN_MIN_PITCH, MAIN_ROTATE_SENSITIVITY, MAIN_ZOOM_STEP,
};

#[derive(Component)]
pub struct MainCamera;

/// Orbit state of the main camera. The camera circles the origin; pitch is
/// elevation above the horizontal, both it and the distance are clamped so
/// the cloud never leaves the frame.
#[derive(Resource)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: MAIN_INITIAL_PITCH,
            distance: MAIN_MIN_DISTANCE,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw)
            * Vec3::new(0.0, self.pitch.sin(), self.pitch.cos())
            * self.distance
    }
}

/// Drag to orbit, wheel to dolly, idle to auto-rotate. Motion is damped by
/// lerping the transform towards the target pose.
pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();

    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.yaw -= mouse_delta.x * MAIN_ROTATE_SENSITIVITY;
        orbit.pitch = (orbit.pitch + mouse_delta.y * MAIN_ROTATE_SENSITIVITY)
            .clamp(MAIN_MIN_PITCH, MAIN_MAX_PITCH);
    } else {
        orbit.yaw -= MAIN_AUTO_ROTATE_SPEED * time.delta_secs();
    }

    let mut scroll_accum = 0.0;
    for event in scroll_events.read() {
        scroll_accum += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.distance = (orbit.distance - scroll_accum * MAIN_ZOOM_STEP)
            .clamp(MAIN_MIN_DISTANCE, MAIN_MAX_DISTANCE);
    }

    let target = Transform::from_translation(orbit.eye()).looking_at(Vec3::ZERO, Vec3::Y);
    let lerp_speed = (MAIN_DAMPING * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_sits_at_the_configured_distance() {
        let orbit = OrbitCamera::default();
        assert!((orbit.eye().length() - MAIN_MIN_DISTANCE).abs() < 1e-4);
    }

    #[test]
    fn yaw_spins_the_eye_around_the_vertical_axis() {
        let flat = OrbitCamera {
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
        };
        let turned = OrbitCamera {
            yaw: std::f32::consts::FRAC_PI_2,
            ..flat
        };
        assert!((flat.eye() - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        assert!((turned.eye() - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }
}
