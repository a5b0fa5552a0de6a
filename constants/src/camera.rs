use std::f32::consts::PI;

// Main orbit camera. Distance and pitch are clamped so the cloud always
// stays framed; pitch is the elevation above the horizontal plane.
pub const MAIN_FOV_DEGREES: f32 = 45.0;
pub const MAIN_NEAR: f32 = 0.01;
pub const MAIN_FAR: f32 = 1000.0;
pub const MAIN_MIN_DISTANCE: f32 = 20.0;
pub const MAIN_MAX_DISTANCE: f32 = 30.0;
pub const MAIN_MIN_PITCH: f32 = -0.15 * PI;
pub const MAIN_MAX_PITCH: f32 = 0.15 * PI;
pub const MAIN_INITIAL_PITCH: f32 = 0.245;
pub const MAIN_AUTO_ROTATE_SPEED: f32 = 0.21;
pub const MAIN_ROTATE_SENSITIVITY: f32 = 0.005;
pub const MAIN_ZOOM_STEP: f32 = 1.0;
/// Smoothing factor for damped camera motion, per second.
pub const MAIN_DAMPING: f32 = 12.0;

// Preview cameras orbit their model on a fixed circle.
pub const PREVIEW_FOV_DEGREES: f32 = 50.0;
pub const PREVIEW_NEAR: f32 = 0.1;
pub const PREVIEW_FAR: f32 = 100.0;
pub const PREVIEW_DISTANCE: f32 = 2.7;
pub const PREVIEW_PITCH: f32 = 0.46;
pub const PREVIEW_AUTO_ROTATE_SPEED: f32 = 0.63;

// Preview strip layout, logical pixels.
pub const PREVIEW_MAX_SIDE_PX: f32 = 90.0;
pub const PREVIEW_HEIGHT_FRACTION: f32 = 0.8;
pub const PREVIEW_MARGIN_PX: f32 = 10.0;
