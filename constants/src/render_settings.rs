/// Global ambient brightness, lux.
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

// The main scene is lit by two spots riding in a camera-tracking rig: one
// overhead (the shadow caster) and a fill from below the horizon.
pub const TOP_SPOT_INTENSITY: f32 = 2_500_000.0;
pub const FILL_SPOT_INTENSITY: f32 = 1_500_000.0;
pub const SPOT_RANGE: f32 = 60.0;
pub const SHADOW_MAP_SIZE: usize = 1024;

/// Each preview panel carries its own point light.
pub const PREVIEW_LIGHT_INTENSITY: f32 = 600_000.0;

pub const GROUND_PLANE_SIZE: f32 = 35.0;
pub const GROUND_PLANE_Y: f32 = -4.0;

/// Clear color of the preview panels: hue runs over the model index,
/// saturation and lightness stay fixed.
pub const PREVIEW_BACKGROUND_SATURATION: f32 = 0.5;
pub const PREVIEW_BACKGROUND_LIGHTNESS: f32 = 0.7;

pub const STATUS_FONT_SIZE: f32 = 18.0;
pub const FPS_FONT_SIZE: f32 = 16.0;
pub const HIGHLIGHT_BORDER_PX: f32 = 2.0;
