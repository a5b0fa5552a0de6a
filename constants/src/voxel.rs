/// Bounding-box diagonal the model is scaled to before voxelization.
pub const MODEL_SIZE: f32 = 9.0;

/// Bounding-box diagonal used for the preview panels.
pub const PREVIEW_MODEL_SIZE: f32 = 2.0;

/// Sampling step of the voxel grid.
pub const GRID_SIZE: f32 = 0.24;

/// Edge length of one rendered voxel cube.
pub const BOX_SIZE: f32 = 0.24;

// Material colors are softened before they land on a voxel: desaturated a
// little and pushed towards white so the cubes read well under the spot
// lights.
pub const COLOR_SATURATION_SCALE: f32 = 0.8;
pub const COLOR_LIGHTNESS_SCALE: f32 = 0.8;
pub const COLOR_LIGHTNESS_OFFSET: f32 = 0.2;

/// Saturation and lightness of the random colors the cloud starts with.
pub const SCATTER_SATURATION: f32 = 0.8;
pub const SCATTER_LIGHTNESS: f32 = 0.8;
