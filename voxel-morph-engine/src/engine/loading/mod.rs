pub mod manifest_loader;
pub mod model_loader;
pub mod progress;
pub mod voxel_builder;
