pub mod camera;
pub mod core;
pub mod loading;
pub mod morph;
pub mod scene;
pub mod systems;
pub mod voxel;
