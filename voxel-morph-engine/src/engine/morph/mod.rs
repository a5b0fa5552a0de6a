pub mod transition;
pub mod tween;
pub mod voxel_cloud;
