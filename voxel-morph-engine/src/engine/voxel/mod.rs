pub mod bounds;
pub mod library;
pub mod surface;
pub mod voxelizer;
