pub mod orbit_camera;
pub mod preview_camera;
