use std::f32::consts::PI;

/// Base duration of a per-voxel position tween, in seconds.
pub const BASE_DURATION: f32 = 0.5;

/// Random extra duration on top of the base. Weighted towards zero by the
/// sixth power so most voxels arrive early and a few trail behind.
pub const DURATION_JITTER: f32 = 0.5;
pub const DURATION_JITTER_POWER: i32 = 6;

/// Upper bound of the random start delay on position tweens.
pub const POSITION_DELAY_MAX: f32 = 0.2;

/// A voxel switches color at a random point within this fraction of its own
/// travel time.
pub const COLOR_DELAY_FRACTION: f32 = 0.7;
pub const COLOR_DURATION: f32 = 0.05;

/// Extra yaw the whole cloud picks up during a transition.
pub const TRANSITION_TURN: f32 = 1.3 * PI;
pub const TRANSITION_TURN_DURATION: f32 = 1.2;

/// The visible instance count animates to the new set's size over this long.
pub const COUNT_DURATION: f32 = 0.4;

/// Presses held longer than this are orbit drags, not selection clicks.
pub const HOLD_THRESHOLD: f32 = 0.2;
