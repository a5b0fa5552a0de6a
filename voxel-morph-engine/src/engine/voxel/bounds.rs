use bevy::prelude::*;

/// Axis-aligned bounds of a model in world coordinates. Drives both the
/// normalization scale and the extent of the voxel sampling grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Inverted bounds that any point will expand.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut bounds = Self::EMPTY;
        for point in points {
            bounds.include(point);
        }
        bounds
    }

    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center point, used to recenter models on the origin.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Diagonal length. Models are scaled so this matches the target size.
    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_tracks_extremes() {
        let bounds = Bounds::from_points([
            Vec3::new(-1.0, 2.0, 0.5),
            Vec3::new(3.0, -4.0, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
        ]);
        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 2.0, 0.5));
    }

    #[test]
    fn center_and_size() {
        let bounds = Bounds::from_points([Vec3::new(-2.0, 0.0, 0.0), Vec3::new(4.0, 6.0, 2.0)]);
        assert_eq!(bounds.center(), Vec3::new(1.0, 3.0, 1.0));
        assert_eq!(bounds.size(), Vec3::new(6.0, 6.0, 2.0));
    }

    #[test]
    fn diagonal_of_unit_cube() {
        let bounds = Bounds::from_points([Vec3::ZERO, Vec3::ONE]);
        assert!((bounds.diagonal() - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn empty_until_a_point_arrives() {
        let mut bounds = Bounds::EMPTY;
        assert!(bounds.is_empty());
        bounds.include(Vec3::ONE);
        assert!(!bounds.is_empty());
        assert_eq!(bounds.size(), Vec3::ZERO);
    }
}
