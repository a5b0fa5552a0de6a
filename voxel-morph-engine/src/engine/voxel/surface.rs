use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use constants::voxel::{COLOR_LIGHTNESS_OFFSET, COLOR_LIGHTNESS_SCALE, COLOR_SATURATION_SCALE};

use crate::engine::voxel::bounds::Bounds;

/// Triangle soup of one mesh primitive, in the model's local frame, plus the
/// color its voxels will take.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    pub triangles: Vec<[Vec3; 3]>,
    pub color: LinearRgba,
}

impl SurfaceMesh {
    /// Flatten a render mesh into world-space triangles. Returns `None` for
    /// meshes without position data (points, lines, compressed attributes).
    pub fn from_mesh(mesh: &Mesh, transform: &GlobalTransform, base_color: Color) -> Option<Self> {
        let positions = match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
            VertexAttributeValues::Float32x3(values) => values,
            _ => return None,
        };

        let indices: Vec<usize> = match mesh.indices() {
            Some(indices) => indices.iter().collect(),
            None => (0..positions.len()).collect(),
        };

        let mut triangles = Vec::with_capacity(indices.len() / 3);
        for tri in indices.chunks_exact(3) {
            let fetch = |i: usize| -> Option<Vec3> {
                let [x, y, z] = *positions.get(i)?;
                Some(transform.transform_point(Vec3::new(x, y, z)))
            };
            triangles.push([fetch(tri[0])?, fetch(tri[1])?, fetch(tri[2])?]);
        }

        Some(Self {
            triangles,
            color: display_color(base_color),
        })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.triangles.iter().flatten().copied())
    }
}

/// Soften a material color for voxel display: slightly desaturated, pushed
/// towards white.
pub fn display_color(base: Color) -> LinearRgba {
    let hsla = Hsla::from(base);
    let adjusted = Hsla {
        saturation: hsla.saturation * COLOR_SATURATION_SCALE,
        lightness: hsla.lightness * COLOR_LIGHTNESS_SCALE + COLOR_LIGHTNESS_OFFSET,
        ..hsla
    };
    LinearRgba::from(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_color_softens_saturation_and_lifts_lightness() {
        let base = Color::hsl(120.0, 1.0, 0.5);
        let result = Hsla::from(Color::from(display_color(base)));
        assert!((result.saturation - 0.8).abs() < 1e-3);
        assert!((result.lightness - 0.6).abs() < 1e-3);
    }

    #[test]
    fn display_color_of_black_is_a_grey_floor() {
        // Lightness 0 still gets the +0.2 offset, so black models stay visible.
        let result = Hsla::from(Color::from(display_color(Color::BLACK)));
        assert!((result.lightness - 0.2).abs() < 1e-3);
    }
}
