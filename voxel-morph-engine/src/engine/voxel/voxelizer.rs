use bevy::prelude::*;

use crate::engine::voxel::bounds::Bounds;
use crate::engine::voxel::surface::SurfaceMesh;

/// One classified sample point: grid position plus the color of the mesh it
/// fell inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voxel {
    pub position: Vec3,
    pub color: LinearRgba,
}

/// Ordered voxel list of one model. Instance `i` of the cloud morphs towards
/// voxel `i`, so the order is part of the data.
#[derive(Debug, Clone, Default)]
pub struct VoxelSet {
    pub voxels: Vec<Voxel>,
}

impl VoxelSet {
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

const PARALLEL_EPSILON: f32 = 1e-7;
const DISTANCE_EPSILON: f32 = 1e-6;

/// Convert a model's surfaces into a voxel set.
///
/// The model is uniformly scaled so its bounding-box diagonal equals
/// `model_size` and recentered on the origin, then the bounding box is walked
/// on a regular grid. A sample belongs to the first mesh that contains it;
/// the lower Y bound is lifted by half a cell so flat-bottomed models sit on
/// a clean voxel row.
pub fn voxelize(surfaces: &[SurfaceMesh], grid_size: f32, model_size: f32) -> VoxelSet {
    let mut bounds = Bounds::EMPTY;
    for surface in surfaces {
        let surface_bounds = surface.bounds();
        if !surface_bounds.is_empty() {
            bounds.include(surface_bounds.min);
            bounds.include(surface_bounds.max);
        }
    }
    if bounds.is_empty() || bounds.diagonal() <= f32::EPSILON {
        return VoxelSet::default();
    }

    let scale = model_size / bounds.diagonal();
    let offset = -bounds.center() * scale;

    let scaled: Vec<SurfaceMesh> = surfaces
        .iter()
        .map(|surface| SurfaceMesh {
            triangles: surface
                .triangles
                .iter()
                .map(|tri| tri.map(|v| v * scale + offset))
                .collect(),
            color: surface.color,
        })
        .collect();

    let mut bounds = Bounds::EMPTY;
    for surface in &scaled {
        let surface_bounds = surface.bounds();
        if !surface_bounds.is_empty() {
            bounds.include(surface_bounds.min);
            bounds.include(surface_bounds.max);
        }
    }
    bounds.min.y += 0.5 * grid_size;

    let mut voxels = Vec::new();
    let mut x = bounds.min.x;
    while x < bounds.max.x {
        let mut y = bounds.min.y;
        while y < bounds.max.y {
            let mut z = bounds.min.z;
            while z < bounds.max.z {
                let sample = Vec3::new(x, y, z);
                for surface in &scaled {
                    if contains_point(&surface.triangles, sample) {
                        voxels.push(Voxel {
                            position: sample,
                            color: surface.color,
                        });
                        break;
                    }
                }
                z += grid_size;
            }
            y += grid_size;
        }
        x += grid_size;
    }

    VoxelSet { voxels }
}

/// Ray-parity test: cast along +Z and count crossings. Odd means inside.
pub fn contains_point(triangles: &[[Vec3; 3]], point: Vec3) -> bool {
    let mut crossings = 0;
    for triangle in triangles {
        if ray_hits_triangle(point, Vec3::Z, triangle).is_some() {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}

/// Möller–Trumbore ray/triangle intersection, double sided. Returns the hit
/// distance along the ray, or `None` for misses and near-parallel rays.
pub fn ray_hits_triangle(origin: Vec3, direction: Vec3, triangle: &[Vec3; 3]) -> Option<f32> {
    let edge1 = triangle[1] - triangle[0];
    let edge2 = triangle[2] - triangle[0];

    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let to_origin = origin - triangle[0];
    let u = to_origin.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = to_origin.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > DISTANCE_EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Closed cube spanning `[-half, half]` on every axis, 12 triangles.
    fn cube_surface(half: f32, color: LinearRgba) -> SurfaceMesh {
        let v = |x: f32, y: f32, z: f32| Vec3::new(x * half, y * half, z * half);
        let corners = [
            v(-1.0, -1.0, -1.0),
            v(1.0, -1.0, -1.0),
            v(1.0, 1.0, -1.0),
            v(-1.0, 1.0, -1.0),
            v(-1.0, -1.0, 1.0),
            v(1.0, -1.0, 1.0),
            v(1.0, 1.0, 1.0),
            v(-1.0, 1.0, 1.0),
        ];
        let quads = [
            [0, 1, 2, 3], // -z
            [5, 4, 7, 6], // +z
            [4, 0, 3, 7], // -x
            [1, 5, 6, 2], // +x
            [4, 5, 1, 0], // -y
            [3, 2, 6, 7], // +y
        ];
        let mut triangles = Vec::new();
        for [a, b, c, d] in quads {
            triangles.push([corners[a], corners[b], corners[c]]);
            triangles.push([corners[a], corners[c], corners[d]]);
        }
        SurfaceMesh { triangles, color }
    }

    #[test]
    fn ray_hits_facing_triangle() {
        let triangle = [
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        ];
        let t = ray_hits_triangle(Vec3::ZERO, Vec3::Z, &triangle).expect("should hit");
        assert!((t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_triangle_behind_origin() {
        let triangle = [
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        ];
        assert!(ray_hits_triangle(Vec3::ZERO, Vec3::Z, &triangle).is_none());
    }

    #[test]
    fn ray_ignores_parallel_triangle() {
        let triangle = [
            Vec3::new(0.5, -1.0, -1.0),
            Vec3::new(0.5, 1.0, -1.0),
            Vec3::new(0.5, 0.0, 1.0),
        ];
        // Triangle lies in a plane containing the ray direction.
        assert!(ray_hits_triangle(Vec3::new(0.5, 0.0, -5.0), Vec3::Z, &triangle).is_none());
    }

    #[test]
    fn cube_contains_its_center_but_not_the_outside() {
        let cube = cube_surface(1.0, LinearRgba::WHITE);
        assert!(contains_point(&cube.triangles, Vec3::new(0.1, 0.2, 0.3)));
        assert!(contains_point(&cube.triangles, Vec3::new(-0.7, 0.6, -0.4)));
        assert!(!contains_point(&cube.triangles, Vec3::new(2.5, 0.1, 0.2)));
        assert!(!contains_point(&cube.triangles, Vec3::new(0.1, -1.8, 0.2)));
    }

    #[test]
    fn voxelize_fills_a_cube() {
        let color = LinearRgba::rgb(0.9, 0.2, 0.1);
        let cube = cube_surface(1.0, color);
        // Diagonal of this cube is 2√3; keep the scale factor at 1 so the
        // sample coordinates are easy to reason about.
        let set = voxelize(std::slice::from_ref(&cube), 0.37, 2.0 * 3.0_f32.sqrt());

        assert!(!set.is_empty());
        for voxel in &set.voxels {
            assert!(voxel.position.abs().max_element() <= 1.0 + 1e-4);
            assert_eq!(voxel.color, color);
        }
    }

    #[test]
    fn finer_grid_yields_more_voxels() {
        let cube = cube_surface(1.0, LinearRgba::WHITE);
        let coarse = voxelize(std::slice::from_ref(&cube), 0.61, 5.0);
        let fine = voxelize(std::slice::from_ref(&cube), 0.23, 5.0);
        assert!(fine.len() > coarse.len());
    }

    #[test]
    fn first_containing_mesh_wins() {
        // Two nested cubes: samples inside the small one must take its color.
        let inner = cube_surface(0.5, LinearRgba::rgb(0.0, 1.0, 0.0));
        let outer = cube_surface(1.0, LinearRgba::rgb(1.0, 0.0, 0.0));
        let set = voxelize(&[inner.clone(), outer], 0.37, 2.0 * 3.0_f32.sqrt());

        let near_center: Vec<_> = set
            .voxels
            .iter()
            .filter(|v| v.position.abs().max_element() < 0.4)
            .collect();
        assert!(!near_center.is_empty());
        for voxel in near_center {
            assert_eq!(voxel.color, inner.color);
        }
    }

    #[test]
    fn voxelize_without_surfaces_is_empty() {
        assert!(voxelize(&[], 0.24, 9.0).is_empty());
    }
}
