//! Ray-mesh intersection for surface picking.
//!
//! Möller–Trumbore triangle tests with UV interpolation at the hit point.

use glam::{Vec2, Vec3};

/// Epsilon for floating point comparisons in ray intersection
const EPSILON: f32 = 1e-6;

/// A ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray-triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Barycentric coordinate u (weight for vertex 1)
    pub u: f32,
    /// Barycentric coordinate v (weight for vertex 2)
    pub v: f32,
}

/// Möller–Trumbore ray-triangle intersection.
///
/// Returns the hit distance and barycentric coordinates, or None when the
/// ray is parallel to the triangle, misses it, or the hit is behind the origin.
pub fn ray_triangle_intersection(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray.direction.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray lies in the triangle plane
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray.origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Interpolate a Vec2 attribute (like UVs) using barycentric coordinates.
pub fn interpolate_vec2(v0: Vec2, v1: Vec2, v2: Vec2, u: f32, v: f32) -> Vec2 {
    let w = 1.0 - u - v;
    v0 * w + v1 * u + v2 * v
}

/// Triangle mesh geometry used by mesh colliders
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions in world space
    pub positions: Vec<Vec3>,
    /// Triangle indices (3 per triangle)
    pub indices: Vec<u32>,
    /// Vertex UVs (same length as positions, or empty if the mesh has none)
    pub uvs: Vec<Vec2>,
}

/// Closest intersection with a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Distance along the ray
    pub distance: f32,
    /// Hit point in world space
    pub point: Vec3,
    /// Triangle index
    pub face_id: u32,
    /// Interpolated UV, None if the mesh carries no UVs
    pub uv: Option<Vec2>,
}

impl MeshData {
    /// Axis-aligned quad in the XY plane facing +Z, UVs spanning [0,1]².
    pub fn quad(center: Vec3, width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self {
            positions: vec![
                center + Vec3::new(-hw, -hh, 0.0),
                center + Vec3::new(hw, -hh, 0.0),
                center + Vec3::new(hw, hh, 0.0),
                center + Vec3::new(-hw, hh, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
        }
    }

    /// Drop UV data, keeping geometry
    pub fn without_uvs(mut self) -> Self {
        self.uvs.clear();
        self
    }

    /// Get the number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether UVs cover every vertex
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty() && self.uvs.len() == self.positions.len()
    }

    fn triangle_indices(&self, tri_index: usize) -> (usize, usize, usize) {
        let base = tri_index * 3;
        (
            self.indices[base] as usize,
            self.indices[base + 1] as usize,
            self.indices[base + 2] as usize,
        )
    }

    /// Cast a ray against every triangle and return the closest hit within `max_distance`.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<MeshHit> {
        let mut closest: Option<(TriangleHit, usize)> = None;

        // Brute force; meshes handled here are small
        for tri_idx in 0..self.triangle_count() {
            let (i0, i1, i2) = self.triangle_indices(tri_idx);
            let (Some(&v0), Some(&v1), Some(&v2)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                continue;
            };

            if let Some(hit) = ray_triangle_intersection(ray, v0, v1, v2) {
                if hit.t > max_distance {
                    continue;
                }
                let dominated = closest.as_ref().is_some_and(|(prev, _)| hit.t >= prev.t);
                if !dominated {
                    closest = Some((hit, tri_idx));
                }
            }
        }

        closest.map(|(hit, tri_idx)| {
            let (i0, i1, i2) = self.triangle_indices(tri_idx);
            let uv = if self.has_uvs() {
                Some(interpolate_vec2(
                    self.uvs[i0],
                    self.uvs[i1],
                    self.uvs[i2],
                    hit.u,
                    hit.v,
                ))
            } else {
                None
            };
            MeshHit {
                distance: hit.t,
                point: ray.at(hit.t),
                face_id: tri_idx as u32,
                uv,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_ray(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 1.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_ray_triangle_hit() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        let hit = ray_triangle_intersection(&down_ray(0.25, 0.25), v0, v1, v2).unwrap();
        assert!((hit.t - 1.0).abs() < EPSILON);
        assert!((hit.u - 0.25).abs() < EPSILON);
        assert!((hit.v - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_ray_triangle_miss() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        assert!(ray_triangle_intersection(&down_ray(2.0, 2.0), v0, v1, v2).is_none());

        // Pointing away
        let away = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::Z);
        assert!(ray_triangle_intersection(&away, v0, v1, v2).is_none());
    }

    #[test]
    fn test_quad_uv_at_hit() {
        let quad = MeshData::quad(Vec3::ZERO, 2.0, 2.0);

        let hit = quad.raycast(&down_ray(0.5, -0.5), 10.0).unwrap();
        let uv = hit.uv.unwrap();
        assert!((uv.x - 0.75).abs() < 1e-5);
        assert!((uv.y - 0.25).abs() < 1e-5);
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert!(hit.point.z.abs() < 1e-5);
    }

    #[test]
    fn test_raycast_respects_max_distance() {
        let quad = MeshData::quad(Vec3::ZERO, 2.0, 2.0);
        assert!(quad.raycast(&down_ray(0.0, 0.0), 0.5).is_none());
        assert!(quad.raycast(&down_ray(0.0, 0.0), 1.5).is_some());
    }

    #[test]
    fn test_raycast_without_uvs() {
        let quad = MeshData::quad(Vec3::ZERO, 2.0, 2.0).without_uvs();
        let hit = quad.raycast(&down_ray(0.0, 0.0), 10.0).unwrap();
        assert!(hit.uv.is_none());
    }

    #[test]
    fn test_interpolate_vec2() {
        let v0 = Vec2::new(0.0, 0.0);
        let v1 = Vec2::new(1.0, 0.0);
        let v2 = Vec2::new(0.0, 1.0);

        let result = interpolate_vec2(v0, v1, v2, 1.0, 0.0);
        assert!((result - v1).length() < EPSILON);

        let center = (v0 + v1 + v2) / 3.0;
        let result = interpolate_vec2(v0, v1, v2, 1.0 / 3.0, 1.0 / 3.0);
        assert!((result - center).length() < EPSILON);
    }
}
