//! Scene ray queries
//!
//! The painter does not own the scene. Hosts implement [`SceneQuery`] over
//! their own physics or scene graph; [`MeshScene`] is a small in-memory
//! implementation over triangle meshes and spheres.

use glam::{Vec2, Vec3};

use crate::raycast::{MeshData, Ray};

/// What kind of collider a ray hit, and the texture data it carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitCollider {
    /// Mesh collider; `uv` is None when the mesh has no texture coordinates
    Mesh { uv: Option<Vec2> },
    /// Any non-mesh collider (sphere, box, capsule...)
    Primitive,
}

/// Closest hit returned by a scene query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub distance: f32,
    pub point: Vec3,
    /// Index of the hit object in the host's scene
    pub object: usize,
    pub collider: HitCollider,
}

/// Ray intersection against the host scene
pub trait SceneQuery {
    /// Closest hit along `ray` no further than `max_distance`
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SceneHit>;
}

/// Collision shape of a scene object
#[derive(Debug, Clone)]
pub enum Collider {
    Mesh(MeshData),
    Sphere { center: Vec3, radius: f32 },
}

/// A named object in a [`MeshScene`]
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub collider: Collider,
}

/// In-memory scene of mesh and sphere colliders
#[derive(Debug, Clone, Default)]
pub struct MeshScene {
    objects: Vec<SceneObject>,
}

impl MeshScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning its index
    pub fn add(&mut self, name: impl Into<String>, collider: Collider) -> usize {
        self.objects.push(SceneObject {
            name: name.into(),
            collider,
        });
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneQuery for MeshScene {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SceneHit> {
        let mut closest: Option<SceneHit> = None;

        for (index, object) in self.objects.iter().enumerate() {
            let hit = match &object.collider {
                Collider::Mesh(mesh) => mesh.raycast(ray, max_distance).map(|hit| SceneHit {
                    distance: hit.distance,
                    point: hit.point,
                    object: index,
                    collider: HitCollider::Mesh { uv: hit.uv },
                }),
                Collider::Sphere { center, radius } => ray_sphere(ray, *center, *radius)
                    .filter(|t| *t <= max_distance)
                    .map(|t| SceneHit {
                        distance: t,
                        point: ray.at(t),
                        object: index,
                        collider: HitCollider::Primitive,
                    }),
            };

            if let Some(hit) = hit {
                if closest.as_ref().is_none_or(|prev| hit.distance < prev.distance) {
                    closest = Some(hit);
                }
            }
        }

        closest
    }
}

/// Nearest non-negative ray parameter where the ray enters the sphere
fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let far = -b + sqrt_d;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_ray(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_empty_scene() {
        let scene = MeshScene::new();
        assert!(scene.is_empty());
        assert!(scene.raycast(&down_ray(0.0, 0.0), 100.0).is_none());
    }

    #[test]
    fn test_closest_object_wins() {
        let mut scene = MeshScene::new();
        scene.add("far quad", Collider::Mesh(MeshData::quad(Vec3::ZERO, 2.0, 2.0)));
        let ball = scene.add(
            "ball",
            Collider::Sphere {
                center: Vec3::new(0.0, 0.0, 3.0),
                radius: 1.0,
            },
        );

        let hit = scene.raycast(&down_ray(0.0, 0.0), 100.0).unwrap();
        assert_eq!(hit.object, ball);
        assert_eq!(hit.collider, HitCollider::Primitive);
        assert!((hit.distance - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_mesh_hit_carries_uv() {
        let mut scene = MeshScene::new();
        scene.add("quad", Collider::Mesh(MeshData::quad(Vec3::ZERO, 2.0, 2.0)));

        let hit = scene.raycast(&down_ray(0.0, 0.0), 100.0).unwrap();
        match hit.collider {
            HitCollider::Mesh { uv: Some(uv) } => {
                assert!((uv - Vec2::splat(0.5)).length() < 1e-5);
            }
            other => panic!("unexpected collider {:?}", other),
        }
    }

    #[test]
    fn test_max_distance() {
        let mut scene = MeshScene::new();
        scene.add("quad", Collider::Mesh(MeshData::quad(Vec3::ZERO, 2.0, 2.0)));
        assert!(scene.raycast(&down_ray(0.0, 0.0), 5.0).is_none());
    }
}
