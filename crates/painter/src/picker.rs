//! Surface picking: pointer position to canvas-local texture coordinate

use glam::Vec2;
use thiserror::Error;
use tracing::trace;

use crate::camera::{RenderCamera, ViewCamera};
use crate::scene::{HitCollider, SceneQuery};

/// Why a pick found no paintable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickMiss {
    #[error("Ray hit nothing within range")]
    NoHit,
    #[error("Hit object has no mesh collider")]
    NotMeshCollider,
    #[error("Hit mesh has no texture coordinates")]
    MissingUv,
}

/// Resolves pointer positions to canvas-local coordinates on the hit surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePicker {
    pub view_camera: ViewCamera,
    pub render_camera: RenderCamera,
    /// Maximum ray length in world units
    pub max_distance: f32,
}

impl SurfacePicker {
    pub fn new(view_camera: ViewCamera, render_camera: RenderCamera, max_distance: f32) -> Self {
        Self {
            view_camera,
            render_camera,
            max_distance,
        }
    }

    /// Cast through `pointer` and return the canvas-local coordinate of the hit.
    pub fn pick<S: SceneQuery + ?Sized>(&self, scene: &S, pointer: Vec2) -> Result<Vec2, PickMiss> {
        let ray = self.view_camera.screen_point_to_ray(pointer);
        let hit = scene
            .raycast(&ray, self.max_distance)
            .ok_or(PickMiss::NoHit)?;

        let uv = match hit.collider {
            HitCollider::Mesh { uv: Some(uv) } => uv,
            HitCollider::Mesh { uv: None } => return Err(PickMiss::MissingUv),
            HitCollider::Primitive => return Err(PickMiss::NotMeshCollider),
        };

        let local = self.render_camera.uv_to_canvas(uv);
        trace!(
            "SurfacePicker::pick: pointer=({:.1}, {:.1}) uv=({:.3}, {:.3}) local=({:.3}, {:.3})",
            pointer.x, pointer.y, uv.x, uv.y, local.x, local.y
        );
        Ok(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raycast::MeshData;
    use crate::scene::{Collider, MeshScene};
    use glam::Vec3;

    fn picker() -> SurfacePicker {
        SurfacePicker::new(
            ViewCamera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec2::new(800.0, 600.0)),
            RenderCamera::new(0.5),
            200.0,
        )
    }

    #[test]
    fn test_pick_center_of_quad() {
        let mut scene = MeshScene::new();
        scene.add("quad", Collider::Mesh(MeshData::quad(Vec3::ZERO, 2.0, 2.0)));

        let local = picker().pick(&scene, Vec2::new(400.0, 300.0)).unwrap();
        // UV (0.5, 0.5) recentred on the container origin
        assert!(local.length() < 1e-4);
    }

    #[test]
    fn test_pick_misses() {
        let picker = picker();
        let center = Vec2::new(400.0, 300.0);

        let empty = MeshScene::new();
        assert_eq!(picker.pick(&empty, center), Err(PickMiss::NoHit));

        let mut spheres = MeshScene::new();
        spheres.add(
            "ball",
            Collider::Sphere {
                center: Vec3::ZERO,
                radius: 1.0,
            },
        );
        assert_eq!(picker.pick(&spheres, center), Err(PickMiss::NotMeshCollider));

        let mut bare = MeshScene::new();
        bare.add(
            "bare quad",
            Collider::Mesh(MeshData::quad(Vec3::ZERO, 2.0, 2.0).without_uvs()),
        );
        assert_eq!(picker.pick(&bare, center), Err(PickMiss::MissingUv));
    }

    #[test]
    fn test_pick_out_of_range() {
        let mut scene = MeshScene::new();
        scene.add(
            "distant quad",
            Collider::Mesh(MeshData::quad(Vec3::new(0.0, 0.0, -300.0), 1000.0, 1000.0)),
        );
        assert_eq!(
            picker().pick(&scene, Vec2::new(400.0, 300.0)),
            Err(PickMiss::NoHit)
        );
    }
}
