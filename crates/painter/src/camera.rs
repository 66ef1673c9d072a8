//! Cameras used for picking and canvas rendering
//!
//! The view camera turns a pointer position into a world-space ray. The
//! render camera is the orthographic camera pointed at the canvas container;
//! its half-extent defines how UV space is recentred on the container.

use glam::{Mat4, Vec2, Vec3};

use crate::raycast::Ray;

/// Perspective camera the user looks through
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_3, // 60 degrees
            near: 0.1,
            far: 1000.0,
            viewport: Vec2::new(1920.0, 1080.0),
        }
    }
}

impl ViewCamera {
    /// Camera at `position` looking at `target` with a given viewport
    pub fn looking_at(position: Vec3, target: Vec3, viewport: Vec2) -> Self {
        Self {
            position,
            target,
            viewport,
            ..Default::default()
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio(), self.near, self.far)
    }

    /// Ray from the near plane through a screen point.
    ///
    /// Screen coordinates are pixels with the origin at the bottom-left.
    pub fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        let ndc = Vec2::new(
            2.0 * screen.x / self.viewport.x.max(1.0) - 1.0,
            2.0 * screen.y / self.viewport.y.max(1.0) - 1.0,
        );
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }
}

/// Orthographic camera rendering the canvas container into the render target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCamera {
    /// Half of the vertical view extent, in canvas units
    pub orthographic_size: f32,
}

impl RenderCamera {
    pub fn new(orthographic_size: f32) -> Self {
        Self { orthographic_size }
    }

    /// Recentre a [0,1]² UV around the canvas container origin
    #[inline]
    pub fn uv_to_canvas(&self, uv: Vec2) -> Vec2 {
        uv - Vec2::splat(self.orthographic_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = ViewCamera::looking_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec2::new(800.0, 600.0),
        );
        let ray = camera.screen_point_to_ray(Vec2::new(400.0, 300.0));

        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        // Origin sits on the near plane
        assert!((ray.origin.z - (5.0 - camera.near)).abs() < 1e-3);
    }

    #[test]
    fn test_screen_up_is_world_up() {
        let camera = ViewCamera::looking_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec2::new(800.0, 600.0),
        );
        let ray = camera.screen_point_to_ray(Vec2::new(700.0, 550.0));
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn test_uv_to_canvas() {
        let camera = RenderCamera::new(0.5);
        assert_eq!(camera.uv_to_canvas(Vec2::new(0.5, 0.5)), Vec2::ZERO);
        assert_eq!(camera.uv_to_canvas(Vec2::ZERO), Vec2::new(-0.5, -0.5));
    }
}
