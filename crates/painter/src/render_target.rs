//! CPU render target for the canvas container
//!
//! Stands in for the orthographic camera that renders the canvas container
//! into a render texture. The target always holds the last baked texture (or
//! the clear color) with every pending stamp composited on top, in the order
//! the stamps were placed.

use glam::Vec2;
use tracing::debug;

use crate::texture::BakedTexture;
use crate::types::Stamp;

/// RGBA float render target seen by the canvas render camera
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    /// Half-extent of the orthographic camera, in canvas units
    orthographic_size: f32,
    /// Row-major, top row first
    pixels: Vec<[f32; 4]>,
}

impl RenderTarget {
    /// Create a target cleared to the given color
    pub fn new(width: u32, height: u32, orthographic_size: f32, clear_color: [f32; 4]) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            orthographic_size,
            pixels: vec![clear_color; pixel_count],
        }
    }

    #[inline]
    pub fn orthographic_size(&self) -> f32 {
        self.orthographic_size
    }

    /// Fill the whole target with a solid color
    pub fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Alpha-composite a color over an existing pixel
    /// Formula: out = src * alpha + dst * (1 - alpha)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        let dst = self.pixels[index];

        let src_alpha = color[3] * opacity;
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Map a canvas-local position to continuous pixel coordinates.
    ///
    /// The camera covers `[-size, size]` on both axes around the container
    /// origin. Canvas y points up, pixel rows go down.
    pub fn canvas_to_pixel(&self, position: Vec2) -> Vec2 {
        let extent = 2.0 * self.orthographic_size;
        let u = (position.x + self.orthographic_size) / extent;
        let v = (position.y + self.orthographic_size) / extent;
        Vec2::new(u * self.width as f32, (1.0 - v) * self.height as f32)
    }

    /// Composite one stamp sprite onto the target.
    ///
    /// `sprite_radius` is the sprite radius in canvas units at scale 1.0.
    /// Returns the affected region (x, y, width, height), or None if the
    /// stamp is empty or entirely outside the target.
    pub fn draw_stamp(
        &mut self,
        stamp: &Stamp,
        sprite_radius: f32,
        hardness: f32,
    ) -> Option<(u32, u32, u32, u32)> {
        let extent = 2.0 * self.orthographic_size;
        let radius_canvas = sprite_radius * stamp.scale;
        // Non-square targets stretch the sprite into an ellipse in pixel space
        let radius_x = radius_canvas / extent * self.width as f32;
        let radius_y = radius_canvas / extent * self.height as f32;

        if radius_x <= 0.0 || radius_y <= 0.0 || stamp.color[3] <= 0.0 {
            return None;
        }

        let center = self.canvas_to_pixel(stamp.position);

        let x_min = ((center.x - radius_x).floor().max(0.0) as u32).min(self.width);
        let y_min = ((center.y - radius_y).floor().max(0.0) as u32).min(self.height);
        let x_max = ((center.x + radius_x).ceil().max(0.0) as u32).min(self.width);
        let y_max = ((center.y + radius_y).ceil().max(0.0) as u32).min(self.height);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        for py in y_min..y_max {
            for px in x_min..x_max {
                let nx = ((px as f32 + 0.5) - center.x) / radius_x;
                let ny = ((py as f32 + 0.5) - center.y) / radius_y;
                let dist_sq = nx * nx + ny * ny;
                if dist_sq > 1.0 {
                    continue;
                }

                let falloff = sprite_falloff(dist_sq.sqrt(), hardness);
                if falloff > 0.0 {
                    self.blend_pixel(px, py, stamp.color, falloff);
                }
            }
        }

        Some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    /// Replace the target contents with a baked texture.
    ///
    /// Dimensions must match; a mismatched texture is ignored.
    pub fn load_texture(&mut self, texture: &BakedTexture) -> bool {
        if texture.width() != self.width || texture.height() != self.height {
            debug!(
                "RenderTarget::load_texture: size mismatch {}x{} vs {}x{}",
                texture.width(),
                texture.height(),
                self.width,
                self.height
            );
            return false;
        }
        for (dst, src) in self.pixels.iter_mut().zip(texture.pixels()) {
            *dst = [
                unorm8_to_f32(src[0]),
                unorm8_to_f32(src[1]),
                unorm8_to_f32(src[2]),
                1.0,
            ];
        }
        true
    }

    /// Read the target back into a newly allocated RGB8 texture, dropping alpha
    pub fn read_rgb8(&self) -> BakedTexture {
        let pixels: Vec<[u8; 3]> = self
            .pixels
            .iter()
            .map(|p| [f32_to_unorm8(p[0]), f32_to_unorm8(p[1]), f32_to_unorm8(p[2])])
            .collect();
        BakedTexture::from_pixels(self.width, self.height, pixels)
            .unwrap_or_else(|| BakedTexture::solid(self.width, self.height, [0, 0, 0]))
    }

    /// Raw float pixel data
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }
}

/// Sprite edge falloff
/// distance_normalized is 0 at center, 1 at edge
/// hardness is 0.0 (soft) to 1.0 (hard)
#[inline]
pub fn sprite_falloff(distance_normalized: f32, hardness: f32) -> f32 {
    if distance_normalized > 1.0 {
        return 0.0;
    }
    let hardness = hardness.clamp(0.0, 1.0);
    let soft = 1.0 - distance_normalized.clamp(0.0, 1.0);
    soft * (1.0 - hardness) + hardness
}

#[inline]
fn f32_to_unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn unorm8_to_f32(value: u8) -> f32 {
    value as f32 / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    fn stamp_at(x: f32, y: f32, color: [f32; 4]) -> Stamp {
        Stamp {
            position: Vec2::new(x, y),
            color,
            scale: 1.0,
            layer: 0,
        }
    }

    #[test]
    fn test_canvas_to_pixel_corners() {
        let target = RenderTarget::new(100, 50, 0.5, WHITE);

        let center = target.canvas_to_pixel(Vec2::ZERO);
        assert!((center.x - 50.0).abs() < 1e-4);
        assert!((center.y - 25.0).abs() < 1e-4);

        // Bottom-left of canvas space is the last row in pixel space
        let bottom_left = target.canvas_to_pixel(Vec2::new(-0.5, -0.5));
        assert!(bottom_left.x.abs() < 1e-4);
        assert!((bottom_left.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_draw_stamp_hard_edge() {
        let mut target = RenderTarget::new(100, 100, 0.5, WHITE);
        let stamp = stamp_at(0.0, 0.0, [1.0, 0.0, 0.0, 1.0]);

        // radius 0.1 canvas units = 10 pixels
        let region = target.draw_stamp(&stamp, 0.1, 1.0).unwrap();
        assert_eq!(region, (40, 40, 20, 20));

        assert_eq!(target.get_pixel(50, 50), Some([1.0, 0.0, 0.0, 1.0]));
        // Corner of the bounding box is outside the circle
        assert_eq!(target.get_pixel(40, 40), Some(WHITE));
        // Far away pixel untouched
        assert_eq!(target.get_pixel(5, 5), Some(WHITE));
    }

    #[test]
    fn test_draw_stamp_soft_edge_blends() {
        let mut target = RenderTarget::new(100, 100, 0.5, WHITE);
        let stamp = stamp_at(0.0, 0.0, [0.0, 0.0, 0.0, 1.0]);
        target.draw_stamp(&stamp, 0.1, 0.0);

        let center = target.get_pixel(50, 50).unwrap();
        let edge = target.get_pixel(58, 50).unwrap();
        // Center is darker than near the edge
        assert!(center[0] < edge[0]);
        assert!(edge[0] < 1.0);
    }

    #[test]
    fn test_draw_stamp_outside() {
        let mut target = RenderTarget::new(10, 10, 0.5, WHITE);
        let stamp = stamp_at(5.0, 5.0, [1.0, 0.0, 0.0, 1.0]);
        assert!(target.draw_stamp(&stamp, 0.1, 1.0).is_none());

        let transparent = stamp_at(0.0, 0.0, [1.0, 0.0, 0.0, 0.0]);
        assert!(target.draw_stamp(&transparent, 0.1, 1.0).is_none());
    }

    #[test]
    fn test_readback_then_load_is_stable() {
        let mut target = RenderTarget::new(32, 32, 0.5, [0.3, 0.6, 0.9, 1.0]);
        target.draw_stamp(&stamp_at(0.1, -0.2, [0.2, 0.7, 0.1, 0.5]), 0.2, 0.0);

        let first = target.read_rgb8();
        assert!(target.load_texture(&first));
        let second = target.read_rgb8();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_texture_size_mismatch() {
        let mut target = RenderTarget::new(4, 4, 0.5, WHITE);
        let texture = BakedTexture::solid(2, 2, [0, 0, 0]);
        assert!(!target.load_texture(&texture));
        assert_eq!(target.get_pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_sprite_falloff() {
        assert_eq!(sprite_falloff(0.5, 1.0), 1.0);
        assert_eq!(sprite_falloff(1.5, 1.0), 0.0);
        assert!((sprite_falloff(0.0, 0.0) - 1.0).abs() < 1e-6);
        assert!((sprite_falloff(0.5, 0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_as_bytes() {
        let target = RenderTarget::new(2, 2, 0.5, WHITE);
        // 4 pixels * 4 components * 4 bytes per f32
        assert_eq!(target.as_bytes().len(), 64);
    }
}
