//! Canvas container: pending stamps, their render target and the bake counter

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::render_target::RenderTarget;
use crate::texture::BakedTexture;
use crate::types::{CanvasPhase, Stamp};

/// Scene placement of the canvas container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasContainer {
    /// World position; the cursor is drawn relative to it
    pub position: Vec3,
    /// Render layer handed down to every stamp
    pub layer: u32,
}

/// Stamp sprite appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampSprite {
    /// Radius in canvas units at scale 1.0
    pub radius: f32,
    /// 0.0 = soft, 1.0 = hard
    pub hardness: f32,
}

/// Owns every pending stamp and the render target they are drawn into
pub struct Canvas {
    pub container: CanvasContainer,
    sprite: StampSprite,
    render_target: RenderTarget,
    stamps: Vec<Stamp>,
    stamp_count: u32,
    phase: CanvasPhase,
}

impl Canvas {
    pub fn new(
        width: u32,
        height: u32,
        orthographic_size: f32,
        clear_color: [f32; 4],
        sprite: StampSprite,
    ) -> Self {
        Self {
            container: CanvasContainer::default(),
            sprite,
            render_target: RenderTarget::new(width, height, orthographic_size, clear_color),
            stamps: Vec::new(),
            stamp_count: 0,
            phase: CanvasPhase::Idle,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.render_target.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.render_target.height
    }

    /// Create a stamp under the container and draw it into the render target
    pub fn add_stamp(&mut self, position: Vec2, color: [f32; 4], scale: f32) -> Stamp {
        let stamp = Stamp {
            position,
            color,
            scale,
            layer: self.container.layer,
        };
        let region = self
            .render_target
            .draw_stamp(&stamp, self.sprite.radius, self.sprite.hardness);
        debug!(
            "Canvas::add_stamp: pos=({:.3}, {:.3}), scale={:.2}, region={:?}",
            position.x, position.y, scale, region
        );
        self.stamps.push(stamp);
        stamp
    }

    /// Pending stamps in placement order
    #[inline]
    pub fn stamps(&self) -> &[Stamp] {
        &self.stamps
    }

    /// Paint events counted toward the next bake
    #[inline]
    pub fn stamp_count(&self) -> u32 {
        self.stamp_count
    }

    /// Count one paint event, returning the new total
    pub fn count_event(&mut self) -> u32 {
        self.stamp_count += 1;
        self.stamp_count
    }

    pub fn reset_count(&mut self) {
        self.stamp_count = 0;
    }

    #[inline]
    pub fn phase(&self) -> CanvasPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: CanvasPhase) {
        debug!("Canvas phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    #[inline]
    pub fn is_baking(&self) -> bool {
        self.phase.is_baking()
    }

    /// Read the render target back into a new RGB8 texture
    pub fn rasterize(&self) -> BakedTexture {
        self.render_target.read_rgb8()
    }

    /// Destroy every pending stamp, returning how many were removed
    pub fn clear_stamps(&mut self) -> usize {
        let removed = self.stamps.len();
        self.stamps.clear();
        removed
    }

    /// Show `texture` as the canvas background.
    ///
    /// Called after stamps are cleared so the render target matches what the
    /// material now displays.
    pub fn show_background(&mut self, texture: &BakedTexture) -> bool {
        self.render_target.load_texture(texture)
    }

    #[inline]
    pub fn render_target(&self) -> &RenderTarget {
        &self.render_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(
            64,
            64,
            0.5,
            [1.0, 1.0, 1.0, 1.0],
            StampSprite {
                radius: 0.05,
                hardness: 1.0,
            },
        )
    }

    #[test]
    fn test_add_stamp_inherits_layer() {
        let mut canvas = canvas();
        canvas.container.layer = 7;

        let stamp = canvas.add_stamp(Vec2::ZERO, [0.0, 0.0, 1.0, 1.0], 2.0);
        assert_eq!(stamp.layer, 7);
        assert_eq!(stamp.scale, 2.0);
        assert_eq!(canvas.stamps().len(), 1);

        // Drawn into the render target
        assert_eq!(
            canvas.render_target().get_pixel(32, 32),
            Some([0.0, 0.0, 1.0, 1.0])
        );
    }

    #[test]
    fn test_count_is_independent_of_stamps() {
        let mut canvas = canvas();
        assert_eq!(canvas.count_event(), 1);
        assert_eq!(canvas.count_event(), 2);
        assert!(canvas.stamps().is_empty());

        canvas.reset_count();
        assert_eq!(canvas.stamp_count(), 0);
    }

    #[test]
    fn test_clear_and_background() {
        let mut canvas = canvas();
        canvas.add_stamp(Vec2::ZERO, [1.0, 0.0, 0.0, 1.0], 1.0);
        canvas.add_stamp(Vec2::new(0.2, 0.2), [0.0, 1.0, 0.0, 1.0], 1.0);

        let baked = canvas.rasterize();
        assert_eq!(baked.get_pixel(32, 32), Some([255, 0, 0]));

        assert_eq!(canvas.clear_stamps(), 2);
        assert!(canvas.stamps().is_empty());

        assert!(canvas.show_background(&baked));
        assert_eq!(canvas.rasterize(), baked);
    }

    #[test]
    fn test_phase() {
        let mut canvas = canvas();
        assert!(!canvas.is_baking());
        canvas.set_phase(CanvasPhase::Baking);
        assert!(canvas.is_baking());
        canvas.set_phase(CanvasPhase::CursorRestoring);
        assert!(canvas.is_baking());
    }
}
