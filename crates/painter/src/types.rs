use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single paint mark waiting to be baked
///
/// Position is canvas-local: the hit UV recentred on the canvas container
/// origin, so `(0, 0)` is the middle of the texture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    /// Canvas-local texture-space position
    pub position: Vec2,
    /// RGBA color in linear 0..1 floats
    pub color: [f32; 4],
    /// Scale applied to the stamp sprite
    pub scale: f32,
    /// Render layer inherited from the canvas container
    pub layer: u32,
}

/// Lifecycle of the bake cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CanvasPhase {
    /// Accepting stamps
    #[default]
    Idle,
    /// Threshold reached, bake scheduled or running
    Baking,
    /// Bake done, waiting to show the cursor again
    CursorRestoring,
}

impl CanvasPhase {
    /// True while new stamps are rejected
    #[inline]
    pub fn is_baking(self) -> bool {
        !matches!(self, CanvasPhase::Idle)
    }
}

/// Pointer state sampled by the host once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Screen position in pixels, origin at the bottom-left corner
    pub position: Vec2,
    /// Whether the primary button is held
    pub primary_down: bool,
}

impl PointerState {
    pub fn new(x: f32, y: f32, primary_down: bool) -> Self {
        Self {
            position: Vec2::new(x, y),
            primary_down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_baking_flag() {
        assert!(!CanvasPhase::Idle.is_baking());
        assert!(CanvasPhase::Baking.is_baking());
        assert!(CanvasPhase::CursorRestoring.is_baking());
        assert_eq!(CanvasPhase::default(), CanvasPhase::Idle);
    }
}
