//! Events emitted during the paint/bake cycle.

use glam::Vec2;

/// Events emitted during the paint/bake cycle.
///
/// These let a host react to the cycle (upload a new texture, play a sound,
/// record stats) without polling the painter.
#[derive(Debug, Clone, PartialEq)]
pub enum PainterEvent {
    /// A stamp was placed on the canvas.
    StampPlaced { position: Vec2, pending: usize },
    /// The bake threshold was reached and a bake is queued.
    BakeScheduled { stamp_count: u32 },
    /// The canvas was read back and installed on the material.
    TextureBaked {
        revision: u64,
        width: u32,
        height: u32,
        stamps_cleared: usize,
    },
    /// The bake cycle finished; stamps are accepted again.
    CursorRestored,
}

/// Callback invoked for every painter event
pub type PainterListener = Box<dyn Fn(&PainterEvent) + Send + Sync>;
