//! Brush cursor indicator

use glam::{Vec2, Vec3};

use crate::picker::PickMiss;

/// Cursor shown over the paintable surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrushCursor {
    pub visible: bool,
    /// World position, valid while visible
    pub position: Vec3,
}

impl BrushCursor {
    pub fn show(&mut self, position: Vec3) {
        self.visible = true;
        self.position = position;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Mirror the latest pick: visible only on a hit outside of a bake.
    ///
    /// The canvas-local hit is offset by the container's world position.
    pub fn reflect(&mut self, pick: Result<Vec2, PickMiss>, baking: bool, container_origin: Vec3) {
        match pick {
            Ok(local) if !baking => self.show(local.extend(0.0) + container_origin),
            _ => self.hide(),
        }
    }
}
