//! Paint/bake controller
//!
//! This module connects the pieces of the painter:
//! - Surface picking (pointer to canvas-local coordinate)
//! - Stamp accumulation on the canvas container
//! - Delayed baking into the base material
//! - Cursor reflection once per frame
//!
//! The controller does not depend on any engine. A host calls [`DynamicPainter::frame`]
//! once per frame with the pointer state, its scene and the frame delta.

use glam::Vec2;
use painter_config::{ConfigError, PainterConfig};
use tracing::{debug, info, trace};

use crate::camera::{RenderCamera, ViewCamera};
use crate::canvas::{Canvas, CanvasContainer, StampSprite};
use crate::cursor::BrushCursor;
use crate::events::{PainterEvent, PainterListener};
use crate::picker::{PickMiss, SurfacePicker};
use crate::scene::SceneQuery;
use crate::scheduler::{PainterTask, Scheduler};
use crate::texture::BaseMaterial;
use crate::types::{CanvasPhase, PointerState, Stamp};

/// Result of a single paint event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintOutcome {
    /// A bake cycle is in progress; the event was dropped
    Dropped,
    /// A stamp was placed
    Placed(Stamp),
    /// The pointer was not over a paintable surface
    Missed(PickMiss),
}

/// Owns all painter state: brush, canvas, material, cursor and pending tasks
///
/// Idle -> (threshold reached) -> Baking -> (bake task) -> CursorRestoring
/// -> (restore task) -> Idle. Paint events are dropped outside of Idle.
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct DynamicPainter {
    config: PainterConfig,
    picker: SurfacePicker,
    canvas: Canvas,
    material: BaseMaterial,
    cursor: BrushCursor,
    scheduler: Scheduler,
    listeners: Vec<PainterListener>,
    bakes_completed: u64,
}

impl DynamicPainter {
    /// Create a painter looking through `view_camera`.
    ///
    /// The config is validated first.
    pub fn new(config: PainterConfig, view_camera: ViewCamera) -> Result<Self, ConfigError> {
        config.validate()?;

        let canvas = Canvas::new(
            config.canvas.width,
            config.canvas.height,
            config.canvas.orthographic_size,
            config.canvas.clear_color,
            StampSprite {
                radius: config.brush.sprite_radius,
                hardness: config.brush.sprite_hardness,
            },
        );
        let picker = SurfacePicker::new(
            view_camera,
            RenderCamera::new(config.canvas.orthographic_size),
            config.pick.max_distance,
        );

        info!(
            "DynamicPainter: canvas {}x{}, bake every {} events",
            config.canvas.width, config.canvas.height, config.bake.threshold
        );

        Ok(Self {
            config,
            picker,
            canvas,
            material: BaseMaterial::new(),
            cursor: BrushCursor::default(),
            scheduler: Scheduler::new(),
            listeners: Vec::new(),
            bakes_completed: 0,
        })
    }

    /// Painter with default configuration
    pub fn with_defaults(view_camera: ViewCamera) -> Result<Self, ConfigError> {
        Self::new(PainterConfig::default(), view_camera)
    }

    /// Register a listener for painter events
    pub fn add_listener(&mut self, listener: impl Fn(&PainterEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, event: PainterEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    // --- Brush -----------------------------------------------------------

    /// Set the stamp scale; non-positive or NaN sizes are ignored
    pub fn set_brush_size(&mut self, size: f32) {
        if size > 0.0 {
            self.config.brush.size = size;
        } else {
            debug!("set_brush_size: ignoring non-positive size {}", size);
        }
    }

    pub fn brush_size(&self) -> f32 {
        self.config.brush.size
    }

    pub fn set_brush_color(&mut self, color: [f32; 4]) {
        self.config.brush.color = color;
    }

    pub fn brush_color(&self) -> [f32; 4] {
        self.config.brush.color
    }

    // --- Frame driving ---------------------------------------------------

    /// Run one host frame: fire due tasks, paint if the button is held, then
    /// update the cursor.
    pub fn frame<S: SceneQuery + ?Sized>(&mut self, scene: &S, pointer: PointerState, dt: f32) {
        self.advance(dt);
        if pointer.primary_down {
            self.paint(scene, pointer.position);
        }
        self.update_cursor(scene, pointer.position);
    }

    /// Advance the task clock and run every task that became due
    pub fn advance(&mut self, dt: f32) {
        for task in self.scheduler.advance(dt) {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: PainterTask) {
        match task {
            PainterTask::Bake => self.save_texture(),
            PainterTask::RestoreCursor => self.restore_cursor(),
        }
    }

    /// Handle one paint event at `pointer`.
    pub fn paint<S: SceneQuery + ?Sized>(&mut self, scene: &S, pointer: Vec2) -> PaintOutcome {
        if self.canvas.is_baking() {
            trace!("paint: bake in progress, dropping event");
            return PaintOutcome::Dropped;
        }

        let outcome = match self.picker.pick(scene, pointer) {
            Ok(local) => {
                let stamp =
                    self.canvas
                        .add_stamp(local, self.config.brush.color, self.config.brush.size);
                self.emit(PainterEvent::StampPlaced {
                    position: local,
                    pending: self.canvas.stamps().len(),
                });
                PaintOutcome::Placed(stamp)
            }
            Err(miss) => {
                trace!("paint: pick missed ({})", miss);
                PaintOutcome::Missed(miss)
            }
        };

        let counts = matches!(outcome, PaintOutcome::Placed(_)) || self.config.bake.count_missed_picks;
        if counts {
            let count = self.canvas.count_event();
            if count >= self.config.bake.threshold {
                self.schedule_bake(count);
            }
        }

        outcome
    }

    fn schedule_bake(&mut self, count: u32) {
        info!("Bake threshold reached ({} events), scheduling bake", count);
        self.canvas.set_phase(CanvasPhase::Baking);
        self.scheduler
            .schedule(self.config.bake.bake_delay, PainterTask::Bake);
        self.emit(PainterEvent::BakeScheduled { stamp_count: count });
    }

    /// Read back the canvas, install it on the material and drop every stamp.
    ///
    /// Stays in a baking phase until the cursor-restore task runs.
    fn save_texture(&mut self) {
        self.canvas.reset_count();
        self.cursor.hide();

        let texture = self.canvas.rasterize();
        let (width, height) = (texture.width(), texture.height());
        self.canvas.show_background(&texture);
        self.material.set_main_texture(texture);

        let stamps_cleared = self.canvas.clear_stamps();
        self.bakes_completed += 1;
        info!(
            "Baked {}x{} texture (revision {}), cleared {} stamps",
            width,
            height,
            self.material.revision(),
            stamps_cleared
        );

        self.canvas.set_phase(CanvasPhase::CursorRestoring);
        self.scheduler
            .schedule(self.config.bake.cursor_restore_delay, PainterTask::RestoreCursor);

        self.emit(PainterEvent::TextureBaked {
            revision: self.material.revision(),
            width,
            height,
            stamps_cleared,
        });
    }

    fn restore_cursor(&mut self) {
        self.canvas.set_phase(CanvasPhase::Idle);
        self.emit(PainterEvent::CursorRestored);
    }

    /// Re-pick under the pointer and show or hide the cursor.
    pub fn update_cursor<S: SceneQuery + ?Sized>(&mut self, scene: &S, pointer: Vec2) {
        let pick = self.picker.pick(scene, pointer);
        self.cursor
            .reflect(pick, self.canvas.is_baking(), self.canvas.container.position);
    }

    // --- Accessors -------------------------------------------------------

    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    pub fn picker(&self) -> &SurfacePicker {
        &self.picker
    }

    /// Mutable picker, for moving the view camera
    pub fn picker_mut(&mut self) -> &mut SurfacePicker {
        &mut self.picker
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn container_mut(&mut self) -> &mut CanvasContainer {
        &mut self.canvas.container
    }

    pub fn material(&self) -> &BaseMaterial {
        &self.material
    }

    pub fn cursor(&self) -> &BrushCursor {
        &self.cursor
    }

    pub fn phase(&self) -> CanvasPhase {
        self.canvas.phase()
    }

    pub fn is_baking(&self) -> bool {
        self.canvas.is_baking()
    }

    pub fn stamp_count(&self) -> u32 {
        self.canvas.stamp_count()
    }

    pub fn stamps(&self) -> &[Stamp] {
        self.canvas.stamps()
    }

    pub fn bakes_completed(&self) -> u64 {
        self.bakes_completed
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
