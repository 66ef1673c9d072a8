//! Shared configuration for the texture painter
//!
//! This crate provides the single source of truth for brush settings, canvas
//! dimensions, the bake cycle and picking limits. Every section has a
//! `Default` so partial JSON documents fill in the rest.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default brush size (stamp scale multiplier)
pub const DEFAULT_BRUSH_SIZE: f32 = 1.0;

/// Default brush color (opaque red)
pub const DEFAULT_BRUSH_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Default stamp sprite radius in canvas units at scale 1.0
pub const DEFAULT_SPRITE_RADIUS: f32 = 0.01;

/// Default stamp sprite hardness
pub const DEFAULT_SPRITE_HARDNESS: f32 = 1.0;

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 1024;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1024;

/// Default color of an unpainted canvas
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Orthographic half-extent of the render camera looking at the canvas container
pub const DEFAULT_ORTHOGRAPHIC_SIZE: f32 = 0.5;

/// Number of paint events that triggers a bake
pub const DEFAULT_BAKE_THRESHOLD: u32 = 1000;

/// Seconds between reaching the threshold and reading back the canvas
pub const DEFAULT_BAKE_DELAY: f32 = 0.1;

/// Seconds between the bake and showing the cursor again
pub const DEFAULT_CURSOR_RESTORE_DELAY: f32 = 0.1;

/// Maximum ray length for surface picking, in world units
pub const DEFAULT_MAX_PICK_DISTANCE: f32 = 200.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse painter config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Brush size must be positive, got {0}")]
    InvalidBrushSize(f32),
    #[error("Sprite radius must be positive, got {0}")]
    InvalidSpriteRadius(f32),
    #[error("Canvas dimensions must be non-zero, got {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
    #[error("Orthographic size must be positive, got {0}")]
    InvalidOrthographicSize(f32),
    #[error("Bake threshold must be at least 1")]
    InvalidBakeThreshold,
    #[error("Delay `{name}` must be non-negative, got {value}")]
    InvalidDelay { name: &'static str, value: f32 },
    #[error("Max pick distance must be positive, got {0}")]
    InvalidPickDistance(f32),
}

/// Brush settings applied to every new stamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Scale applied to the stamp sprite
    pub size: f32,
    /// RGBA color of new stamps
    pub color: [f32; 4],
    /// Radius of the stamp sprite at size 1.0, in canvas units
    pub sprite_radius: f32,
    /// Sprite edge hardness: 0.0 = soft, 1.0 = hard
    pub sprite_hardness: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            color: DEFAULT_BRUSH_COLOR,
            sprite_radius: DEFAULT_SPRITE_RADIUS,
            sprite_hardness: DEFAULT_SPRITE_HARDNESS,
        }
    }
}

/// Canvas render target settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Render target width in pixels
    pub width: u32,
    /// Render target height in pixels
    pub height: u32,
    /// Color of the canvas before anything is baked
    pub clear_color: [f32; 4],
    /// Half-extent of the orthographic render camera
    pub orthographic_size: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            clear_color: DEFAULT_CLEAR_COLOR,
            orthographic_size: DEFAULT_ORTHOGRAPHIC_SIZE,
        }
    }
}

/// Bake cycle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Paint events per bake
    pub threshold: u32,
    /// Delay before the bake runs, in seconds
    pub bake_delay: f32,
    /// Delay between the bake and the cursor coming back, in seconds
    pub cursor_restore_delay: f32,
    /// Whether paint events that miss the surface still count toward the threshold
    pub count_missed_picks: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_BAKE_THRESHOLD,
            bake_delay: DEFAULT_BAKE_DELAY,
            cursor_restore_delay: DEFAULT_CURSOR_RESTORE_DELAY,
            count_missed_picks: true,
        }
    }
}

/// Surface picking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickConfig {
    /// Maximum ray length in world units
    pub max_distance: f32,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_PICK_DISTANCE,
        }
    }
}

/// Complete painter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct PainterConfig {
    pub brush: BrushConfig,
    pub canvas: CanvasConfig,
    pub bake: BakeConfig,
    pub pick: PickConfig,
}

impl PainterConfig {
    /// Parse a config from JSON and validate it.
    ///
    /// Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to pretty JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.brush.size > 0.0) {
            return Err(ConfigError::InvalidBrushSize(self.brush.size));
        }
        if !(self.brush.sprite_radius > 0.0) {
            return Err(ConfigError::InvalidSpriteRadius(self.brush.sprite_radius));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::InvalidCanvasSize {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if !(self.canvas.orthographic_size > 0.0) {
            return Err(ConfigError::InvalidOrthographicSize(
                self.canvas.orthographic_size,
            ));
        }
        if self.bake.threshold == 0 {
            return Err(ConfigError::InvalidBakeThreshold);
        }
        for (name, value) in [
            ("bake_delay", self.bake.bake_delay),
            ("cursor_restore_delay", self.bake.cursor_restore_delay),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidDelay { name, value });
            }
        }
        if !(self.pick.max_distance > 0.0) {
            return Err(ConfigError::InvalidPickDistance(self.pick.max_distance));
        }
        Ok(())
    }

    /// Canvas size as (width, height)
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas.width, self.canvas.height)
    }
}
