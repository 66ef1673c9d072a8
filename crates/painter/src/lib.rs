//! Stamp painting and texture baking for 3D surfaces
//!
//! This crate provides the engine-agnostic core of the in-scene painter:
//! - [`picker`] - Pointer to canvas-local texture coordinate via scene raycasts
//! - [`canvas`] - Pending stamps, bake counter and the canvas render target
//! - [`texture`] - Baked RGB8 textures and the material that shows them
//! - [`scheduler`] - Delayed one-shot tasks on a manual clock
//! - [`cursor`] - Brush cursor reflection
//! - [`painter`] - The paint/bake controller tying it all together

pub mod camera;
pub mod canvas;
pub mod cursor;
pub mod events;
pub mod painter;
pub mod picker;
pub mod raycast;
pub mod render_target;
pub mod scene;
pub mod scheduler;
pub mod texture;
pub mod types;

pub use camera::*;
pub use canvas::*;
pub use cursor::*;
pub use events::*;
pub use painter::*;
pub use picker::*;
pub use raycast::*;
pub use render_target::*;
pub use scene::*;
pub use scheduler::*;
pub use texture::*;
pub use types::*;

pub use painter_config as config;
