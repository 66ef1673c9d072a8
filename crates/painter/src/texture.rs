//! Baked RGB8 textures and the material that displays them

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use tracing::debug;

/// Immutable RGB8 snapshot of the canvas render target
///
/// Rows are stored top to bottom in row-major order, the same layout
/// `image::RgbImage` uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakedTexture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl BakedTexture {
    /// Build a texture from raw pixels.
    ///
    /// Returns `None` if the pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Texture filled with a single color
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get a pixel, or None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Raw RGB24 bytes for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an `image` buffer
    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            Rgb(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
        })
    }

    /// Write the texture out as a PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let path = path.as_ref();
        debug!(
            "BakedTexture::save_png: {}x{} -> {}",
            self.width,
            self.height,
            path.display()
        );
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }
}

/// The render surface of the painted object
///
/// Holds the currently installed texture. Each bake replaces it wholesale and
/// bumps the revision so hosts know to re-upload.
#[derive(Debug, Default)]
pub struct BaseMaterial {
    main_texture: Option<BakedTexture>,
    revision: u64,
}

impl BaseMaterial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new main texture, returning the one it replaced
    pub fn set_main_texture(&mut self, texture: BakedTexture) -> Option<BakedTexture> {
        self.revision += 1;
        debug!(
            "BaseMaterial::set_main_texture: {}x{}, revision {}",
            texture.width(),
            texture.height(),
            self.revision
        );
        self.main_texture.replace(texture)
    }

    #[inline]
    pub fn main_texture(&self) -> Option<&BakedTexture> {
        self.main_texture.as_ref()
    }

    /// Number of textures installed so far
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
