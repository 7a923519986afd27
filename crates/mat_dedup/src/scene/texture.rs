//! Texture image data
//!
//! Images hold their pixels as flat RGBA channel values normalized to
//! `[0.0, 1.0]`, the representation content-creation hosts expose to
//! tooling. Pixel data is optional: an image can be known to the scene
//! while its buffer is packed or not yet loaded, in which case anything
//! that needs the pixels fails rather than guessing.

use image::RgbaImage;

/// Number of channels per pixel (RGBA)
pub const CHANNELS: usize = 4;

/// A named texture image with optionally resident pixel data
#[derive(Debug, Clone)]
pub struct TextureImage {
    /// Scene-scoped name; assumed to uniquely identify the pixel content
    /// within one editing session
    name: String,
    width: u32,
    height: u32,
    /// Flat RGBA channel values in `[0.0, 1.0]`, row-major;
    /// `None` when the buffer is not resident
    pixels: Option<Vec<f32>>,
}

impl TextureImage {
    /// Create an image with resident pixel data
    ///
    /// `pixels` is expected to hold `width * height * 4` channel values.
    #[must_use]
    pub fn new(name: impl Into<String>, width: u32, height: u32, pixels: Vec<f32>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize * CHANNELS);
        Self {
            name: name.into(),
            width,
            height,
            pixels: Some(pixels),
        }
    }

    /// Create an image whose pixel buffer is not resident
    ///
    /// Stands in for packed or not-yet-loaded host images; hashing such an
    /// image fails with [`SceneError::PixelsUnavailable`](super::SceneError).
    #[must_use]
    pub fn unloaded(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pixels: None,
        }
    }

    /// Create an image from a decoded RGBA buffer
    ///
    /// Converts 8-bit channels to normalized floats, the same conversion
    /// hosts apply when exposing loaded images to tooling.
    #[must_use]
    pub fn from_rgba(name: impl Into<String>, rgba: &RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .as_raw()
            .iter()
            .map(|&channel| f32::from(channel) / 255.0)
            .collect();

        log::debug!("Converted {}x{} RGBA image to float pixels", width, height);

        Self {
            name: name.into(),
            width,
            height,
            pixels: Some(pixels),
        }
    }

    /// Create a solid color image (useful for testing and defaults)
    #[must_use]
    pub fn solid_color(name: impl Into<String>, width: u32, height: u32, color: [f32; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut pixels = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&color);
        }
        Self::new(name, width, height, pixels)
    }

    /// Image name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Resident pixel data, if loaded
    #[must_use]
    pub fn pixels(&self) -> Option<&[f32]> {
        self.pixels.as_deref()
    }

    /// Whether the pixel buffer is resident in memory
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.pixels.is_some()
    }
}
