//! Texture content fingerprinting
//!
//! Materials are grouped for merging by the digest of their texture's
//! pixel data, so the digest is an equality proxy, not a security
//! boundary. Within one run each distinct image is fingerprinted at most
//! once, keyed by image name.

use std::collections::HashMap;

use crate::scene::{SceneError, TextureImage};

/// Compute the content digest of a pixel buffer
///
/// Each normalized channel value is converted to an 8-bit integer by
/// truncating `value * 255` (truncation, not rounding, kept for
/// compatibility with digests produced by earlier runs), the bytes are
/// hashed with MD5, and the digest is returned as lowercase hex.
///
/// Truncation makes this a known-imprecise equality test: channels that
/// differ only by floating-point noise near an integer boundary can land
/// on different bytes, and genuinely different values can land on the
/// same byte.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pixel_digest(pixels: &[f32]) -> String {
    let bytes: Vec<u8> = pixels
        .iter()
        .map(|&channel| (channel * 255.0) as u8)
        .collect();

    format!("{:x}", md5::compute(&bytes))
}

/// Per-run digest cache keyed by image name
///
/// Relies on the session invariant that an image's name uniquely
/// identifies its pixel content; under that assumption no image is
/// hashed twice.
#[derive(Debug, Default)]
pub struct PixelHashCache {
    digests: HashMap<String, String>,
}

impl PixelHashCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest for an image, computing it on first request
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::PixelsUnavailable`] if the image's pixel
    /// buffer is not resident and no digest for its name is cached.
    pub fn digest(&mut self, image: &TextureImage) -> Result<String, SceneError> {
        if let Some(digest) = self.digests.get(image.name()) {
            return Ok(digest.clone());
        }

        let pixels = image.pixels().ok_or_else(|| SceneError::PixelsUnavailable {
            image: image.name().to_string(),
        })?;

        let digest = pixel_digest(pixels);
        log::debug!("Hashed image '{}' -> {}", image.name(), digest);

        self.digests
            .insert(image.name().to_string(), digest.clone());
        Ok(digest)
    }

    /// Number of distinct image names hashed so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Whether the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}
